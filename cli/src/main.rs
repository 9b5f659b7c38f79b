use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use jsonschema_guard_core::{compile, compile_with_definitions, CompileOptions, Validator};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "jsonschema-guard")]
#[command(about = "Compile JSON Schemas into validators and check JSON payloads against them")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON instance against a schema
    Check {
        /// JSON Schema file
        schema: PathBuf,

        /// JSON instance file (`-` reads stdin)
        instance: PathBuf,

        #[command(flatten)]
        compile: CompileArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Compile a schema and print the schema the validator enforces
    Compile {
        /// JSON Schema file
        schema: PathBuf,

        /// Output file (defaults to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        compile: CompileArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct CompileArgs {
    /// Only accept the mandatory shape of the root object
    #[arg(long)]
    strict: bool,

    /// Max nesting depth of the compile descent
    #[arg(long, default_value_t = 50)]
    max_depth: usize,

    /// JSON object of shared definitions that `#/$defs/Name` refs fall back to
    #[arg(long)]
    definitions: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Pretty,
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            schema,
            instance,
            compile: args,
            format,
        } => {
            let validator = build_validator(&schema, &args)?;
            let data = read_json(&instance, "instance")?;

            match validator.parse(&data) {
                Ok(output) => write_json(&output, None, format)?,
                Err(err) => {
                    write_json(&err.issues, None, format)?;
                    anyhow::bail!("Validation failed: {err}");
                }
            }
        }
        Commands::Compile {
            schema,
            output,
            compile: args,
            format,
        } => {
            let validator = build_validator(&schema, &args)?;
            write_json(&validator.to_json_schema(), output.as_ref(), format)?;
        }
    }

    Ok(())
}

fn build_validator(schema_path: &Path, args: &CompileArgs) -> Result<Validator> {
    let schema = read_json(schema_path, "schema")?;

    // All fields set explicitly; clippy enforces exhaustiveness
    let options = CompileOptions {
        strict: args.strict,
        max_depth: args.max_depth,
    };

    let compiled = match &args.definitions {
        Some(path) => {
            let definitions = read_json(path, "definitions")?;
            let definitions = definitions.as_object().with_context(|| {
                format!("Definitions file must hold a JSON object: {}", path.display())
            })?;
            compile_with_definitions(&schema, definitions, &options)
        }
        None => compile(&schema, &options),
    };
    compiled.map_err(|e| anyhow::Error::from(e).context("Compilation failed"))
}

fn read_json(path: &Path, what: &str) -> Result<Value> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .with_context(|| format!("Failed to read {what} from stdin"))?;
        return serde_json::from_str(&buf)
            .with_context(|| format!("Failed to parse {what} from stdin"));
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open {what} file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {what} from: {}", path.display()))
}

fn write_json<T: serde::Serialize>(
    val: &T,
    path: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    match format {
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut writer, val).context("Failed to write JSON")?;
        }
        OutputFormat::Compact => {
            serde_json::to_writer(&mut writer, val).context("Failed to write JSON")?;
        }
    }

    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}
