use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use edl_core::document::Document;
use edl_core::model::ApplicationType;
use edl_core::sources::collect_sources;
use edl_core::{CoreError, LexOutput, assemble, lex};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        help = "EDL source file or directory (tokens), or parsed document JSON (model); stdin when omitted"
    )]
    input: Option<String>,

    #[arg(short, long)]
    output: String,

    #[arg(
        long,
        value_name = "FORMAT",
        default_value = "tokens",
        help = "Output format: tokens, model"
    )]
    emit: String,

    #[arg(
        long,
        value_name = "TYPE",
        default_value = "monolith",
        help = "Target application type: monolith, microservice, gateway, uaa"
    )]
    application_type: String,

    #[arg(long, value_name = "NAME", default_value = "app")]
    application_name: String,

    #[arg(long, value_name = "VERSION", help = "Generator version override")]
    generator_version: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    match cli.emit.as_str() {
        "tokens" => {
            let json = match &cli.input {
                Some(path) if Path::new(path).is_dir() => {
                    let mut outputs: BTreeMap<String, LexOutput> = BTreeMap::new();
                    for file in collect_sources(path)
                        .with_context(|| format!("failed to collect sources under {path}"))?
                    {
                        let output = lex(&file.contents)
                            .with_context(|| format!("failed to tokenize {}", file.path.display()))?;
                        outputs.insert(file.path.display().to_string(), output);
                    }
                    serde_json::to_string_pretty(&outputs)?
                }
                _ => {
                    let source = read_input(cli.input.as_deref())?;
                    let output = lex(&source).context("failed to tokenize input")?;
                    serde_json::to_string_pretty(&output)?
                }
            };
            write_output(&cli.output, json.as_bytes())?;
        }
        "model" => {
            let raw = read_input(cli.input.as_deref())?;
            let document: Document =
                serde_json::from_str(&raw).context("failed to parse document JSON")?;
            let application_type: ApplicationType = cli.application_type.parse()?;
            let model = assemble(
                Some(&document),
                application_type,
                &cli.application_name,
                cli.generator_version.as_deref(),
            )?;
            write_output(&cli.output, serde_json::to_string_pretty(&model)?.as_bytes())?;
        }
        other => return Err(CoreError::UnsupportedFormat(other.to_string()).into()),
    }

    Ok(())
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read input file {path}"))
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(path: &str, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = PathBuf::from(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes).with_context(|| format!("failed to write output file {path}"))?;
    Ok(())
}
