//! Loads an app config and a logger config through the store named by
//! `CONFIG_MODE` and prints both.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use confhub::primitives::PlaceholderTransform;
use confhub::{ConfigDocument, load_app_and_logger_config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

#[derive(Debug, Parser)]
#[command(about = "Resolve and print app and logger configs")]
struct Args {
    /// Store to read from: `nacos`, `consul`, or anything else for local files.
    #[arg(long, env = "CONFIG_MODE")]
    mode: Option<String>,

    /// Name of the app config document.
    #[arg(long, env = "CONFIG_FILE")]
    app: String,

    /// Name of the logger config document.
    #[arg(long, default_value = "dev/common-logger.yaml")]
    logger: String,

    /// Value substituted for `#{service-name}` in the logger config.
    #[arg(long, default_value = "my-service")]
    service_name: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let args = Args::parse();
    let transform = PlaceholderTransform::new().with_variable("service-name", &args.service_name);

    let config = load_app_and_logger_config(
        args.mode.as_deref(),
        &args.app,
        &args.logger,
        Some(&transform),
    )
    .await
    .with_context(|| format!("failed to load `{}` and `{}`", args.app, args.logger))?;

    info!(app = %args.app, logger = %args.logger, "configs loaded");
    print_document("app", &config.app, args.format)?;
    print_document("logger", &config.logger, args.format)?;
    Ok(())
}

fn print_document(label: &str, document: &ConfigDocument, format: Format) -> Result<()> {
    let rendered = match format {
        Format::Yaml => serde_yaml::to_string(document)?,
        Format::Json => serde_json::to_string_pretty(document)?,
    };
    println!("# {label}\n{rendered}");
    Ok(())
}
