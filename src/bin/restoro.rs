use clap::Parser;
use restoro_site::cli::utils::output_error;
use restoro_site::cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let output = OutputFormat::from_cli(&cli);

    if let Err(e) = restoro_site::cli::run(cli).await {
        let message = match std::env::var("CLI_VERBOSE").as_deref() {
            Ok("true") | Ok("1") => format!("{e:?}"),
            _ => e.to_string(),
        };
        output_error(&output, &message, None)?;
        std::process::exit(1);
    }

    Ok(())
}
