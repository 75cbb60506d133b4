use std::path::PathBuf;
use std::sync::Arc;

use bujo::{read_input, scan_input_from_str, Config, ImageHandle, NoPhotoLibrary, Scanner};
use clap::Parser;

#[derive(Parser)]
#[command(name = "bujo", about = "bujo — turn a scanned journal page into structured entries")]
struct Cli {
    /// Input is a recognition provider's JSON payload rather than page text.
    #[arg(long)]
    json: bool,
    /// Provider name recorded on entries read with --json.
    #[arg(long, default_value = "provider")]
    provider: String,
    /// The photographed page, used to date entries that carry no date.
    #[arg(long)]
    image: Option<PathBuf>,
    /// Config file (default: ~/.config/bujo/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write debug logs to /tmp/bujo-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,
    /// Text or JSON to scan; stdin when omitted.
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/bujo-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("bujo debug log started — tail -f /tmp/bujo-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let raw = read_input(cli.file.as_deref()).await?;
    let input = scan_input_from_str(&raw, cli.json.then_some(cli.provider.as_str()))?;
    let image = cli
        .image
        .as_ref()
        .map(|path| ImageHandle::new(path.display().to_string()));

    let scanner = Scanner::new(config, Arc::new(NoPhotoLibrary));
    let entries = scanner.scan(&input, image.as_ref()).await;
    tracing::info!(count = entries.len(), "entries scanned");

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
