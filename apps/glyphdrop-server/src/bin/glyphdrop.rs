//! Glyphdrop command-line client
//!
//! Uploads one image to a running Glyphdrop server and prints the
//! extracted text.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use glyphdrop_server::client::{ExtractOutcome, HttpTransport, SelectedFile, ToastLog, UploadController};

#[derive(Parser, Debug)]
#[command(name = "glyphdrop", version, about = "Extract text from an image via a Glyphdrop server")]
struct Cli {
    /// Image to upload
    image: PathBuf,

    /// Base URL of the Glyphdrop server
    #[arg(long, env = "GLYPHDROP_GATEWAY", default_value = "http://localhost:3000")]
    gateway: String,

    /// Hide the progress line
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "glyphdrop_server=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let file = SelectedFile::from_path(&cli.image)
        .await
        .with_context(|| format!("Failed to read {}", cli.image.display()))?;

    let transport = HttpTransport::new(&cli.gateway);
    tracing::debug!("Posting to {}", transport.endpoint());

    let controller = UploadController::new(transport, ToastLog::new());
    controller.select_file(Some(file));

    if !cli.quiet {
        let mut snapshots = controller.subscribe();
        tokio::spawn(async move {
            let mut last = None;
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                if snapshot.busy && last != Some(snapshot.progress) {
                    tracing::info!("[{:>3}%] {}", snapshot.progress, snapshot.file_name);
                    last = Some(snapshot.progress);
                }
            }
        });
    }

    match controller.extract().await {
        ExtractOutcome::Extracted(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}
