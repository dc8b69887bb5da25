// CLI shell for the retouching session controller.
// Drives a scripted editing session against a running service:
// upload, a sequence of operations, optional reset, optional export.

use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};

use image_retoucher::{
    Editor, HttpProcessingApi, InputEvent, Operation, TerminalView,
};

/// Apply a sequence of retouching operations to an image via a remote
/// processing service.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the source image (png, jpg, gif, bmp, webp).
    input: PathBuf,

    /// Base URL of the retouching service.
    #[arg(short, long, default_value = "http://127.0.0.1:5000")]
    server: String,

    /// Operation to apply, as `name` or `name:key=value[,key=value]`
    /// (e.g. `grayscale`, `upscale:scale=2`). Repeatable; applied in order.
    #[arg(short = 'a', long = "apply", value_name = "OP")]
    operations: Vec<Operation>,

    /// Reset to the original after applying the operations.
    #[arg(long)]
    reset: bool,

    /// Export the final image and save it to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_retoucher=info".into()),
        )
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_target(false)       // Remove module path
        .with_writer(std::io::stderr)
        .compact();               // Use compact formatter instead of pretty

    subscriber.init();

    let args = Args::parse();
    debug!("Connecting to {}", args.server);

    let api = HttpProcessingApi::new(&args.server)?;
    let mut editor = Editor::new(api.clone(), TerminalView);

    editor
        .handle_input(InputEvent::FileSelected {
            path: args.input.clone(),
        })
        .await
        .with_context(|| format!("uploading {}", args.input.display()))?;

    for operation in &args.operations {
        editor
            .apply_operation(operation)
            .await
            .with_context(|| format!("applying '{operation}'"))?;
    }

    if args.reset {
        editor.reset().context("resetting to original")?;
    }

    if let Some(output) = &args.output {
        let url = editor.download().await.context("exporting image")?;
        let bytes = api
            .fetch(&url)
            .await
            .with_context(|| format!("fetching export {url}"))?;
        tokio::fs::write(output, bytes)
            .await
            .with_context(|| format!("writing {}", output.display()))?;
        info!("Saved {}", output.display());
    }

    Ok(())
}
