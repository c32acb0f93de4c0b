// ABOUTME: Entry point for the vitrin CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;

use bytes::Bytes;
use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use vitrin::api::{ApiError, ApiErrorKind, DeleteError, StorefrontClient, UploadFile};
use vitrin::catalog::{price_display, select_variant};
use vitrin::config::{self, Config};
use vitrin::error::{Error, Result};
use vitrin::gallery::{DeletionOutcome, Gallery};
use vitrin::notify::{ConsoleSink, NotificationSink, OutputMode};
use vitrin::resolve::{ImageResolver, RenderState};
use vitrin::types::{VariantId, VariantRecord};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let sink = ConsoleSink::new(mode);

    let result = run(cli, &sink).await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(exit_code(&e));
    }
}

/// Exit codes: 1 for local errors, 2 when the server declined the request,
/// 3 when the request never completed and may be retried.
fn exit_code(error: &Error) -> i32 {
    match error {
        Error::Api(api) => match api.kind() {
            ApiErrorKind::Denied | ApiErrorKind::Invalid => 2,
            ApiErrorKind::Transport => 3,
        },
        _ => 1,
    }
}

async fn run(cli: Cli, sink: &dyn NotificationSink) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, force)
        }
        Commands::Upload { files, manifest } => upload(files, manifest, sink).await,
        Commands::Delete {
            reference,
            manifest,
        } => delete(reference, manifest, sink).await,
        Commands::Sign { reference } => sign(reference).await,
        Commands::Price { file, selected } => price(&file, selected),
    }
}

fn load_config() -> Result<Config> {
    let cwd = env::current_dir()?;
    Config::discover(&cwd)
}

/// Upload files and print the URLs assigned by storage.
async fn upload(
    files: Vec<PathBuf>,
    manifest: Option<PathBuf>,
    sink: &dyn NotificationSink,
) -> Result<()> {
    let config = load_config()?;
    let client = StorefrontClient::from_config(&config)?;
    let gallery = Gallery::new(client, config.classifier_rules());

    let mut payload = Vec::with_capacity(files.len());
    for path in &files {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        payload.push(UploadFile::new(name, content_type_for(path), Bytes::from(data)));
    }

    let images = match &manifest {
        Some(path) => read_manifest(path)?,
        None => Vec::new(),
    };

    let next = gallery
        .upload(&images, &payload, sink)
        .await
        .map_err(ApiError::from)?;

    for url in &next[images.len()..] {
        println!("{url}");
    }

    if let Some(path) = &manifest {
        write_manifest(path, &next)?;
    }

    Ok(())
}

/// Delete one managed image, updating the manifest only on success.
async fn delete(
    reference: String,
    manifest: Option<PathBuf>,
    sink: &dyn NotificationSink,
) -> Result<()> {
    let config = load_config()?;
    let client = StorefrontClient::from_config(&config)?;
    let gallery = Gallery::new(client, config.classifier_rules());

    let images = match &manifest {
        Some(path) => read_manifest(path)?,
        None => vec![reference.clone()],
    };

    let (outcome, next) = gallery.remove(&images, &reference, sink).await;

    match outcome {
        DeletionOutcome::Deleted => {
            if let Some(path) = &manifest {
                write_manifest(path, &next)?;
            }
            Ok(())
        }
        DeletionOutcome::Rejected(reason) => Err(Error::DeletionFailed(reason)),
        DeletionOutcome::TransportFailed(reason) => {
            Err(Error::Api(DeleteError::Transport(reason).into()))
        }
    }
}

/// Resolve a reference to a renderable URL and print it.
async fn sign(reference: String) -> Result<()> {
    let config = load_config()?;
    let client = StorefrontClient::from_config(&config)?;
    let resolver = ImageResolver::new(client, config.classifier_rules());

    match resolver.resolve_reference(&reference).await {
        RenderState::Ready(signed) => {
            println!("{}", signed.url);
            if let Some(at) = signed.expires_at {
                println!("expires: {}", at.to_rfc3339());
            }
            Ok(())
        }
        RenderState::Failed(reason) => Err(Error::ResolutionFailed(reason)),
        RenderState::Idle | RenderState::Loading => Err(Error::ResolutionFailed(
            "resolution did not complete".to_string(),
        )),
    }
}

/// Preview the displayed price for a variants file.
fn price(file: &Path, selected: Option<String>) -> Result<()> {
    let variants: Vec<VariantRecord> = serde_json::from_str(&fs::read_to_string(file)?)?;
    let selected_id = selected.map(VariantId::new);

    if let Some(variant) = select_variant(&variants, selected_id.as_ref()) {
        let stock = if variant.in_stock() {
            ""
        } else {
            " [out of stock]"
        };
        println!(
            "selected: {} ({} {}){}",
            variant.id, variant.amount, variant.unit, stock
        );
    }

    println!("{}", price_display(&variants, selected_id.as_ref()));

    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_manifest(path: &Path, images: &[String]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(images)?)?;
    Ok(())
}
