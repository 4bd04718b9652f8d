//! Subcommand handlers.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use dropzone_client::{BackendClient, StorageClient};
use dropzone_transfer::validate_folder_name;
use dropzone_upload::{FileId, UploadEvent, UploadOrchestrator, UploadSession, UploadSummary};

use crate::access::is_admin;
use crate::adapter::{SigningAdapter, StorageAdapter, backend_error};
use crate::config::Config;
use crate::folders::FolderView;
use crate::format::format_file_size;

fn backend(config: &Config) -> anyhow::Result<Arc<BackendClient>> {
    let client = BackendClient::new(&config.api_url, config.timeout())
        .context("failed to build backend client")?;
    Ok(Arc::new(client))
}

fn require_admin(config: &Config) -> anyhow::Result<()> {
    if !is_admin(config.user_email.as_deref(), &config.admin_emails) {
        bail!("folder management requires an admin account");
    }
    Ok(())
}

pub async fn list_folders(config: &Config) -> anyhow::Result<()> {
    let view = FolderView::load(&*backend(config)?).await?;
    println!("{}", view.render().trim_end());
    Ok(())
}

pub async fn create_folder(config: &Config, name: &str) -> anyhow::Result<()> {
    require_admin(config)?;
    let name = name.trim();
    validate_folder_name(name)?;

    let folder = backend(config)?
        .create_folder(name, config.token().unwrap_or_default())
        .await
        .map_err(backend_error)?;
    tracing::info!(folder = %folder.name, "folder created");
    println!("Created folder '{}' ({})", folder.name, folder.path);
    Ok(())
}

pub async fn delete_folder(config: &Config, name: &str, confirmed: bool) -> anyhow::Result<()> {
    require_admin(config)?;
    if !confirmed {
        bail!("refusing to delete folder '{name}' and all of its files without --yes");
    }

    backend(config)?
        .delete_folder(name, config.token().unwrap_or_default())
        .await
        .map_err(backend_error)?;
    tracing::info!(folder = %name, "folder deleted");
    println!("Deleted folder '{name}'");
    Ok(())
}

pub fn whoami(config: &Config) {
    match config.user_email.as_deref() {
        Some(email) => {
            let role = if is_admin(Some(email), &config.admin_emails) {
                "admin"
            } else {
                "user"
            };
            println!("{email} ({role})");
        }
        None => println!("not signed in"),
    }
    if config.token().is_none() {
        println!("no session token configured");
    }
}

/// Uploads `paths` into `folder_name`. Returns the batch summary.
pub async fn upload(
    config: &Config,
    folder_name: &str,
    paths: &[PathBuf],
) -> anyhow::Result<UploadSummary> {
    let folder_name = folder_name.trim();
    validate_folder_name(folder_name)?;

    let backend = backend(config)?;
    let view = FolderView::load(&backend).await?;
    let folder = view
        .find(folder_name)
        .cloned()
        .with_context(|| format!("folder '{folder_name}' does not exist"))?;

    let mut session = UploadSession::new(folder);
    for path in paths {
        if path.is_dir() {
            session.add_dir(path)?;
        } else {
            session.add_files([path])?;
        }
    }
    if session.selection().is_empty() {
        bail!("no files to upload");
    }

    let mut names = HashMap::new();
    for file in session.selection().iter() {
        let kind = if file.is_image() { "image" } else { "file" };
        println!("  {:<32} {:>10}  {kind}", file.name, format_file_size(file.size));
        names.insert(file.id, file.name.clone());
    }
    for group in session.selection().duplicates() {
        if let Some(name) = group.first().and_then(|id| names.get(id)) {
            tracing::warn!(name = %name, copies = group.len(), "same file selected more than once");
        }
    }

    let storage = StorageClient::new(&config.storage_url, config.timeout())
        .context("failed to build storage client")?;
    let signer = SigningAdapter::new(backend, config.token().map(String::from));
    let transport = StorageAdapter::new(Arc::new(storage));

    let mut orchestrator = UploadOrchestrator::new(Arc::new(signer), Arc::new(transport));
    let events_rx = orchestrator.take_events();

    // Keep the handle so every terminal line is printed before we return.
    let forwarder = events_rx.map(|mut rx| {
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                print_event(&names, event);
            }
        })
    });

    let cancel = orchestrator.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling remaining uploads");
            cancel.cancel();
        }
    });

    let summary = session.start(&orchestrator).await;

    interrupt.abort();
    drop(orchestrator);
    if let Some(handle) = forwarder {
        let _ = handle.await;
    }

    if !session.can_close() {
        tracing::error!("session still busy after upload finished");
    }
    session.close()?;
    Ok(summary)
}

fn print_event(names: &HashMap<FileId, String>, event: UploadEvent) {
    let name = |id: &FileId| names.get(id).map(String::as_str).unwrap_or("?");
    match event {
        UploadEvent::Started { name, .. } => {
            print!("{name}: 0%");
        }
        UploadEvent::Progress { file_id, progress } => {
            print!("\r{}: {}%", name(&file_id), progress.percentage);
        }
        UploadEvent::Succeeded {
            file_id,
            remote_url,
            ..
        } => {
            println!("\r{}: 100% {remote_url}", name(&file_id));
        }
        UploadEvent::Failed { file_id, message } => {
            println!("\r{}: failed: {message}", name(&file_id));
        }
        UploadEvent::Cancelled { file_id } => {
            println!("\r{}: cancelled", name(&file_id));
        }
        UploadEvent::Finished(summary) => {
            println!(
                "{} uploaded, {} failed, {} cancelled, {} already uploaded",
                summary.succeeded, summary.failed, summary.cancelled, summary.skipped
            );
        }
    }
    let _ = std::io::stdout().flush();
}
