use std::path::PathBuf;
use std::sync::Arc;

use teloxide::types::{ChatId, MessageId};

use crate::downloader::{build_args, DOWNLOAD_TIMEOUT, Downloader};
use crate::errors::HandlerResult;
use crate::files::collect_outputs;
use crate::pending::PendingStore;
use crate::sender::SendPacer;
use crate::transport::ChatTransport;
use crate::utils::MediaFormat;
use crate::workdir::WorkDir;

/// Runs one download-and-relay job end to end: working directory, downloader
/// subprocess, output scan, paced send loop, cleanup.
///
/// Constructed once at startup with the real transport and downloader;
/// tests inject fakes through the same constructor.
pub struct Orchestrator {
    transport: Arc<dyn ChatTransport>,
    downloader: Arc<dyn Downloader>,
    pacer: SendPacer,
    work_root: PathBuf,
}

impl Orchestrator {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        downloader: Arc<dyn Downloader>,
        pacer: SendPacer,
        work_root: PathBuf,
    ) -> Self {
        Self {
            transport,
            downloader,
            pacer,
            work_root,
        }
    }

    /// Entry point for a format-choice button press.
    ///
    /// A stale or duplicate press finds no pending link and never reaches the
    /// downloader.
    pub async fn handle_format_choice(
        &self,
        store: &PendingStore,
        chat_id: ChatId,
        status_id: MessageId,
        format: MediaFormat,
    ) -> HandlerResult {
        let Some(url) = store.take(chat_id).await else {
            self.transport
                .edit_status(
                    chat_id,
                    status_id,
                    "🤷 No link found for this chat. Send me a link first.",
                )
                .await?;
            return Ok(());
        };

        log::info!("Starting {} job for chat {}: {}", format, chat_id, url);

        let result = self.run(chat_id, status_id, &url, format).await;
        if let Err(e) = &result {
            log::error!("Job for chat {} failed: {}", chat_id, e);
            let _ = self
                .transport
                .edit_status(chat_id, status_id, "❌ Something went wrong, please try again.")
                .await;
        }
        result
    }

    async fn run(
        &self,
        chat_id: ChatId,
        status_id: MessageId,
        url: &str,
        format: MediaFormat,
    ) -> HandlerResult {
        // The guard removes the directory on every exit path below.
        let workdir = WorkDir::create(&self.work_root)?;
        let args = build_args(format, workdir.path(), url);

        self.transport
            .edit_status(chat_id, status_id, "⏳ Downloading, this can take a while...")
            .await?;

        if let Err(e) = self
            .downloader
            .invoke(&args, workdir.path(), DOWNLOAD_TIMEOUT)
            .await
        {
            log::error!("Download failed for {}: {}", url, e);
            self.transport
                .edit_status(
                    chat_id,
                    status_id,
                    "❌ Download failed. Please check the link and try again.",
                )
                .await?;
            return Ok(());
        }

        let files = collect_outputs(workdir.path(), format.extension()).await?;
        if files.is_empty() {
            self.transport
                .edit_status(
                    chat_id,
                    status_id,
                    "😕 The download finished but produced no files. \
                     The source may be restricted, unsupported, or the link invalid.",
                )
                .await?;
            return Ok(());
        }

        let mut sent = 0usize;
        let mut skipped = 0usize;

        for file in &files {
            if file.exceeds_send_limit() {
                skipped += 1;
                log::warn!("Skipping oversized file {} ({} bytes)", file.name, file.size);
                self.transport
                    .reply(
                        chat_id,
                        &format!("⚠️ {} is too large to send, skipping it.", file.name),
                    )
                    .await?;
                continue;
            }

            self.pacer.pace().await;

            // One bad file must not take the rest of the batch down with it.
            match self.transport.send_media(chat_id, file, format).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    log::warn!("Failed to send {}: {}", file.name, e);
                    self.transport
                        .reply(chat_id, &format!("❌ Failed to send {}.", file.name))
                        .await?;
                }
            }
        }

        let mut summary = format!("✅ Done! Sent {} file(s).", sent);
        if skipped > 0 {
            summary.push_str(&format!(" Skipped {} oversized file(s).", skipped));
        }
        self.transport.edit_status(chat_id, status_id, &summary).await?;

        Ok(())
    }
}
