use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process;

use crate::errors::{BotError, BotResult};
use crate::utils::MediaFormat;

/// Generous per-job limit: a playlist URL downloads one file per item, and
/// large playlists legitimately take a long time.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60 * 60);

/// Capability seam around the external downloader binary.
///
/// Non-zero exit, spawn failure and timeout all surface as `Err`, so the
/// orchestrator treats every one of them as total job failure. Tests supply a
/// fake that deposits fixture files without spawning anything.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn invoke(&self, args: &[String], workdir: &Path, timeout: Duration) -> BotResult<()>;
}

/// Build the downloader argument vector for one job.
///
/// The output template roots every produced file in the job's working
/// directory, named after the media title. No `--no-playlist`: a playlist URL
/// is expected to produce one file per item. The URL is always last.
pub fn build_args(format: MediaFormat, workdir: &Path, url: &str) -> Vec<String> {
    let template = workdir.join("%(title)s.%(ext)s");
    let mut args: Vec<String> = match format {
        MediaFormat::Video => vec![
            "-f".into(),
            "mp4/bestvideo*+bestaudio/best".into(),
            "--recode-video".into(),
            "mp4".into(),
            "--merge-output-format".into(),
            "mp4".into(),
        ],
        MediaFormat::Audio => vec![
            "-x".into(),
            "--audio-format".into(),
            "mp3".into(),
            "--audio-quality".into(),
            "0".into(),
        ],
    };
    args.push("-o".into());
    args.push(template.to_string_lossy().into_owned());
    args.push(url.to_string());
    args
}

/// The real downloader: runs the `yt-dlp` binary as a subprocess.
pub struct YtDlp {
    program: String,
}

impl YtDlp {
    pub fn new() -> Self {
        Self {
            program: "yt-dlp".to_string(),
        }
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Downloader for YtDlp {
    async fn invoke(&self, args: &[String], workdir: &Path, timeout: Duration) -> BotResult<()> {
        let mut cmd = process::Command::new(&self.program);
        cmd.args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            // If the timeout fires we drop the child; make sure it dies with us.
            .kill_on_drop(true);

        log::info!("Running {} {}", self.program, args.join(" "));

        let child = cmd.spawn().map_err(|e| BotError::DownloaderSpawn {
            command: self.program.clone(),
            source: e,
        })?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                log::error!("{} timed out after {:?}", self.program, timeout);
                BotError::DownloaderTimeout(timeout)
            })??;

        log::info!("{} exit status: {}", self.program, output.status);

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            log::error!("{} failed: {}", self.program, stderr);
            Err(BotError::DownloaderFailed {
                code: output.status.code(),
                stderr,
            })
        }
    }
}
