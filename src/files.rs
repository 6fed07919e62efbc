use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::errors::BotResult;

/// Largest file we will hand to Telegram, with headroom under the hard ~2 GiB
/// per-file limit.
pub const MAX_SEND_BYTES: u64 = 1900 * 1024 * 1024;

/// A file the downloader left in the working directory.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: SystemTime,
}

impl OutputFile {
    pub fn exceeds_send_limit(&self) -> bool {
        self.size > MAX_SEND_BYTES
    }
}

/// List the files with the expected extension, oldest first.
///
/// Modification time is the closest proxy we have for playlist order: the
/// downloader finishes items sequentially and leaves no other trace of the
/// order in which it produced them.
pub async fn collect_outputs(dir: &Path, extension: &str) -> BotResult<Vec<OutputFile>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }

        files.push(OutputFile {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
            size: metadata.len(),
            modified: metadata.modified()?,
        });
    }

    files.sort_by_key(|f| f.modified);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_with_mtime(dir: &Path, name: &str, age: Duration) -> PathBuf {
        let path = dir.join(name);
        let file = File::create(&path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
        path
    }

    #[tokio::test]
    async fn only_matching_extensions_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        write_with_mtime(dir.path(), "song.mp3", Duration::ZERO);
        write_with_mtime(dir.path(), "clip.mp4", Duration::ZERO);
        write_with_mtime(dir.path(), "clip.mp4.part", Duration::ZERO);

        let files = collect_outputs(dir.path(), "mp4").await.unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "clip.mp4");
    }

    #[tokio::test]
    async fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        write_with_mtime(dir.path(), "CLIP.MP4", Duration::ZERO);

        let files = collect_outputs(dir.path(), "mp4").await.unwrap();

        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn outputs_are_sorted_by_mtime_ascending() {
        let dir = tempfile::tempdir().unwrap();
        // Created out of order on purpose; only mtime should matter.
        write_with_mtime(dir.path(), "second.mp3", Duration::from_secs(60));
        write_with_mtime(dir.path(), "third.mp3", Duration::from_secs(30));
        write_with_mtime(dir.path(), "first.mp3", Duration::from_secs(90));

        let files = collect_outputs(dir.path(), "mp3").await.unwrap();

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["first.mp3", "second.mp3", "third.mp3"]);
    }

    #[tokio::test]
    async fn empty_directory_yields_no_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let files = collect_outputs(dir.path(), "mp4").await.unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn size_gate_uses_the_ceiling() {
        let small = OutputFile {
            name: "small.mp4".into(),
            path: "small.mp4".into(),
            size: 100 * 1024 * 1024,
            modified: SystemTime::now(),
        };
        let large = OutputFile {
            size: 2000 * 1024 * 1024,
            ..small.clone()
        };

        assert!(!small.exceeds_send_limit());
        assert!(large.exceeds_send_limit());
    }
}
