use std::io;
use std::path::{Path, PathBuf};

/// Per-job working directory, removed together with its contents on drop.
///
/// The downloader writes everything it produces in here, so dropping the
/// guard is the cleanup path for every job outcome. Removal errors are
/// swallowed: there is nothing useful to do with them at that point.
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create a fresh, uniquely named directory under `root`.
    pub fn create(root: &Path) -> io::Result<Self> {
        let path = root.join(format!("job-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_makes_a_unique_directory() {
        let root = tempfile::tempdir().unwrap();

        let a = WorkDir::create(root.path()).unwrap();
        let b = WorkDir::create(root.path()).unwrap();

        assert!(a.path().is_dir());
        assert!(b.path().is_dir());
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn drop_removes_the_directory_and_contents() {
        let root = tempfile::tempdir().unwrap();

        let dir = WorkDir::create(root.path()).unwrap();
        let path = dir.path().to_path_buf();
        std::fs::write(path.join("clip.mp4"), b"data").unwrap();

        drop(dir);

        assert!(!path.exists());
    }
}
