//! Level files on disk
//!
//! The editor keeps each level in its own directory as `level.dat`. A
//! missing or unreadable file is not an error: it reads as empty, and an
//! empty buffer decodes to a blank level.

use crate::codec::LevelCodec;
use crate::document::LevelDocument;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tig_core::DEFAULT_LEVEL_FILE;

/// Read a whole file, or nothing if it cannot be opened
pub fn read_all_bytes<P: AsRef<Path>>(path: P) -> Vec<u8> {
    let path = path.as_ref();
    match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Could not read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Write bytes to `path`, creating parent directories and replacing any
/// existing file
pub fn write_all_bytes<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, data)?;
    Ok(())
}

/// Loads and saves levels using the editor's directory layout
#[derive(Debug, Clone)]
pub struct LevelStore {
    /// File name inside each level directory
    level_file: String,
}

impl LevelStore {
    pub fn new() -> Self {
        Self::with_level_file(DEFAULT_LEVEL_FILE)
    }

    /// Use a different file name inside level directories
    pub fn with_level_file(level_file: impl Into<String>) -> Self {
        Self {
            level_file: level_file.into(),
        }
    }

    pub fn level_file(&self) -> &str {
        &self.level_file
    }

    /// Path of the level file inside `dir`
    pub fn level_path<P: AsRef<Path>>(&self, dir: P) -> PathBuf {
        dir.as_ref().join(&self.level_file)
    }

    /// Load the level stored in `dir`
    pub fn load_dir<P: AsRef<Path>>(&self, dir: P) -> LevelDocument {
        Self::load_file(self.level_path(dir))
    }

    /// Save `level` into `dir`, creating the directory if needed
    pub fn save_dir<P: AsRef<Path>>(&self, level: &LevelDocument, dir: P) -> Result<PathBuf> {
        let path = self.level_path(dir);
        Self::save_file(level, &path)?;
        Ok(path)
    }

    /// Load a level file; missing files give a blank level
    pub fn load_file<P: AsRef<Path>>(path: P) -> LevelDocument {
        let path = path.as_ref();
        let data = read_all_bytes(path);
        if data.is_empty() {
            tracing::info!("{} is missing or empty, using blank level", path.display());
        } else {
            tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        }

        let level = LevelCodec::decode(&data);
        if !level.loaded_successfully() {
            tracing::warn!("{} only partially loaded", path.display());
        }
        level
    }

    /// Encode and write a level file
    ///
    /// A level the format cannot hold in full is refused before the file is
    /// touched.
    pub fn save_file<P: AsRef<Path>>(level: &LevelDocument, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = LevelCodec::try_encode(level)?;
        write_all_bytes(path, &bytes)?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

impl Default for LevelStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LevelError;
    use crate::records::{BackgroundChange, BlockObject};

    #[test]
    fn test_missing_file_reads_empty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        assert!(read_all_bytes(temp_dir.path().join("nope.dat")).is_empty());
    }

    #[test]
    fn test_missing_level_is_blank() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let level = LevelStore::new().load_dir(temp_dir.path().join("no-such-level"));
        assert_eq!(level, LevelDocument::new());
    }

    #[test]
    fn test_empty_file_is_blank() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("level.dat");
        fs::write(&path, b"").unwrap();
        let level = LevelStore::load_file(&path);
        assert!(level.loaded_successfully());
        assert_eq!(level, LevelDocument::new());
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dir = temp_dir.path().join("levels").join("stereo madness");

        let mut level = LevelDocument::new();
        level.add_block(BlockObject::spike(600, 0));
        level.add_background(BackgroundChange::custom_texture(0, "bg.png"));

        let store = LevelStore::new();
        let path = store.save_dir(&level, &dir).unwrap();
        assert_eq!(path, dir.join("level.dat"));
        assert!(path.is_file());

        assert_eq!(store.load_dir(&dir), level);
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("level.dat");
        fs::write(&path, vec![0xFF; 200]).unwrap();

        let level = LevelDocument::new();
        LevelStore::save_file(&level, &path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), LevelCodec::encode(&level).to_vec());
    }

    #[test]
    fn test_save_failure_is_reported() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // A regular file cannot be used as a directory
        let result = LevelStore::new().save_dir(&LevelDocument::new(), blocker.join("level"));
        assert!(result.is_err());
    }

    #[test]
    fn test_oversized_level_is_not_written() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dir = temp_dir.path().join("huge");
        let store = LevelStore::new();

        let mut original = LevelDocument::new();
        original.add_block(BlockObject::spike(90, 0));
        store.save_dir(&original, &dir).unwrap();

        let mut level = LevelDocument::new();
        for x in 0..40_000 {
            level.add_block(BlockObject::platform(x, 0));
        }
        let err = store.save_dir(&level, &dir).unwrap_err();
        assert!(matches!(err, LevelError::Oversized { field: "block", len: 40_000, .. }));

        // Previous contents survive
        assert_eq!(store.load_dir(&dir), original);
    }

    #[test]
    fn test_long_texture_path_is_not_written() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("level.dat");

        let mut level = LevelDocument::new();
        level.add_background(BackgroundChange::custom_texture(0, "p".repeat(70_000)));
        let err = LevelStore::save_file(&level, &path).unwrap_err();
        assert!(matches!(err, LevelError::Oversized { field: "texture path", .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_custom_level_file_name() {
        let store = LevelStore::with_level_file("custom.bin");
        assert_eq!(store.level_path("/tmp/x"), PathBuf::from("/tmp/x/custom.bin"));
        assert_eq!(store.level_file(), "custom.bin");
    }
}
