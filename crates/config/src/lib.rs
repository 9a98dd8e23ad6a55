//! TIG level tools configuration
//!
//! Options live in a plain `key = value` text file (`tiglevel.txt` by
//! default). Lines starting with `#` are comments. Unknown keys are ignored
//! and values that fail to parse keep their default.

use std::fs;
use std::path::{Path, PathBuf};
use tig_core::{Result, TigError, DEFAULT_LEVEL_FILE};

/// File read by [`ConverterConfig::load_default`]
pub const DEFAULT_CONFIG_FILE: &str = "tiglevel.txt";

/// Options for loading, tidying and saving levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// File name inside each level directory (from "levelfile" option)
    pub level_file: String,
    /// Sort blocks by X before saving (from "sortblocks" option)
    pub sort_blocks: bool,
    /// Merge adjacent pits before saving (from "mergepits" option)
    pub merge_pits: bool,
    /// Directory to save tidied levels into; `None` saves in place
    /// (from "outputdir" option)
    pub output_dir: Option<PathBuf>,
    /// Verbose logging (from "debug" option)
    pub debug: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            level_file: DEFAULT_LEVEL_FILE.into(),
            sort_blocks: false,
            merge_pits: false,
            output_dir: None,
            debug: false,
        }
    }
}

impl ConverterConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TigError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Ok(Self::parse(&content))
    }

    /// Load `tiglevel.txt` from the working directory, falling back to
    /// defaults when it does not exist
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                config.parse_option(&key.trim().to_lowercase(), value.trim());
            }
        }

        config
    }

    fn parse_option(&mut self, key: &str, value: &str) {
        match key {
            "levelfile" => {
                if !value.is_empty() {
                    self.level_file = value.into();
                }
            }
            "sortblocks" => {
                self.sort_blocks = parse_bool(value).unwrap_or(false);
            }
            "mergepits" => {
                self.merge_pits = parse_bool(value).unwrap_or(false);
            }
            "outputdir" => {
                self.output_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "debug" => {
                self.debug = parse_bool(value).unwrap_or(false);
            }
            _ => {
                tracing::debug!("Unknown config option: {} = {}", key, value);
            }
        }
    }

    /// Log the effective options
    pub fn display(&self) {
        tracing::info!("Level file: {}", self.level_file);
        tracing::info!("Sort blocks: {}", self.sort_blocks);
        tracing::info!("Merge pits: {}", self.merge_pits);
        match &self.output_dir {
            Some(dir) => tracing::info!("Output directory: {}", dir.display()),
            None => tracing::info!("Output directory: (in place)"),
        }
        tracing::info!("Debug: {}", self.debug);
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.level_file, "level.dat");
        assert!(!config.sort_blocks);
        assert!(!config.merge_pits);
        assert!(config.output_dir.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn test_parse_options() {
        let config = ConverterConfig::parse(
            "# tidy settings\n\
             levelfile = other.dat\n\
             SortBlocks = yes\n\
             mergepits=true\n\
             outputdir = out/levels\n\
             debug = 1\n",
        );
        assert_eq!(config.level_file, "other.dat");
        assert!(config.sort_blocks);
        assert!(config.merge_pits);
        assert_eq!(config.output_dir, Some(PathBuf::from("out/levels")));
        assert!(config.debug);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = ConverterConfig::parse(
            "mergepits = maybe\nlevelfile =\noutputdir =\nnonsense line\ncolor = red\n",
        );
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tiglevel.txt");
        fs::write(&path, "sortblocks = true\n").unwrap();

        let config = ConverterConfig::load_from_file(&path).unwrap();
        assert!(config.sort_blocks);
        assert!(!config.merge_pits);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = ConverterConfig::load_from_file(temp_dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, TigError::Config(_)));
    }
}
