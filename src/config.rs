//! Pipeline configuration
//!
//! Defaults can be overridden from environment variables (typically sourced
//! from a `.env` file) and then from command line flags:
//! - ETL_WORKING_DIR: directory scanned for input files (default `.`)
//! - ETL_OUTPUT_FILE: CSV written by the load stage (default `transformed_data.csv`)
//! - ETL_LOG_FILE: progress log (default `log_file.txt`)
//! - ETL_CSV_HEADERS: whether input CSV files have a header row (default `true`)

use eyre::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "transformed_data.csv";
pub const DEFAULT_LOG_FILE: &str = "log_file.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub working_dir: PathBuf,
    pub output_file: PathBuf,
    pub log_file: PathBuf,
    pub csv_headers: bool,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            working_dir: PathBuf::from("."),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            csv_headers: true,
        }
    }
}

impl EtlConfig {
    /// Defaults with `working_dir` replaced
    pub fn in_dir(working_dir: impl AsRef<Path>) -> Self {
        Self {
            working_dir: working_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load configuration from `ETL_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ETL_WORKING_DIR") {
            config.working_dir = PathBuf::from(dir);
        }
        if let Ok(output) = std::env::var("ETL_OUTPUT_FILE") {
            config.output_file = PathBuf::from(output);
        }
        if let Ok(log_file) = std::env::var("ETL_LOG_FILE") {
            config.log_file = PathBuf::from(log_file);
        }
        if let Ok(headers) = std::env::var("ETL_CSV_HEADERS") {
            config.csv_headers = headers
                .trim()
                .to_lowercase()
                .parse()
                .with_context(|| format!("Invalid ETL_CSV_HEADERS: {}", headers))?;
        }

        Ok(config)
    }

    /// Output path, relative paths resolved against the working directory
    pub fn output_path(&self) -> PathBuf {
        self.working_dir.join(&self.output_file)
    }

    /// Progress log path, relative paths resolved against the working directory
    pub fn log_path(&self) -> PathBuf {
        self.working_dir.join(&self.log_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_env() {
        unsafe {
            std::env::remove_var("ETL_WORKING_DIR");
            std::env::remove_var("ETL_OUTPUT_FILE");
            std::env::remove_var("ETL_LOG_FILE");
            std::env::remove_var("ETL_CSV_HEADERS");
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_defaults() {
        clear_env();

        let config = EtlConfig::from_env().unwrap();
        assert_eq!(config, EtlConfig::default());
        assert_eq!(config.output_path(), Path::new("./transformed_data.csv"));
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("ETL_WORKING_DIR", "/data/incoming");
            std::env::set_var("ETL_OUTPUT_FILE", "metric.csv");
            std::env::set_var("ETL_LOG_FILE", "/var/log/etl.txt");
            std::env::set_var("ETL_CSV_HEADERS", "False");
        }

        let config = EtlConfig::from_env().unwrap();
        assert_eq!(config.output_path(), Path::new("/data/incoming/metric.csv"));
        assert_eq!(config.log_path(), Path::new("/var/log/etl.txt"));
        assert!(!config.csv_headers);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_from_env_invalid_headers() {
        clear_env();
        unsafe {
            std::env::set_var("ETL_CSV_HEADERS", "sometimes");
        }

        let result = EtlConfig::from_env();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid ETL_CSV_HEADERS")
        );

        clear_env();
    }

    #[test]
    fn test_absolute_paths_ignore_working_dir() {
        let config = EtlConfig {
            output_file: PathBuf::from("/srv/out/metric.csv"),
            log_file: PathBuf::from("logs/etl.txt"),
            ..EtlConfig::in_dir("/data")
        };
        assert_eq!(config.output_path(), Path::new("/srv/out/metric.csv"));
        assert_eq!(config.log_path(), Path::new("/data/logs/etl.txt"));
    }
}
