use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Structure representing the application configuration. Contains pathing and decode policy
/// Configs are seralizable and deserializable to YAML using serde and serde_yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub raw_path: PathBuf,
    pub output_path: PathBuf,
    pub spill_path: Option<PathBuf>,
    pub strict: bool,
    pub n_threads: i32,
}

impl Default for Config {
    /// Generate a new Config object. All fields will be empty/invalid
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from("None"),
            output_path: PathBuf::from("None"),
            spill_path: None,
            strict: false,
            n_threads: 1,
        }
    }
}

impl Config {
    /// Read the configuration in a YAML file
    /// Returns a Config if successful
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;

        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Collect the raw HDF5 files to process, in sorted order
    pub fn get_raw_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        if !self.raw_path.exists() {
            return Err(ConfigError::BadFilePath(self.raw_path.clone()));
        }

        let mut file_list: Vec<PathBuf> = Vec::new();
        for item in self.raw_path.read_dir()? {
            let item_path = item?.path();
            match item_path.extension() {
                Some(ext) if ext == "hdf5" || ext == "h5" => file_list.push(item_path),
                _ => (),
            }
        }

        if file_list.is_empty() {
            return Err(ConfigError::NoMatchingFiles);
        }

        file_list.sort();
        Ok(file_list)
    }

    /// Path of the candidates CSV written for a given raw file
    pub fn get_tc_output_path(&self, raw_file: &Path) -> Result<PathBuf, ConfigError> {
        Ok(self
            .get_output_directory()?
            .join(format!("{}_tc.csv", Self::get_file_stem(raw_file))))
    }

    /// Path of the activities CSV written for a given raw file
    pub fn get_ta_output_path(&self, raw_file: &Path) -> Result<PathBuf, ConfigError> {
        Ok(self
            .get_output_directory()?
            .join(format!("{}_ta.csv", Self::get_file_stem(raw_file))))
    }

    fn get_output_directory(&self) -> Result<&Path, ConfigError> {
        if !self.output_path.exists() {
            return Err(ConfigError::BadFilePath(self.output_path.clone()));
        }
        Ok(&self.output_path)
    }

    fn get_file_stem(raw_file: &Path) -> String {
        raw_file
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }

    pub fn is_n_threads_valid(&self) -> bool {
        self.n_threads >= 1
    }

    pub fn has_spill_path(&self) -> bool {
        self.spill_path.is_some()
    }
}
