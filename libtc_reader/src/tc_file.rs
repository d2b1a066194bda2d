use std::path::{Path, PathBuf};

use super::constants::{FRAGMENT_HEADER_SIZE, FRAGMENT_PATH_MARKER};
use super::error::TcFileError;

/// A raw HDF5 file containing trigger-record fragments.
///
/// A simple wrapper around the hdf5-rust library. Opening walks the group
/// tree once and keeps the sorted list of dataset paths belonging to the
/// trigger-candidate stream; other fragment categories in the same file are
/// ignored. The file is only ever read.
#[derive(Debug)]
pub struct TcFile {
    file_handle: hdf5::File,
    file_path: PathBuf,
    fragment_paths: Vec<String>,
    size_bytes: u64,
}

impl TcFile {
    /// Open a raw file and enumerate its trigger-candidate fragment paths
    pub fn new(path: &Path) -> Result<Self, TcFileError> {
        if !path.exists() {
            return Err(TcFileError::BadFilePath(path.to_path_buf()));
        }
        let size_bytes = path.metadata()?.len();
        let file_handle = hdf5::File::open(path)?;

        let mut fragment_paths = Vec::new();
        Self::collect_fragment_paths(&file_handle.group("/")?, &mut fragment_paths)?;
        if fragment_paths.is_empty() {
            return Err(TcFileError::NoFragments(path.to_path_buf()));
        }
        // Trigger record groups are visited in member-name order already, but
        // the enumeration order must not depend on the HDF5 iteration order.
        fragment_paths.sort();

        Ok(Self {
            file_handle,
            file_path: path.to_path_buf(),
            fragment_paths,
            size_bytes,
        })
    }

    /// Dataset paths of the trigger-candidate fragments, in enumeration order
    pub fn fragment_paths(&self) -> &[String] {
        &self.fragment_paths
    }

    pub fn get_size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn get_filename(&self) -> &Path {
        &self.file_path
    }

    /// Read one fragment payload, the bytes past the fragment header.
    ///
    /// A dataset no longer than the fragment header carries no payload and
    /// is returned as an empty buffer.
    pub fn read_fragment(&self, fragment_path: &str) -> Result<Vec<u8>, TcFileError> {
        let dataset = self.file_handle.dataset(fragment_path)?;
        let raw: Vec<u8> = dataset.read_raw()?;
        if raw.len() <= FRAGMENT_HEADER_SIZE {
            return Ok(Vec::new());
        }
        Ok(raw[FRAGMENT_HEADER_SIZE..].to_vec())
    }

    /// Recursively gather dataset paths containing the trigger-candidate marker
    fn collect_fragment_paths(
        group: &hdf5::Group,
        paths: &mut Vec<String>,
    ) -> Result<(), TcFileError> {
        for name in group.member_names()? {
            if let Ok(subgroup) = group.group(&name) {
                Self::collect_fragment_paths(&subgroup, paths)?;
            } else if let Ok(dataset) = group.dataset(&name) {
                let dataset_path = dataset.name();
                if dataset_path.contains(FRAGMENT_PATH_MARKER) {
                    paths.push(dataset_path);
                }
            }
        }
        Ok(())
    }
}
