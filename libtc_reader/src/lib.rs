//! # tc_reader
//!
//! tc_reader is a trigger-candidate fragment reader, written in Rust. It takes
//! raw HDF5 files produced by the DAQ, locates the trigger-candidate (TC)
//! fragments inside them, decodes each fragment's stream of candidate records
//! and the trigger-activity (TA) records they aggregate, and exports the
//! result as trigger-record CSV files for the downstream matching and
//! plotting tools.
//!
//! ## Installation
//!
//! Currently the only method of install is from source, which is laid out
//! below.
//!
//! ### Rust
//!
//! If you have not used Rust before, you will most likely need to install the
//! Rust tool chain. See the [Rust docs](https://www.rust-lang.org/tools/install)
//! for installation instructions.
//!
//! ### HDF5
//!
//! Before building and running tc_reader, HDF5 must be installed. Typically
//! this will be installed using a package manager (homebrew, apt, etc), and
//! the Rust libraries will auto detect the location of the HDF install.
//! However, this is not always possible. Sometimes a newer version will need
//! to be installed to a custom location. If this is the case, write the
//! following snippet into the file `.cargo/config.toml` in the tc_reader
//! repository:
//!
//! ```toml
//! [env]
//! HDF5_DIR="/path/to/my/hdf5/install/"
//!
//! [build]
//! rustflags="-C link-args=-Wl,-rpath,/path/to/my/hdf5/install/lib"
//! ```
//!
//! Replace `/path/to/my/hdf5/install/` with the path to your HDF5
//! installation.
//!
//! ### Building & Install
//!
//! To build and install the CLI reader use `cargo install --path ./tc_reader_cli`
//! from the top level tc_reader repository.
//!
//! ## Configuration
//!
//! The YAML format of a configuration file is as follows:
//!
//! ```yml
//! raw_path: None
//! output_path: None
//! spill_path: null
//! strict: false
//! n_threads: 1
//! ```
//!
//! - `raw_path`: directory containing the raw `.hdf5`/`.h5` files to read.
//! - `output_path`: directory to which the trigger-record CSV files are
//!   written.
//! - `spill_path` (optional): CSV file with the accelerator beam-spill clock
//!   values. When set, candidate rows are tagged with the spill mode (ON when
//!   the candidate falls inside a 4.8 s extraction window, OFF otherwise).
//! - `strict`: when true, an enumerated code outside the known value set
//!   fails the fragment instead of being kept as `Unknown`.
//! - `n_threads`: number of parallel worker threads to divide the files
//!   amongst. Files are dealt round-robin; per-file results are merged back
//!   in file order, so the combined dataset does not depend on worker timing.
//!   Must be at least 1.
//!
//! A template can be generated with the `new` subcommand of the CLI.
//!
//! ## Output
//!
//! For each raw file `<stem>.hdf5`, tc_reader writes `<stem>_tc.csv` (one row
//! per trigger candidate, in decode order) and `<stem>_ta.csv` (one row per
//! trigger activity, keyed by the index of its candidate). The CLI also
//! writes a log file containing the detailed status of the run; if an error
//! occurs, typically a warning will be printed to the terminal indicating
//! that the user should check the log file.
//!
//! Operators get a per-file count of decoded candidates and activities and a
//! run summary of how many fragments were empty or failed. A fragment that
//! fails partway through decoding aborts only that fragment; everything
//! decoded before the failure is kept.
pub mod byte_cursor;
pub mod config;
pub mod constants;
pub mod csv_writer;
pub mod dataset;
pub mod error;
pub mod fragment;
pub mod process;
pub mod spill;
pub mod tc_file;
pub mod trigger_activity;
pub mod trigger_candidate;
pub mod worker_status;

#[cfg(test)]
pub(crate) mod testutil;
