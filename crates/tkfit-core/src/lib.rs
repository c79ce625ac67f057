//! TKFIT-Core: Foundation types for basketball telemetry
//!
//! Player roles, per-second samples, series containers and CSV export.

pub mod error;
pub mod export;
pub mod role;
pub mod series;

pub use error::{TkfitError, TkfitResult};
pub use export::{export_filename, read_samples, to_csv_bytes, write_to_dir, write_to_path};
pub use role::*;
pub use series::*;
