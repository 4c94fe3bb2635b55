//! yearsort - organize files by creation year
//!
//! This library reorganizes a directory tree by moving (or copying) each
//! file into a subdirectory named after the file's creation year while
//! preserving its original relative path beneath that year directory.
//! Creation dates are a best-effort approximation: platforms without real
//! birth-time metadata fall back to the modification time.

pub mod cli;
pub mod file_dates;
pub mod output;
pub mod reconciler;
pub mod relocator;
pub mod remapper;
pub mod scanner;

pub use file_dates::{FsTimestamper, Timestamper, creation_year};
pub use reconciler::Reconciler;
pub use relocator::{Mode, OrganizeError, OrganizeResult, Outcome, Relocator, RunStats};
pub use remapper::{Anchor, Remapper};
pub use scanner::{ScanError, Scanner, Snapshot};

pub use cli::{Cli, run_cli, run_cli_with_timestamper};
