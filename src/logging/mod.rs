//! `tracing` subscriber for the walkthrough binary.
//!
//! Events go to stdout and, unless disabled in [`LogConfig`](crate::config::LogConfig),
//! to `<log_dir>/nuscenes_sr_<timestamp>.log`, both in the [`BracketedFormatter`] layout.

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
