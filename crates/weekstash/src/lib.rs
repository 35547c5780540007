//! `weekstash` - A local file stash grouped by week
//!
//! This library provides the core functionality for stashing files as
//! self-contained records (metadata plus data URI content) in a single
//! JSON store, grouped by week for display.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod datauri;
pub mod error;
pub mod logging;
pub mod record;
pub mod render;
pub mod store;
pub mod upload;
pub mod week;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use record::UploadRecord;
pub use store::{Store, StoreStats};
pub use upload::stash_files;
pub use week::{group_by_week, WeekKey, WeekScheme};
