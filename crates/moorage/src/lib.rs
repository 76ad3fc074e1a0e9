//! `moorage` - A marina boat inventory manager
//!
//! This library provides the core functionality for tracking a marina's
//! boats: identity, size, storage location, and outstanding balance,
//! persisted to a flat comma-delimited text file between runs.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod boat;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;

pub use boat::{Boat, Place, PlaceKind};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use registry::BoatRegistry;
