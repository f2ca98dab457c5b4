#![deny(warnings, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod observability;
pub mod platform;
pub mod report;
pub mod stats;
pub(crate) mod util;

pub use error::StatsError;
