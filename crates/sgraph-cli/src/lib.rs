//! # SGraph CLI
//!
//! Command line front end for sales hierarchy reports.
//!
//! This is the binary crate that parses arguments, loads configuration,
//! sets up logging and dispatches to the command implementations.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::*;
pub use cli::*;
pub use error::*;
