//! # SGraph Commands
//!
//! Command implementations behind the `sgraph` command line.
//!
//! Each command receives the shared [`Data`] for one invocation and returns
//! a [`CommandOutput`] for the front end to print.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod about;
pub mod config;
pub mod framework;
pub mod graph;
pub mod list;
pub mod report;
pub mod summary;

pub use framework::*;
pub use graph::GraphFormat;
