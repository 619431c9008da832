//! # SGraph Graphs
//!
//! Sales aggregation and hierarchy graph construction for employee
//! performance reporting.
//!
//! This crate loads the sales table, computes per-row and per-scope
//! financial metrics, builds the CNF → Super → Distributor → RSM → ASM →
//! Employee graph and renders it as DOT, JSON, Markdown or a PNG report
//! card.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod hierarchy;
pub mod loader;
pub mod manager;
pub mod traits;
pub mod utils;

// Renderers
pub mod dot;
pub mod json;
pub mod markdown;
pub mod report_card;

pub use aggregator::*;
pub use dot::*;
pub use hierarchy::*;
pub use json::*;
pub use loader::*;
pub use manager::*;
pub use markdown::*;
pub use report_card::*;
pub use traits::*;
pub use utils::*;
