//! Fetching and output for the cost-of-living calculator.
//!
//! [`pipeline::run`] drives the whole scrape: harvest the metro list, post
//! one comparison per metro, extract the result tables, and write the two
//! CSV files once every metro has been processed.

pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;

pub use client::{Calculator, ComputeForm, HttpCalculator};
pub use config::{CalculatorConfig, FailurePolicy, RunOptions};
pub use error::AcquireError;
pub use pipeline::{run, MetroFailure, RunSummary};
