//! Hong Kong MPF fund comparison with an AI advisor.
//!
//! The crate has three layers:
//! - [`catalog`]: the embedded, read-only MPF fund table;
//! - [`ai`]: the Moonshot chat transport that turns a user question plus
//!   the catalog into a free-form advisor reply;
//! - [`extract`]: the scenario extraction engine that recovers structured
//!   portfolio scenarios from that reply for chart and table rendering.
//!
//! Extraction is pure and infallible; all I/O and error handling live in
//! the transport layer.

pub mod ai;
pub mod catalog;
pub mod extract;
pub mod models;

pub use extract::{extract_scenarios, ExtractionResult, Scenario, ScenarioAllocation};
pub use models::{MpfFund, TrusteeStats};
