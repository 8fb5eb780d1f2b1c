//! pulse-core — query & aggregation pipeline behind the mobile-payments
//! pulse dashboard.
//!
//! The pipeline is three sequential stages per user selection:
//!   1. parameter discovery   (periods that actually exist in the data)
//!   2. case-specific aggregation over the source tables
//!   3. derived-metric post-processing (growth %, top-N, pivot)
//! Rendering and the UI shell are external collaborators fed through the
//! presentation boundary in `render`.
//!
//! RULE: Only store.rs talks to the database.

pub mod cases;
pub mod config;
pub mod error;
pub mod frame;
pub mod geo;
pub mod growth;
pub mod period;
pub mod queries;
pub mod render;
pub mod store;
pub mod types;
