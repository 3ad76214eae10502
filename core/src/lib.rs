//! shiftplan-core: greedy, priority-ordered shift auto-scheduling.
//!
//! Pipeline (fixed order, one pass):
//!   1. Requirements sorted by priority (stable).
//!   2. Candidate filter  → hard eligibility.
//!   3. Employee scorer   → 0..100 suitability.
//!   4. Assignment planner books the top N and updates the ledger.
//!   5. Metrics aggregator + recommendation generator run once at the end.

pub mod config;
pub mod conflict;
pub mod demo;
pub mod engine;
pub mod error;
pub mod event;
pub mod filter;
pub mod ledger;
pub mod metrics;
pub mod model;
pub mod planner;
pub mod recommend;
pub mod rng;
pub mod scoring;
pub mod store;
pub mod time;
pub mod types;
