//! Tooling primitives for the rover control runtime.
//!
//! This crate is intentionally lightweight and driver-agnostic. Higher-level
//! integrations (log shipping, inspectors, plotting) should live in
//! dedicated adapter crates.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod trace;

pub use trace::{emit, TraceEvent, TraceLog, TraceSink, TRACE_LOG, TRACE_SINK};
