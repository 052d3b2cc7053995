//! Deterministic, driver-agnostic kernel primitives for robot supervisory
//! control.
//!
//! This crate holds the two pieces of shared state the control runtime is
//! built on: the [`Blackboard`] data channel and the [`TickContext`] handed
//! to every node on every evaluation cycle. Control-flow semantics live in
//! `rover-bt`.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod blackboard;
pub mod tick;

pub use blackboard::Blackboard;
pub use tick::TickContext;
