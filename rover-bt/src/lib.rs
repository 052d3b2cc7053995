//! Tick-driven behavior tree runtime for robot supervisory control.
//!
//! A tree of composable control nodes is re-evaluated ("ticked") at a
//! fixed external cadence; each pass flows statuses from the leaves back
//! up to the root, and the engine's caller observes `Success`, `Failure`,
//! or `Running` there. Complex behavior such as navigation with fault
//! recovery is assembled from small reusable nodes instead of a
//! hand-written state-transition table (see the [`recovery`] module docs
//! for the comparison).
//!
//! Execution is single-threaded and cooperative: one tick is one
//! synchronous pass, no node blocks, and long-running work is expressed by
//! returning [`NodeStatus::Running`] and resuming on the next tick. The
//! blackboard (from `rover-core`) is the only shared state between nodes.
//!
//! Construction is bottom-up and fixed: children are never added or
//! removed after a node is built, and policy misconfiguration (a parallel
//! success subset naming a child that does not exist) fails at
//! construction time with a [`TreeError`], before any tick.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod display;
pub mod engine;
pub mod error;
pub mod nodes;
pub mod recovery;

pub use bt::{Node, NodeStatus};
pub use display::unicode_tree;
pub use engine::Tree;
pub use error::TreeError;
pub use nodes::{
    ActionFn, AlwaysRunning, Condition, Parallel, ParallelPolicy, Repeat, Selector, Sequence,
};
pub use recovery::{
    clear_fault, fault_guard, raise_fault, recovery_subtree, with_recovery, WaitForClear,
};
