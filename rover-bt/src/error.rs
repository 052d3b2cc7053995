use thiserror::Error;

/// Construction-time tree errors.
///
/// These surface before the first tick and prevent the tree from running
/// at all; a misconfigured policy is a programming error, not a runtime
/// `NodeStatus`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("parallel node {name:?} requires at least one child")]
    NoChildren { name: String },

    #[error("parallel node {name:?} has an empty success subset")]
    EmptySubset { name: String },

    #[error("parallel node {name:?} success subset references child {index} but only {len} children are declared")]
    SubsetOutOfRange {
        name: String,
        index: usize,
        len: usize,
    },

    #[error("parallel node {name:?} success subset references child {index} more than once")]
    DuplicateSubsetEntry { name: String, index: usize },

    #[error("repeat node {name:?} num_success must be -1 (unbounded) or >= 1, got {num_success}")]
    BadRepeatCount { name: String, num_success: i32 },
}
