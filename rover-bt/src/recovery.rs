//! Fault-recovery composition.
//!
//! Transient operational faults (a stalled wheel, a jammed gripper) are
//! not exceptions and are not `Failure`s. They are *signals*: the faulting
//! action sets a blackboard flag, keeps reporting `Running`, and a
//! priority-first recovery branch intercepts the flag on the next tick.
//!
//! The pattern is a composition rule, not a node type:
//!
//! ```text
//! Selector (memory=false)
//! ├── Sequence (memory=true)          <- recovery branch, FIRST child
//! │   ├── Condition: fault flag set?  <- Success only while faulted
//! │   └── WaitForClear                <- Running until the flag clears
//! └── normal task branch(es)
//! ```
//!
//! While the flag is unset the guard fails and the selector falls through
//! to the normal branches at zero cost. The moment the flag is raised the
//! guard succeeds, the recovery branch out-ranks whatever was running, and
//! the pre-empted branch receives `terminate(Invalid)` that same tick.
//! When the fault clears, the recovery branch succeeds once, the guard
//! fails again on the following tick, and normal work resumes.
//!
//! Two rules make this sound:
//!
//! - A faulting action must report `Running`, never `Failure`, while its
//!   fault is active. A `Failure` would short-circuit the enclosing
//!   `Sequence` and collapse the whole ancestor chain; `Running` merely
//!   leaves the branch out-ranked until recovery completes.
//! - Only structural exhaustion (the task-acquisition node finding no
//!   more work) reports a terminal `Failure` that reaches the root. That
//!   is the normal end of the mission, not an error.
//!
//! # Why not a state machine?
//!
//! The equivalent flat FSM needs an explicit fault transition out of every
//! state that can fault, plus a matching resume transition back, and the
//! transition table grows multiplicatively as states are added. Variants
//! that signal faults by raising from lifecycle hooks and catching at a
//! top-level handler recover the wiring cost but lose inspectability: the
//! fault path bypasses the machine entirely, so no state records that
//! recovery is in progress. Here the recovery branch is an ordinary
//! subtree. It is visible in the tree printout, testable by ticking, and
//! composable: nesting another selector adds another priority level
//! without touching existing branches.

use rover_core::Blackboard;
use rover_core::TickContext;
use rover_tools::{emit as trace_emit, TraceEvent};

use crate::bt::{Node, NodeStatus};
use crate::nodes::{Condition, Selector, Sequence};

/// Set a fault flag. Call this from the faulting action, which then
/// reports `Running` until the flag is cleared.
pub fn raise_fault(blackboard: &mut Blackboard, ctx: &TickContext, flag_key: &'static str) {
    blackboard.set(flag_key, true);
    tracing::warn!(tick = ctx.tick, flag = flag_key, "fault raised");
    trace_emit(blackboard, TraceEvent::new(ctx.tick, "bt.fault.raised"));
}

/// Clear a fault flag; typically called by an operator or driver between
/// ticks via the engine's blackboard access.
pub fn clear_fault(blackboard: &mut Blackboard, ctx: &TickContext, flag_key: &'static str) {
    blackboard.set(flag_key, false);
    tracing::info!(tick = ctx.tick, flag = flag_key, "fault cleared");
    trace_emit(blackboard, TraceEvent::new(ctx.tick, "bt.fault.cleared"));
}

/// Condition leaf guarding a recovery branch: `Success` while `flag_key`
/// is set, `Failure` otherwise. A missing flag key reads as no fault.
pub fn fault_guard(name: impl Into<String>, flag_key: &'static str) -> impl Node {
    Condition::new(name, move |_ctx: &TickContext, bb: &Blackboard| {
        bb.get_or(flag_key, false)
    })
}

/// Blocks progress until a fault flag is cleared: `Running` while the flag
/// is set, `Success` once it reads false. The clearing itself is external
/// work (operator input, a watchdog), serialized onto the blackboard
/// between ticks.
pub struct WaitForClear {
    name: String,
    flag_key: &'static str,
    status: NodeStatus,
}

impl WaitForClear {
    pub fn new(name: impl Into<String>, flag_key: &'static str) -> Self {
        Self {
            name: name.into(),
            flag_key,
            status: NodeStatus::Invalid,
        }
    }
}

impl Node for WaitForClear {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, _ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        self.status = if blackboard.get_or(self.flag_key, false) {
            NodeStatus::Running
        } else {
            NodeStatus::Success
        };
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        self.status = new_status;
    }
}

/// The recovery branch itself: guard followed by wait, under a
/// memory=true sequence so the guard is not re-polled while the wait is
/// already in progress.
pub fn recovery_subtree(name: impl Into<String>, flag_key: &'static str) -> Box<dyn Node> {
    let name = name.into();
    let guard = fault_guard(format!("{name}/guard"), flag_key);
    let wait = WaitForClear::new(format!("{name}/wait"), flag_key);
    Box::new(Sequence::new(
        name,
        true,
        vec![Box::new(guard), Box::new(wait)],
    ))
}

/// Place a recovery branch ahead of a normal branch under a memory=false
/// selector, so the recovery branch regains priority on the tick its
/// guard condition turns true.
pub fn with_recovery(
    name: impl Into<String>,
    recovery: Box<dyn Node>,
    normal: Box<dyn Node>,
) -> Box<dyn Node> {
    Box::new(Selector::new(name, false, vec![recovery, normal]))
}
