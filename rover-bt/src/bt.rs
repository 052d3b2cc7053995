use rover_core::{Blackboard, TickContext};

/// Outcome signal reported by a node for one evaluation cycle.
///
/// Statuses are compared only for equality; there is no ordering between
/// them. `Invalid` is the uninitialized/reset state: every node reports it
/// before its first tick and again after a hard reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Invalid,
    Running,
    Success,
    Failure,
}

impl NodeStatus {
    /// `Success` or `Failure`; the signals that settle a node for this run.
    pub fn is_terminal(self) -> bool {
        matches!(self, NodeStatus::Success | NodeStatus::Failure)
    }
}

/// The base unit of behavior: one evaluation per cycle, status out.
///
/// Contract:
/// - `tick` must not block. Work that cannot complete within one cycle
///   returns [`NodeStatus::Running`] and resumes from retained state on a
///   later tick; no node sleeps or waits synchronously.
/// - Side effects are limited to the node's own fields and its blackboard
///   keys.
/// - A node whose last report was `Running` is either ticked again or
///   receives [`Node::terminate`] before anyone treats it as settled.
/// - `terminate(new_status)` notifies the node that its run ended from the
///   outside so it can release resources and reset counters. `new_status`
///   is [`NodeStatus::Invalid`] when the termination is a hard reset
///   (preemption) rather than a natural `Success`/`Failure`. Composite
///   nodes cascade the reset to their running descendants.
pub trait Node: 'static {
    /// Display name, diagnostic only.
    fn name(&self) -> &str;

    /// Last reported status; `Invalid` until first ticked.
    fn status(&self) -> NodeStatus;

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus;

    fn terminate(&mut self, new_status: NodeStatus) {
        let _ = new_status;
    }

    /// Visit direct children, in declared order. Diagnostic traversal for
    /// tree printing; leaves keep the default empty body.
    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Node)) {
        let _ = f;
    }
}
