use rover_core::{Blackboard, TickContext};

use crate::bt::{Node, NodeStatus};

const DEFAULT_DT_SECONDS: f32 = 0.1;

/// Owns the root node and the blackboard, and drives the evaluation cycle.
///
/// One call to [`Tree::tick_once`] is one synchronous pass over the whole
/// tree; the cadence (periodic timer, manual stepping in tests) belongs to
/// the caller. The terminal status is sticky: the engine does not reset
/// the root when it settles, so the caller can inspect the outcome and
/// decide whether to [`Tree::reset`] and go again.
pub struct Tree {
    root: Box<dyn Node>,
    blackboard: Blackboard,
    tick: u64,
    dt_seconds: f32,
    status: NodeStatus,
}

impl Tree {
    pub fn new(root: Box<dyn Node>) -> Self {
        Self::with_blackboard(root, Blackboard::new())
    }

    /// Build around a pre-seeded blackboard (task queues, configuration
    /// limits). The blackboard is shared by reference across the whole
    /// tree for the tree's lifetime.
    pub fn with_blackboard(root: Box<dyn Node>, blackboard: Blackboard) -> Self {
        Self {
            root,
            blackboard,
            tick: 0,
            dt_seconds: DEFAULT_DT_SECONDS,
            status: NodeStatus::Invalid,
        }
    }

    /// Nominal seconds per cycle, forwarded to nodes via [`TickContext`].
    pub fn with_dt_seconds(mut self, dt_seconds: f32) -> Self {
        self.dt_seconds = dt_seconds;
        self
    }

    /// Current root status without ticking; `Invalid` before the first
    /// tick.
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn blackboard(&self) -> &Blackboard {
        &self.blackboard
    }

    /// External writers (sensor callbacks, operator input) go through here
    /// between ticks; there is no locking inside a tick.
    pub fn blackboard_mut(&mut self) -> &mut Blackboard {
        &mut self.blackboard
    }

    pub fn root(&self) -> &dyn Node {
        self.root.as_ref()
    }

    /// One synchronous evaluation pass over the whole tree.
    pub fn tick_once(&mut self) -> NodeStatus {
        let ctx = TickContext::new(self.tick, self.dt_seconds);
        let status = self.root.tick(&ctx, &mut self.blackboard);
        if status != self.status {
            tracing::debug!(tick = self.tick, from = ?self.status, to = ?status, "root status changed");
        } else {
            tracing::trace!(tick = self.tick, status = ?status, "tick");
        }
        self.status = status;
        self.tick += 1;
        status
    }

    /// Tick until the root settles or `max_ticks` cycles have elapsed.
    /// Returns the latest root status either way; callers that need a hard
    /// deadline implement it as a tick-counting leaf, not here.
    pub fn run(&mut self, max_ticks: u64) -> NodeStatus {
        for _ in 0..max_ticks {
            if self.status.is_terminal() {
                break;
            }
            self.tick_once();
        }
        self.status
    }

    /// Hard reset: the root (and, through it, every descendant) receives
    /// `terminate(Invalid)`. The blackboard and tick counter are kept; a
    /// restarted tree continues the same engine lifetime.
    pub fn reset(&mut self) {
        self.root.terminate(NodeStatus::Invalid);
        self.status = NodeStatus::Invalid;
        tracing::debug!(tick = self.tick, "tree reset");
    }
}
