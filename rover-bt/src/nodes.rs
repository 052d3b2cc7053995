//! Composite, decorator, and leaf adapter nodes.
//!
//! Composites tick their children in declared order every time; that order
//! is load-bearing for short-circuit and priority semantics. A child that
//! reports `Invalid` from `tick` has violated the node contract; composites
//! treat it as `Failure` so the aggregation rules stay total without
//! wedging the tree on a broken leaf.

use rover_core::{Blackboard, TickContext};
use rover_tools::{emit as trace_emit, TraceEvent};

use crate::bt::{Node, NodeStatus};
use crate::error::TreeError;

/// Terminate the previously running child when this tick's result moved on
/// without it. `keep` is the child that is still running (if any); `cause`
/// is the child whose result decided the tick. A child that settled
/// naturally (`prev == cause`) is not re-notified.
fn swap_running(
    children: &mut [Box<dyn Node>],
    running: &mut Option<usize>,
    keep: Option<usize>,
    cause: usize,
    ctx: &TickContext,
    blackboard: &mut Blackboard,
) {
    if let Some(prev) = running.take() {
        if Some(prev) != keep && prev != cause {
            children[prev].terminate(NodeStatus::Invalid);
            trace_emit(
                blackboard,
                TraceEvent::new(ctx.tick, "bt.preempt")
                    .with_a(prev as u64)
                    .with_b(cause as u64),
            );
        }
    }
    *running = keep;
}

fn terminate_children(children: &mut [Box<dyn Node>]) {
    for child in children.iter_mut() {
        if child.status() != NodeStatus::Invalid {
            child.terminate(NodeStatus::Invalid);
        }
    }
}

/// Ticks children left-to-right; fails fast on the first `Failure`,
/// reports `Running` on the first `Running`, succeeds only when every
/// child succeeded in the current pass.
///
/// The `memory` flag is fixed at construction. With `memory=true` the next
/// tick resumes at the child that reported `Running`; already-succeeded
/// earlier children are not re-evaluated, preserving their side effects.
/// With `memory=false` every tick re-scans from child 0, so an earlier
/// child turning `Failure`/`Running` pre-empts a later running child,
/// which receives `terminate(Invalid)` that same tick.
pub struct Sequence {
    name: String,
    memory: bool,
    children: Vec<Box<dyn Node>>,
    current: usize,
    running: Option<usize>,
    status: NodeStatus,
}

impl Sequence {
    pub fn new(name: impl Into<String>, memory: bool, children: Vec<Box<dyn Node>>) -> Self {
        Self {
            name: name.into(),
            memory,
            children,
            current: 0,
            running: None,
            status: NodeStatus::Invalid,
        }
    }
}

impl Node for Sequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let start = if self.memory { self.current } else { 0 };
        let mut i = start;
        while i < self.children.len() {
            match self.children[i].tick(ctx, blackboard) {
                NodeStatus::Running => {
                    swap_running(
                        &mut self.children,
                        &mut self.running,
                        Some(i),
                        i,
                        ctx,
                        blackboard,
                    );
                    self.current = i;
                    self.status = NodeStatus::Running;
                    return self.status;
                }
                NodeStatus::Failure | NodeStatus::Invalid => {
                    swap_running(&mut self.children, &mut self.running, None, i, ctx, blackboard);
                    self.current = 0;
                    self.status = NodeStatus::Failure;
                    return self.status;
                }
                NodeStatus::Success => {
                    if self.running == Some(i) {
                        self.running = None;
                    }
                    i += 1;
                }
            }
        }

        self.running = None;
        self.current = 0;
        self.status = NodeStatus::Success;
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        terminate_children(&mut self.children);
        self.current = 0;
        self.running = None;
        self.status = new_status;
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Node)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// Priority selector: ticks children left-to-right, reports the first
/// `Success` or `Running` immediately, and moves on only past `Failure`.
/// Fails only when every child failed.
///
/// With `memory=false` every tick restarts at child 0. That re-scan is the
/// pre-emption mechanism: the moment a higher-priority branch stops
/// failing, it wins the tick and the previously running lower-priority
/// branch receives `terminate(Invalid)`. With `memory=true` the selector
/// resumes at the running child without reconsidering higher priorities.
pub struct Selector {
    name: String,
    memory: bool,
    children: Vec<Box<dyn Node>>,
    current: usize,
    running: Option<usize>,
    status: NodeStatus,
}

impl Selector {
    pub fn new(name: impl Into<String>, memory: bool, children: Vec<Box<dyn Node>>) -> Self {
        Self {
            name: name.into(),
            memory,
            children,
            current: 0,
            running: None,
            status: NodeStatus::Invalid,
        }
    }
}

impl Node for Selector {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        let start = if self.memory { self.current } else { 0 };
        let mut i = start;
        while i < self.children.len() {
            match self.children[i].tick(ctx, blackboard) {
                NodeStatus::Success => {
                    swap_running(&mut self.children, &mut self.running, None, i, ctx, blackboard);
                    self.current = 0;
                    self.status = NodeStatus::Success;
                    return self.status;
                }
                NodeStatus::Running => {
                    swap_running(
                        &mut self.children,
                        &mut self.running,
                        Some(i),
                        i,
                        ctx,
                        blackboard,
                    );
                    self.current = i;
                    self.status = NodeStatus::Running;
                    return self.status;
                }
                NodeStatus::Failure | NodeStatus::Invalid => {
                    if self.running == Some(i) {
                        self.running = None;
                    }
                    i += 1;
                }
            }
        }

        self.running = None;
        self.current = 0;
        self.status = NodeStatus::Failure;
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        terminate_children(&mut self.children);
        self.current = 0;
        self.running = None;
        self.status = new_status;
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Node)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// How a [`Parallel`] combines child statuses into its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParallelPolicy {
    /// Fails fast on any child `Failure`; succeeds only once every child
    /// reported `Success` this cycle.
    SuccessOnAll,
    /// Succeeds fast on any child `Success`; fails only when every child
    /// failed; otherwise `Running`.
    SuccessOnOne,
    /// Succeeds once every child at the named indices most recently
    /// reported `Success`. Failures outside the subset do not fail the
    /// parent; membership, not order, determines the contract.
    SuccessOnSelected(Vec<usize>),
}

/// Ticks every child exactly once per cycle, in declared order, before
/// finalizing its own status. Producer children (sensors writing the
/// blackboard) therefore always run, even on the cycle where the policy's
/// outcome is already determined. When the aggregate settles, children
/// still running receive `terminate(Invalid)` and are not ticked again.
pub struct Parallel {
    name: String,
    policy: ParallelPolicy,
    children: Vec<Box<dyn Node>>,
    statuses: Vec<NodeStatus>,
    status: NodeStatus,
}

impl std::fmt::Debug for Parallel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parallel")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field(
                "children",
                &self.children.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("statuses", &self.statuses)
            .field("status", &self.status)
            .finish()
    }
}

impl Parallel {
    /// Validates the policy against the declared children; a malformed
    /// subset is a construction error, never a runtime status.
    pub fn new(
        name: impl Into<String>,
        policy: ParallelPolicy,
        children: Vec<Box<dyn Node>>,
    ) -> Result<Self, TreeError> {
        let name = name.into();
        if children.is_empty() {
            return Err(TreeError::NoChildren { name });
        }
        if let ParallelPolicy::SuccessOnSelected(subset) = &policy {
            if subset.is_empty() {
                return Err(TreeError::EmptySubset { name });
            }
            let mut seen = vec![false; children.len()];
            for &index in subset {
                if index >= children.len() {
                    return Err(TreeError::SubsetOutOfRange {
                        name,
                        index,
                        len: children.len(),
                    });
                }
                if seen[index] {
                    return Err(TreeError::DuplicateSubsetEntry { name, index });
                }
                seen[index] = true;
            }
        }
        let statuses = vec![NodeStatus::Invalid; children.len()];
        Ok(Self {
            name,
            policy,
            children,
            statuses,
            status: NodeStatus::Invalid,
        })
    }

    fn halt_running_children(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) {
        for i in 0..self.children.len() {
            if self.statuses[i] == NodeStatus::Running {
                self.children[i].terminate(NodeStatus::Invalid);
                self.statuses[i] = NodeStatus::Invalid;
                trace_emit(
                    blackboard,
                    TraceEvent::new(ctx.tick, "bt.parallel.halt").with_a(i as u64),
                );
            }
        }
    }
}

impl Node for Parallel {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        for i in 0..self.children.len() {
            self.statuses[i] = match self.children[i].tick(ctx, blackboard) {
                NodeStatus::Invalid => NodeStatus::Failure,
                status => status,
            };
        }

        let aggregate = match &self.policy {
            ParallelPolicy::SuccessOnAll => {
                if self.statuses.contains(&NodeStatus::Failure) {
                    NodeStatus::Failure
                } else if self.statuses.iter().all(|&s| s == NodeStatus::Success) {
                    NodeStatus::Success
                } else {
                    NodeStatus::Running
                }
            }
            ParallelPolicy::SuccessOnOne => {
                if self.statuses.contains(&NodeStatus::Success) {
                    NodeStatus::Success
                } else if self.statuses.iter().all(|&s| s == NodeStatus::Failure) {
                    NodeStatus::Failure
                } else {
                    NodeStatus::Running
                }
            }
            ParallelPolicy::SuccessOnSelected(subset) => {
                if subset.iter().all(|&i| self.statuses[i] == NodeStatus::Success) {
                    NodeStatus::Success
                } else {
                    NodeStatus::Running
                }
            }
        };

        if aggregate.is_terminal() {
            self.halt_running_children(ctx, blackboard);
        }
        self.status = aggregate;
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        terminate_children(&mut self.children);
        self.statuses.fill(NodeStatus::Invalid);
        self.status = new_status;
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Node)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }
}

/// Repeats its child until a success budget is spent or the child fails.
///
/// `num_success = -1` repeats unboundedly; it then only settles when the
/// child reports `Failure`, which is how an exhausted upstream resource
/// (an empty task queue, say) terminates the whole tree. A bounded repeat
/// resets the child via `terminate(Invalid)` after each success and keeps
/// the parent tree alive with `Running` until the budget is reached; it
/// then reports `Success` once and stops re-invoking the child.
pub struct Repeat {
    name: String,
    num_success: i32,
    successes: u32,
    child: Box<dyn Node>,
    status: NodeStatus,
}

impl std::fmt::Debug for Repeat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repeat")
            .field("name", &self.name)
            .field("num_success", &self.num_success)
            .field("successes", &self.successes)
            .field("child", &self.child.name())
            .field("status", &self.status)
            .finish()
    }
}

impl Repeat {
    pub fn new(
        name: impl Into<String>,
        num_success: i32,
        child: Box<dyn Node>,
    ) -> Result<Self, TreeError> {
        let name = name.into();
        if num_success != -1 && num_success < 1 {
            return Err(TreeError::BadRepeatCount { name, num_success });
        }
        Ok(Self {
            name,
            num_success,
            successes: 0,
            child,
            status: NodeStatus::Invalid,
        })
    }
}

impl Node for Repeat {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        self.status = match self.child.tick(ctx, blackboard) {
            NodeStatus::Running => NodeStatus::Running,
            NodeStatus::Failure | NodeStatus::Invalid => NodeStatus::Failure,
            NodeStatus::Success => {
                self.successes = self.successes.saturating_add(1);
                if self.num_success >= 0 && self.successes >= self.num_success as u32 {
                    NodeStatus::Success
                } else {
                    trace_emit(
                        blackboard,
                        TraceEvent::new(ctx.tick, "bt.repeat.cycle").with_a(self.successes as u64),
                    );
                    self.child.terminate(NodeStatus::Invalid);
                    NodeStatus::Running
                }
            }
        };
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        if self.child.status() != NodeStatus::Invalid {
            self.child.terminate(NodeStatus::Invalid);
        }
        self.successes = 0;
        self.status = new_status;
    }

    fn for_each_child(&self, f: &mut dyn FnMut(&dyn Node)) {
        f(self.child.as_ref());
    }
}

/// Leaf adapter: a predicate over the blackboard, `Success` when true.
pub struct Condition<F> {
    name: String,
    cond: F,
    status: NodeStatus,
}

impl<F> Condition<F>
where
    F: FnMut(&TickContext, &Blackboard) -> bool + 'static,
{
    pub fn new(name: impl Into<String>, cond: F) -> Self {
        Self {
            name: name.into(),
            cond,
            status: NodeStatus::Invalid,
        }
    }
}

impl<F> Node for Condition<F>
where
    F: FnMut(&TickContext, &Blackboard) -> bool + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        self.status = if (self.cond)(ctx, &*blackboard) {
            NodeStatus::Success
        } else {
            NodeStatus::Failure
        };
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        self.status = new_status;
    }
}

/// Leaf adapter: an action expressed as a closure.
///
/// The closure owns whatever retained state the action needs across ticks
/// (counters, partial progress); actions with resources to release on
/// pre-emption should implement [`Node`] directly instead.
pub struct ActionFn<F> {
    name: String,
    action: F,
    status: NodeStatus,
}

impl<F> ActionFn<F>
where
    F: FnMut(&TickContext, &mut Blackboard) -> NodeStatus + 'static,
{
    pub fn new(name: impl Into<String>, action: F) -> Self {
        Self {
            name: name.into(),
            action,
            status: NodeStatus::Invalid,
        }
    }
}

impl<F> Node for ActionFn<F>
where
    F: FnMut(&TickContext, &mut Blackboard) -> NodeStatus + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        self.status = (self.action)(ctx, blackboard);
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        self.status = new_status;
    }
}

/// Placeholder actuation leaf that reports `Running` forever, for branches
/// whose real work happens elsewhere (a rotate command owned by a driver,
/// kept alive under a `Parallel` until a sibling settles the aggregate).
pub struct AlwaysRunning {
    name: String,
    status: NodeStatus,
}

impl AlwaysRunning {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: NodeStatus::Invalid,
        }
    }
}

impl Node for AlwaysRunning {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> NodeStatus {
        self.status = NodeStatus::Running;
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        self.status = new_status;
    }
}
