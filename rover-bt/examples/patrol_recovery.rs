//! Mobile-robot patrol with wheel-fault recovery.
//!
//! A task queue of locations is worked off by a repeat-until-exhausted
//! loop; navigation sits behind a priority selector whose first branch is
//! the recovery subtree. The drive action stalls once at a scheduled tick,
//! raises the fault flag, and keeps reporting `Running`; an operator model
//! in the driving loop clears the flag two ticks later.
//!
//! Run with `RUST_LOG=debug` to see the engine's status transitions.

use std::collections::VecDeque;

use rover_bt::{
    clear_fault, raise_fault, recovery_subtree, unicode_tree, with_recovery, ActionFn, Condition,
    Node, NodeStatus, Parallel, ParallelPolicy, Repeat, Selector, Sequence, Tree, TreeError,
};
use rover_core::{Blackboard, TickContext};

const WHEEL_FAULT: &str = "wheel_fault";
const AT_DESTINATION: &str = "at_destination";
const LOCATION_QUEUE: &str = "location_queue";
const CURRENT_LOCATION: &str = "current_location";

/// Drive toward the current location: three ticks of travel, with one
/// scheduled stall. The stall is a signal (flag + `Running`), never a
/// `Failure`; a `Failure` here would end the whole patrol instead of
/// deferring to the recovery branch.
struct GoToLoc {
    stall_at_tick: u64,
    stalled_once: bool,
    progress: u32,
    status: NodeStatus,
}

impl GoToLoc {
    fn new(stall_at_tick: u64) -> Self {
        Self {
            stall_at_tick,
            stalled_once: false,
            progress: 0,
            status: NodeStatus::Invalid,
        }
    }
}

impl Node for GoToLoc {
    fn name(&self) -> &str {
        "go-to-loc"
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, ctx: &TickContext, blackboard: &mut Blackboard) -> NodeStatus {
        if !self.stalled_once && ctx.tick >= self.stall_at_tick {
            self.stalled_once = true;
            raise_fault(blackboard, ctx, WHEEL_FAULT);
            self.status = NodeStatus::Running;
            return self.status;
        }

        self.progress += 1;
        self.status = if self.progress >= 3 {
            blackboard.set(AT_DESTINATION, true);
            self.progress = 0;
            NodeStatus::Success
        } else {
            NodeStatus::Running
        };
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        if new_status == NodeStatus::Invalid {
            self.progress = 0;
        }
        self.status = new_status;
    }
}

fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut bb = Blackboard::new();
    bb.set(LOCATION_QUEUE, VecDeque::from(["site-a", "site-b"]));

    let get_loc = ActionFn::new("get-loc", |_ctx: &TickContext, bb: &mut Blackboard| {
        let queue = bb
            .get_mut::<VecDeque<&'static str>>(LOCATION_QUEUE)
            .expect("queue seeded at startup");
        match queue.pop_front() {
            Some(target) => {
                bb.set(CURRENT_LOCATION, target);
                bb.set(AT_DESTINATION, false);
                println!(">>> new target: {target}");
                NodeStatus::Success
            }
            // Structural exhaustion: the one Failure that is allowed to
            // reach the root and end the mission.
            None => NodeStatus::Failure,
        }
    });

    let at_loc = Condition::new("at-loc", |_ctx: &TickContext, bb: &Blackboard| {
        bb.get_or(AT_DESTINATION, false)
    });
    let loc_selector = Selector::new(
        "loc-selector",
        false,
        vec![Box::new(at_loc), Box::new(GoToLoc::new(4))],
    );
    let nav = with_recovery(
        "nav",
        recovery_subtree("recovery", WHEEL_FAULT),
        Box::new(loc_selector),
    );

    let found_apple = Condition::new("found-apple", |_ctx: &TickContext, _bb: &Blackboard| true);
    let found_orange = Condition::new("found-orange", |_ctx: &TickContext, _bb: &Blackboard| true);
    let work = Parallel::new(
        "work",
        ParallelPolicy::SuccessOnAll,
        vec![
            Box::new(found_apple) as Box<dyn Node>,
            Box::new(found_orange) as Box<dyn Node>,
        ],
    )?;

    let mission = Sequence::new(
        "mission",
        true,
        vec![Box::new(get_loc), nav, Box::new(work)],
    );
    let root = Repeat::new("patrol", -1, Box::new(mission))?;

    let mut tree = Tree::with_blackboard(Box::new(root), bb);

    let mut faulted_for = 0u32;
    for _ in 0..60 {
        let status = tree.tick_once();
        println!("--- tick {} ---", tree.ticks() - 1);
        print!("{}", unicode_tree(tree.root()));

        if status.is_terminal() {
            println!(">>> patrol over: {status:?}");
            break;
        }

        // Operator model: notice the stall, clear it two ticks later.
        if tree.blackboard().get_or(WHEEL_FAULT, false) {
            faulted_for += 1;
            if faulted_for >= 2 {
                let ctx = TickContext::new(tree.ticks(), 0.1);
                clear_fault(tree.blackboard_mut(), &ctx, WHEEL_FAULT);
                faulted_for = 0;
            }
        } else {
            faulted_for = 0;
        }
    }

    Ok(())
}
