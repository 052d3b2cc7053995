//! Rotate in place until a person is confirmed in view.
//!
//! A sensor producer and a rotate placeholder both run forever under a
//! `Parallel`; only the confirmation branch is in the success subset, so
//! the aggregate settles the moment the confirmation streak reaches the
//! blackboard-configured limit.

use rover_bt::{
    unicode_tree, ActionFn, AlwaysRunning, Node, NodeStatus, Parallel, ParallelPolicy, Sequence,
    Tree, TreeError,
};
use rover_core::{Blackboard, TickContext};

const PERSON_VISIBLE: &str = "person_visible";
const TARGET_LIMIT: &str = "target_limit";

fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut bb = Blackboard::new();
    // The task metric lives on the blackboard; the tree never changes.
    bb.set(TARGET_LIMIT, 3u32);

    let mut seen_ticks = 0u64;
    let sensor = ActionFn::new("sensor", move |_ctx: &TickContext, bb: &mut Blackboard| {
        seen_ticks += 1;
        let visible = seen_ticks >= 3;
        bb.set(PERSON_VISIBLE, visible);
        println!("[sensor] {}", if visible { "person in view" } else { "nothing" });
        NodeStatus::Running
    });

    let mut streak = 0u32;
    let trigger = ActionFn::new("trigger", move |_ctx: &TickContext, bb: &mut Blackboard| {
        let limit = bb.get_or(TARGET_LIMIT, 5u32);
        if bb.get_or(PERSON_VISIBLE, false) {
            streak += 1;
            println!("[trigger] streak {streak}/{limit}");
            if streak >= limit {
                return NodeStatus::Success;
            }
        } else {
            streak = 0;
        }
        NodeStatus::Running
    });

    let confirm = Sequence::new("confirm", false, vec![Box::new(trigger) as Box<dyn Node>]);
    let root = Parallel::new(
        "rotate-until-confirmed",
        ParallelPolicy::SuccessOnSelected(vec![2]),
        vec![
            Box::new(sensor) as Box<dyn Node>,
            Box::new(AlwaysRunning::new("rotate")),
            Box::new(confirm),
        ],
    )?;

    let mut tree = Tree::with_blackboard(Box::new(root), bb);
    for _ in 0..20 {
        let status = tree.tick_once();
        println!("--- tick {} ---", tree.ticks() - 1);
        print!("{}", unicode_tree(tree.root()));
        if status == NodeStatus::Success {
            println!(">>> confirmed after {} ticks", tree.ticks());
            break;
        }
    }

    Ok(())
}
