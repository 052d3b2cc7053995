use rover_bt::{unicode_tree, Condition, Node, NodeStatus, Sequence, Tree};
use rover_core::{Blackboard, TickContext};

#[test]
fn printer_shows_names_and_status_glyphs() {
    let yes = Condition::new("battery-ok", |_ctx: &TickContext, _bb: &Blackboard| true);
    let no = Condition::new("docked", |_ctx: &TickContext, _bb: &Blackboard| false);
    let root = Sequence::new(
        "preflight",
        false,
        vec![
            Box::new(yes) as Box<dyn Node>,
            Box::new(no) as Box<dyn Node>,
        ],
    );
    let mut tree = Tree::new(Box::new(root));

    // Before the first tick everything renders as invalid.
    let rendered = unicode_tree(tree.root());
    assert!(rendered.contains("[-] preflight"));
    assert!(rendered.contains("[-] battery-ok"));

    assert_eq!(tree.tick_once(), NodeStatus::Failure);
    let rendered = unicode_tree(tree.root());
    assert!(rendered.contains("[✗] preflight"));
    assert!(rendered.contains("    [✓] battery-ok"));
    assert!(rendered.contains("    [✗] docked"));
}
