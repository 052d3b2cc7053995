//! Diagnostic tree printing. Non-normative debugging aid; nothing in the
//! runtime depends on its output format.

use std::fmt::Write as _;

use crate::bt::{Node, NodeStatus};

fn glyph(status: NodeStatus) -> char {
    match status {
        NodeStatus::Invalid => '-',
        NodeStatus::Running => '*',
        NodeStatus::Success => '✓',
        NodeStatus::Failure => '✗',
    }
}

/// Render the tree as an indented listing with one status glyph per node:
/// `-` invalid, `*` running, `✓` success, `✗` failure.
pub fn unicode_tree(root: &dyn Node) -> String {
    let mut out = String::new();
    render(root, 0, &mut out);
    out
}

fn render(node: &dyn Node, depth: usize, out: &mut String) {
    let _ = writeln!(
        out,
        "{:indent$}[{}] {}",
        "",
        glyph(node.status()),
        node.name(),
        indent = depth * 4
    );
    node.for_each_child(&mut |child| render(child, depth + 1, out));
}
