use std::cell::RefCell;
use std::rc::Rc;

use rover_bt::{Condition, Node, NodeStatus, Selector, Sequence, Tree};
use rover_core::{Blackboard, TickContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Ticked(&'static str),
    Terminated(&'static str, NodeStatus),
}

#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    fn ticks(&self, name: &'static str) -> usize {
        self.0
            .borrow()
            .iter()
            .filter(|e| **e == Event::Ticked(name))
            .count()
    }

    fn terminated_with(&self, name: &'static str, status: NodeStatus) -> bool {
        self.0
            .borrow()
            .iter()
            .any(|e| *e == Event::Terminated(name, status))
    }

    fn len(&self) -> usize {
        self.0.borrow().len()
    }
}

struct Scripted {
    name: &'static str,
    script: Vec<NodeStatus>,
    cursor: usize,
    status: NodeStatus,
    journal: Journal,
}

impl Scripted {
    fn new(name: &'static str, script: Vec<NodeStatus>, journal: &Journal) -> Box<dyn Node> {
        Box::new(Self {
            name,
            script,
            cursor: 0,
            status: NodeStatus::Invalid,
            journal: journal.clone(),
        })
    }
}

impl Node for Scripted {
    fn name(&self) -> &str {
        self.name
    }

    fn status(&self) -> NodeStatus {
        self.status
    }

    fn tick(&mut self, _ctx: &TickContext, _blackboard: &mut Blackboard) -> NodeStatus {
        self.journal.0.borrow_mut().push(Event::Ticked(self.name));
        self.status = self.script[self.cursor.min(self.script.len() - 1)];
        self.cursor += 1;
        self.status
    }

    fn terminate(&mut self, new_status: NodeStatus) {
        self.journal
            .0
            .borrow_mut()
            .push(Event::Terminated(self.name, new_status));
        if new_status == NodeStatus::Invalid {
            self.cursor = 0;
        }
        self.status = new_status;
    }
}

use NodeStatus::{Failure, Running, Success};

#[test]
fn first_success_short_circuits_lower_priorities() {
    let journal = Journal::default();
    let root = Selector::new(
        "sel",
        false,
        vec![
            Scripted::new("high", vec![Success], &journal),
            Scripted::new("low", vec![Success], &journal),
        ],
    );
    let mut tree = Tree::new(Box::new(root));

    assert_eq!(tree.tick_once(), Success);
    assert_eq!(journal.ticks("high"), 1);
    assert_eq!(journal.ticks("low"), 0);
}

#[test]
fn fails_only_when_every_child_fails() {
    let journal = Journal::default();
    let root = Selector::new(
        "sel",
        false,
        vec![
            Scripted::new("a", vec![Failure], &journal),
            Scripted::new("b", vec![Failure], &journal),
        ],
    );
    let mut tree = Tree::new(Box::new(root));

    assert_eq!(tree.tick_once(), Failure);
    assert_eq!(journal.ticks("a"), 1);
    assert_eq!(journal.ticks("b"), 1);
}

#[test]
fn recovery_branch_preempts_running_branch_when_guard_turns_true() {
    let journal = Journal::default();

    // Recovery branch: guard on a blackboard flag, then a scripted wait.
    let guard = Condition::new("guard", |_ctx: &TickContext, bb: &Blackboard| {
        bb.get_or("fault", false)
    });
    let recovery = Sequence::new(
        "recovery",
        true,
        vec![
            Box::new(guard),
            Scripted::new("wait", vec![Running, Running, Success], &journal),
        ],
    );

    let root = Selector::new(
        "sel",
        false,
        vec![
            Box::new(recovery),
            Scripted::new("normal", vec![Running], &journal),
        ],
    );
    let mut tree = Tree::new(Box::new(root));

    // No fault: normal branch runs.
    assert_eq!(tree.tick_once(), Running);
    assert_eq!(journal.ticks("normal"), 1);
    assert_eq!(journal.ticks("wait"), 0);

    // Fault appears between ticks; on the very next tick the recovery
    // branch wins and the normal branch is hard-reset.
    tree.blackboard_mut().set("fault", true);
    assert_eq!(tree.tick_once(), Running);
    assert!(journal.terminated_with("normal", NodeStatus::Invalid));
    assert_eq!(journal.ticks("wait"), 1);
    assert_eq!(journal.ticks("normal"), 1);
}

#[test]
fn success_of_higher_priority_terminates_running_branch() {
    let journal = Journal::default();
    let root = Selector::new(
        "sel",
        false,
        vec![
            Scripted::new("high", vec![Failure, Success], &journal),
            Scripted::new("low", vec![Running], &journal),
        ],
    );
    let mut tree = Tree::new(Box::new(root));

    assert_eq!(tree.tick_once(), Running);
    assert_eq!(tree.tick_once(), Success);
    assert!(journal.terminated_with("low", NodeStatus::Invalid));
}

#[test]
fn memory_selector_resumes_at_running_child() {
    let journal = Journal::default();
    let root = Selector::new(
        "sel",
        true,
        vec![
            Scripted::new("a", vec![Failure], &journal),
            Scripted::new("b", vec![Running, Running, Success], &journal),
        ],
    );
    let mut tree = Tree::new(Box::new(root));

    assert_eq!(tree.tick_once(), Running);
    assert_eq!(tree.tick_once(), Running);
    assert_eq!(tree.tick_once(), Success);

    // Higher-priority `a` is not reconsidered while `b` is running.
    assert_eq!(journal.ticks("a"), 1);
    assert_eq!(journal.ticks("b"), 3);
}

#[test]
fn empty_selector_is_vacuously_failed() {
    let journal = Journal::default();
    let mut tree = Tree::new(Box::new(Selector::new("sel", false, vec![])));
    assert_eq!(tree.tick_once(), Failure);
    assert_eq!(journal.len(), 0);
}
