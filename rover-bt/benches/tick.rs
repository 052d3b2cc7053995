use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rover_bt::{Condition, Node, Sequence, Tree};
use rover_core::{Blackboard, TickContext};

fn bench_bt_tick(c: &mut Criterion) {
    let conditions = (0..32)
        .map(|i| {
            Box::new(Condition::new(
                format!("c{i}"),
                |_ctx: &TickContext, _bb: &Blackboard| true,
            )) as Box<dyn Node>
        })
        .collect::<Vec<_>>();

    let root = Sequence::new("root", false, conditions);
    let mut tree = Tree::new(Box::new(root));

    c.bench_function("rover-bt/tick(conditions=32)", |b| {
        b.iter(|| {
            black_box(tree.tick_once());
        })
    });
}

criterion_group!(benches, bench_bt_tick);
criterion_main!(benches);
