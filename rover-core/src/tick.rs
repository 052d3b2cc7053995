/// Per-cycle evaluation context handed to every node.
///
/// `tick` is the engine's monotonically increasing cycle counter;
/// `dt_seconds` is the nominal cadence of the driving loop. Nodes that
/// implement timeouts do so by counting ticks, not by sleeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32) -> Self {
        Self { tick, dt_seconds }
    }
}
