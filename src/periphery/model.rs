use std::fmt::Debug;
use derive_builder::Builder;
use super::{AreaConstraint, BlockArea, BlockSizing, BlockTiming, Parasitics, STEP_RAMP};

/// Closed-form physics of a single peripheral block.
///
/// The subarray estimator only composes results, every block formula lives behind this trait.
pub trait PeripheralModel: Debug + Send + Sync {
    fn area(&self, sizing: &BlockSizing, constraint: &AreaConstraint) -> BlockArea;
    fn latency(&self, sizing: &BlockSizing, request: &LatencyRequest) -> BlockTiming;
    fn parasitics(&self, sizing: &BlockSizing) -> Parasitics;
}

/// Electrical context of one latency evaluation
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
#[builder(pattern = "owned", setter(into), default)]
pub struct LatencyRequest {
    /// Input slope, 1/s
    pub ramp_input: f64,
    /// Capacitance the block drives, F
    pub load_capacitance: f64,
    /// Resistance of the driven line, ohm
    pub load_resistance: f64,
    /// Number of read operations the latency accumulates over
    pub num_read: f64,
    /// Number of write operations the latency accumulates over
    pub num_write: f64,
}

impl Default for LatencyRequest {
    fn default() -> Self {
        Self {
            ramp_input: STEP_RAMP,
            load_capacitance: 0.0,
            load_resistance: 0.0,
            num_read: 0.0,
            num_write: 0.0,
        }
    }
}
