use std::fmt::Display;
use serde::Serialize;
use crate::periphery::PeripheralBlock;

/// Split of a total into readout, accumulation, the rest, and the transposed (backprop) path
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct Breakdown {
    pub adc: f64,
    pub accum: f64,
    pub other: f64,
    pub ag: f64,
}

impl Breakdown {
    pub fn total(&self) -> f64 {
        self.adc + self.accum + self.other + self.ag
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateWarning {
    /// Blocks do not fit the bounding box, usually a wide decoder beside a narrow array
    NegativeEmptyArea { empty_area: f64 },
}

impl Display for EstimateWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeEmptyArea { empty_area } => write!(f, "negative empty area '{:.4e}'", empty_area),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AreaResult {
    pub height: f64,
    pub width: f64,
    /// Bounding box, `height * width`
    pub area: f64,
    pub area_array: f64,
    /// Array plus every instantiated block
    pub used_area: f64,
    pub empty_area: f64,
    pub breakdown: Breakdown,
    pub warnings: Vec<EstimateWarning>,
    /// Instantiated blocks with their final sizes
    pub blocks: Vec<PeripheralBlock>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LatencyResult {
    pub read_latency: f64,
    pub write_latency: f64,
    pub write_latency_array: f64,
    /// Transposed read for backpropagation, 0 without training
    pub read_latency_ag: f64,
    /// Bit line settling over all muxed columns, before pulse amortization
    pub col_delay: f64,
    pub breakdown: Breakdown,
    pub blocks: Vec<PeripheralBlock>,
}
