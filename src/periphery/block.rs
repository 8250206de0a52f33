use std::fmt::Display;
use serde::{Deserialize, Serialize};
use tracing::debug;
use super::{LatencyRequest, PeripheralModel};

/// Catalog of the peripheral circuits a subarray can instantiate
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    WlDecoder,
    WlDecoderDriver,
    WlNewDecoderDriver,
    WlSwitchMatrix,
    WlNewSwitchMatrix,
    SlSwitchMatrix,
    Mux,
    MuxDecoder,
    SarAdc,
    MultilevelSenseAmp,
    MultilevelSaEncoder,
    RowCurrentSenseAmp,
    Adder,
    Dff,
    ShiftAddInput,
    ShiftAddWeight,
}

/// Which way a block reads the array
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Forward read: rows in, columns out
    #[default]
    Forward,
    /// Transposed read for backpropagation: columns in, rows out
    Backward,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AreaModify {
    /// The block sizes its free dimension itself
    #[default]
    None,
    /// Both dimensions are forced by the caller
    Override,
}

/// Dimension limits handed to a block. `None` leaves the dimension free.
#[derive(Debug, Clone, Copy, Default, PartialEq, derive_new::new)]
pub struct AreaConstraint {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub modify: AreaModify,
}

/// How many copies of a block and how wide each one is
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct BlockSizing {
    pub kind: BlockKind,
    pub orientation: Orientation,
    /// Parallel instances, e.g. rows driven or columns sensed
    pub units: usize,
    /// Fan of one instance: mux ratio, decoder input bits, accumulator bits, shift steps
    pub ways: usize,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct BlockArea {
    pub width: f64,
    pub height: f64,
    pub area: f64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct BlockTiming {
    pub read_latency: f64,
    pub write_latency: f64,
    pub ramp_output: f64,
}

/// Load the block presents to whoever drives it
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct Parasitics {
    pub cap_tg_gate_n: f64,
    pub cap_tg_gate_p: f64,
    pub cap_tg_drain: f64,
}

/// One peripheral circuit of the subarray.
///
/// Created zeroed, so a block the active mode never touches adds exactly 0 to every sum.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PeripheralBlock {
    pub sizing: BlockSizing,
    pub area: BlockArea,
    pub timing: BlockTiming,
    pub parasitics: Parasitics,
    pub instantiated: bool,
}

impl PeripheralBlock {
    pub fn new(kind: BlockKind, orientation: Orientation) -> Self {
        Self {
            sizing: BlockSizing { kind, orientation, units: 0, ways: 0 },
            area: BlockArea::default(),
            timing: BlockTiming::default(),
            parasitics: Parasitics::default(),
            instantiated: false,
        }
    }

    /// Size the block and pull its load parasitics from the model.
    /// Must run before any `calculate_*`.
    pub fn initialize(&mut self, units: usize, ways: usize, model: &dyn PeripheralModel) {
        self.sizing.units = units;
        self.sizing.ways = ways;
        self.parasitics = model.parasitics(&self.sizing);
        self.instantiated = true;
    }

    /// No-op on a block the mode did not instantiate
    pub fn calculate_area(&mut self, height: Option<f64>, width: Option<f64>, modify: AreaModify, model: &dyn PeripheralModel) {
        if !self.instantiated {
            return;
        }
        let constraint = AreaConstraint::new(height, width, modify);
        self.area = model.area(&self.sizing, &constraint);
        debug!("{} area: {:.4e} ({:.4e} x {:.4e})", self, self.area.area, self.area.height, self.area.width);
    }

    pub fn calculate_latency(&mut self, request: &LatencyRequest, model: &dyn PeripheralModel) {
        if !self.instantiated {
            return;
        }
        self.timing = model.latency(&self.sizing, request);
        debug!("{} latency: read {:.4e}, write {:.4e}", self, self.timing.read_latency, self.timing.write_latency);
    }

    pub fn kind(&self) -> BlockKind {
        self.sizing.kind
    }

    pub fn orientation(&self) -> Orientation {
        self.sizing.orientation
    }

    pub fn width(&self) -> f64 {
        self.area.width
    }

    pub fn height(&self) -> f64 {
        self.area.height
    }

    pub fn area(&self) -> f64 {
        self.area.area
    }

    pub fn read_latency(&self) -> f64 {
        self.timing.read_latency
    }

    pub fn write_latency(&self) -> f64 {
        self.timing.write_latency
    }

    pub fn ramp_output(&self) -> f64 {
        self.timing.ramp_output
    }
}

impl Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::WlDecoder => "wlDecoder",
            Self::WlDecoderDriver => "wlDecoderDriver",
            Self::WlNewDecoderDriver => "wlNewDecoderDriver",
            Self::WlSwitchMatrix => "wlSwitchMatrix",
            Self::WlNewSwitchMatrix => "wlNewSwitchMatrix",
            Self::SlSwitchMatrix => "slSwitchMatrix",
            Self::Mux => "mux",
            Self::MuxDecoder => "muxDecoder",
            Self::SarAdc => "sarADC",
            Self::MultilevelSenseAmp => "multilevelSenseAmp",
            Self::MultilevelSaEncoder => "multilevelSAEncoder",
            Self::RowCurrentSenseAmp => "rowCurrentSenseAmp",
            Self::Adder => "adder",
            Self::Dff => "dff",
            Self::ShiftAddInput => "shiftAddInput",
            Self::ShiftAddWeight => "shiftAddWeight",
        };
        write!(f, "{}", name)
    }
}

impl Display for PeripheralBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sizing.orientation {
            Orientation::Forward => write!(f, "{}", self.sizing.kind),
            Orientation::Backward => write!(f, "{}BP", self.sizing.kind),
        }
    }
}
