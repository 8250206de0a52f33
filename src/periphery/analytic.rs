use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use super::{
    horowitz, AreaConstraint, AreaModify, BlockArea, BlockKind, BlockSizing, BlockTiming,
    LatencyRequest, Parasitics, PeripheralModel, PeripheryError, STEP_RAMP
};

/// Footprint and drive of one instance of a block
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct UnitCell {
    /// Width in feature sizes
    pub width: f64,
    /// Height in feature sizes
    pub height: f64,
    /// On resistance of the output stage, ohm
    pub res_on: f64,
    /// Gate capacitance of the select input, F
    pub cap_gate: f64,
    /// Drain capacitance at the output, F
    pub cap_drain: f64,
    /// Logic depth in gate stages
    pub stages: f64,
}

impl UnitCell {
    pub const fn new(width: f64, height: f64, res_on: f64, cap_gate: f64, cap_drain: f64, stages: f64) -> Self {
        Self { width, height, res_on, cap_gate, cap_drain, stages }
    }
}

pub const MAX_ADC_BITS: usize = 16;

/// Reference closed-form periphery.
///
/// Every block is a row (or column) of unit cells packed against the dimension the subarray
/// fixes; delays are Horowitz RC stages. Good enough to rank design points, nothing more.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticPeriphery {
    /// Feature size in meter, unit cell dimensions scale with it
    pub feature_size: f64,
    /// ADC / multilevel sense amp resolution
    pub adc_bits: usize,
    /// SAR ADC time per bit decision, second
    pub sar_cycle: f64,
    /// Integration capacitance of the current sense amps, F
    pub sense_cap: f64,
    /// Per-block unit cell overrides, missing kinds use the built-in table
    pub units: BTreeMap<BlockKind, UnitCell>,
}

impl Default for AnalyticPeriphery {
    fn default() -> Self {
        Self {
            feature_size: 22e-9,
            adc_bits: 5,
            sar_cycle: 0.2e-9,
            sense_cap: 5e-15,
            units: BTreeMap::new(),
        }
    }
}

impl AnalyticPeriphery {
    pub fn unit(&self, kind: BlockKind) -> UnitCell {
        self.units.get(&kind).copied().unwrap_or_else(|| default_unit(kind))
    }

    pub fn validate(&self) -> Result<(), PeripheryError> {
        if !(1..=MAX_ADC_BITS).contains(&self.adc_bits) {
            return Err(PeripheryError::InvalidAdcBits(self.adc_bits));
        }
        for kind in ALL_KINDS {
            let unit = self.unit(kind);
            if !(unit.width > 0.0 && unit.height > 0.0) {
                return Err(PeripheryError::InvalidUnitCell(kind.to_string()));
            }
        }
        Ok(())
    }

    fn levels(&self) -> f64 {
        (2usize.pow(self.adc_bits as u32) - 1) as f64
    }

    /// Width and height of one placed instance, in meter
    fn footprint(&self, sizing: &BlockSizing) -> (f64, f64) {
        let unit = self.unit(sizing.kind);
        let f = self.feature_size;
        let ways = sizing.ways.max(1) as f64;
        match sizing.kind {
            BlockKind::Adder | BlockKind::Dff | BlockKind::ShiftAddInput | BlockKind::ShiftAddWeight
                => (unit.width * f * ways, unit.height * f),
            BlockKind::MultilevelSenseAmp => (unit.width * f, unit.height * f * self.levels()),
            BlockKind::MultilevelSaEncoder => (unit.width * f, unit.height * f * self.adc_bits as f64),
            _ => (unit.width * f, unit.height * f),
        }
    }

    fn layout(count: usize, (unit_width, unit_height): (f64, f64), constraint: &AreaConstraint) -> BlockArea {
        if count == 0 {
            return BlockArea::default();
        }
        let count = count as f64;

        let (width, height) = match (constraint.height, constraint.width, constraint.modify) {
            (Some(height), Some(width), AreaModify::Override) => (width, height),
            (Some(min_height), Some(width), AreaModify::None) => {
                let per_row = (width / unit_width).floor().max(1.0);
                let rows = (count / per_row).ceil();
                (width, (rows * unit_height).max(min_height))
            }
            (None, Some(width), _) => {
                let per_row = (width / unit_width).floor().max(1.0);
                let rows = (count / per_row).ceil();
                (width, rows * unit_height)
            }
            (Some(height), None, _) => {
                let per_col = (height / unit_height).floor().max(1.0);
                let cols = (count / per_col).ceil();
                (cols * unit_width, height)
            }
            (None, None, _) => {
                let per_row = count.sqrt().ceil();
                let rows = (count / per_row).ceil();
                (per_row * unit_width, rows * unit_height)
            }
        };

        BlockArea { width, height, area: width * height }
    }

    fn decoder_stages(bits: usize) -> f64 {
        2.0 + (bits as f64 / 2.0).ceil()
    }
}

impl PeripheralModel for AnalyticPeriphery {
    fn area(&self, sizing: &BlockSizing, constraint: &AreaConstraint) -> BlockArea {
        Self::layout(sizing.units, self.footprint(sizing), constraint)
    }

    fn latency(&self, sizing: &BlockSizing, request: &LatencyRequest) -> BlockTiming {
        if sizing.units == 0 {
            return BlockTiming::default();
        }

        let unit = self.unit(sizing.kind);
        let tau = unit.res_on * (request.load_capacitance + unit.cap_drain)
            + request.load_resistance * request.load_capacitance / 2.0;
        let stage = horowitz(tau, 0.5, request.ramp_input);

        let (per_read, per_write) = match sizing.kind {
            BlockKind::WlDecoder | BlockKind::MuxDecoder => {
                let delay = stage.delay * Self::decoder_stages(sizing.ways);
                (delay, delay)
            }
            BlockKind::WlDecoderDriver | BlockKind::WlNewDecoderDriver
            | BlockKind::WlSwitchMatrix | BlockKind::WlNewSwitchMatrix
            | BlockKind::SlSwitchMatrix => {
                let delay = stage.delay * unit.stages;
                (delay, delay)
            }
            BlockKind::SarAdc => ((self.adc_bits as f64 + 1.0) * self.sar_cycle, 0.0),
            BlockKind::MultilevelSenseAmp | BlockKind::RowCurrentSenseAmp => {
                let integrate = horowitz(request.load_resistance * self.sense_cap, 0.0, STEP_RAMP);
                let compare = horowitz(unit.res_on * unit.cap_drain, 0.5, integrate.ramp_output);
                (integrate.delay + compare.delay * unit.stages, 0.0)
            }
            BlockKind::MultilevelSaEncoder => (stage.delay * self.adc_bits as f64, 0.0),
            BlockKind::Adder => (stage.delay * sizing.ways.max(1) as f64, 0.0),
            BlockKind::Mux | BlockKind::Dff | BlockKind::ShiftAddInput | BlockKind::ShiftAddWeight
                => (stage.delay * unit.stages, 0.0),
        };

        BlockTiming {
            read_latency: per_read * request.num_read,
            write_latency: per_write * request.num_write,
            ramp_output: stage.ramp_output,
        }
    }

    fn parasitics(&self, sizing: &BlockSizing) -> Parasitics {
        let unit = self.unit(sizing.kind);
        Parasitics {
            cap_tg_gate_n: unit.cap_gate,
            cap_tg_gate_p: 2.0 * unit.cap_gate,
            cap_tg_drain: unit.cap_drain,
        }
    }
}

const ALL_KINDS: [BlockKind; 16] = [
    BlockKind::WlDecoder,
    BlockKind::WlDecoderDriver,
    BlockKind::WlNewDecoderDriver,
    BlockKind::WlSwitchMatrix,
    BlockKind::WlNewSwitchMatrix,
    BlockKind::SlSwitchMatrix,
    BlockKind::Mux,
    BlockKind::MuxDecoder,
    BlockKind::SarAdc,
    BlockKind::MultilevelSenseAmp,
    BlockKind::MultilevelSaEncoder,
    BlockKind::RowCurrentSenseAmp,
    BlockKind::Adder,
    BlockKind::Dff,
    BlockKind::ShiftAddInput,
    BlockKind::ShiftAddWeight,
];

fn default_unit(kind: BlockKind) -> UnitCell {
    match kind {
        BlockKind::WlDecoder => UnitCell::new(60.0, 10.0, 5e3, 1e-16, 1e-16, 1.0),
        BlockKind::WlDecoderDriver => UnitCell::new(30.0, 10.0, 2e3, 2e-16, 2e-16, 1.0),
        // level shifter in front of the driver for the access transistor gate
        BlockKind::WlNewDecoderDriver => UnitCell::new(45.0, 10.0, 1.5e3, 2e-16, 3e-16, 2.0),
        BlockKind::WlSwitchMatrix => UnitCell::new(40.0, 10.0, 3e3, 1e-16, 2e-16, 1.0),
        BlockKind::WlNewSwitchMatrix => UnitCell::new(55.0, 10.0, 2.5e3, 1e-16, 3e-16, 2.0),
        BlockKind::SlSwitchMatrix => UnitCell::new(10.0, 40.0, 3e3, 1e-16, 2e-16, 1.0),
        BlockKind::Mux => UnitCell::new(8.0, 20.0, 4e3, 5e-17, 1e-16, 1.0),
        BlockKind::MuxDecoder => UnitCell::new(40.0, 10.0, 5e3, 1e-16, 1e-16, 1.0),
        BlockKind::SarAdc => UnitCell::new(60.0, 400.0, 1e3, 2e-16, 2e-16, 1.0),
        BlockKind::MultilevelSenseAmp => UnitCell::new(40.0, 30.0, 2e3, 1e-16, 2e-16, 2.0),
        BlockKind::MultilevelSaEncoder => UnitCell::new(40.0, 20.0, 4e3, 1e-16, 1e-16, 1.0),
        BlockKind::RowCurrentSenseAmp => UnitCell::new(40.0, 150.0, 2e3, 1e-16, 2e-16, 2.0),
        BlockKind::Adder => UnitCell::new(40.0, 60.0, 3e3, 1e-16, 1e-16, 1.0),
        BlockKind::Dff => UnitCell::new(30.0, 40.0, 3e3, 1e-16, 1.5e-16, 2.0),
        BlockKind::ShiftAddInput | BlockKind::ShiftAddWeight => UnitCell::new(40.0, 100.0, 3e3, 1e-16, 1e-16, 3.0),
    }
}
