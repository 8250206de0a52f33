use serde::{Deserialize, Serialize};
use crate::periphery::{AreaModify, BlockKind, Orientation, PeripheralBlock, PeripheralModel};
use super::ReadoutStyle;

/// Blocks that drive the wordlines. A mode instantiates one decoder/driver pair or one switch matrix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RowDrive {
    pub wl_decoder: PeripheralBlock,
    pub wl_decoder_driver: PeripheralBlock,
    pub wl_new_decoder_driver: PeripheralBlock,
    pub wl_switch_matrix: PeripheralBlock,
    pub wl_new_switch_matrix: PeripheralBlock,
}

impl RowDrive {
    pub fn new() -> Self {
        Self {
            wl_decoder: PeripheralBlock::new(BlockKind::WlDecoder, Orientation::Forward),
            wl_decoder_driver: PeripheralBlock::new(BlockKind::WlDecoderDriver, Orientation::Forward),
            wl_new_decoder_driver: PeripheralBlock::new(BlockKind::WlNewDecoderDriver, Orientation::Forward),
            wl_switch_matrix: PeripheralBlock::new(BlockKind::WlSwitchMatrix, Orientation::Forward),
            wl_new_switch_matrix: PeripheralBlock::new(BlockKind::WlNewSwitchMatrix, Orientation::Forward),
        }
    }

    pub fn blocks(&self) -> [&PeripheralBlock; 5] {
        [
            &self.wl_decoder,
            &self.wl_decoder_driver,
            &self.wl_new_decoder_driver,
            &self.wl_switch_matrix,
            &self.wl_new_switch_matrix,
        ]
    }

    pub fn calculate_area(&mut self, height_array: f64, model: &dyn PeripheralModel) {
        for block in [
            &mut self.wl_decoder,
            &mut self.wl_decoder_driver,
            &mut self.wl_new_decoder_driver,
            &mut self.wl_switch_matrix,
            &mut self.wl_new_switch_matrix,
        ] {
            block.calculate_area(Some(height_array), None, AreaModify::None, model);
        }
    }

    /// Decoder and driver sit side by side, only one style is non-zero
    pub fn width(&self) -> f64 {
        self.blocks().iter().map(|b| b.width()).sum()
    }

    pub fn area(&self) -> f64 {
        self.blocks().iter().map(|b| b.area()).sum()
    }

    /// Decoder and driver are in series
    pub fn read_latency(&self) -> f64 {
        self.blocks().iter().map(|b| b.read_latency()).sum()
    }

    pub fn write_latency(&self) -> f64 {
        self.blocks().iter().map(|b| b.write_latency()).sum()
    }
}

/// Mux, readout and accumulation behind one side of the array.
///
/// The forward chain sits below the array and reads columns; the backward chain is the same
/// circuit turned by 90 degrees beside the array, reading rows for backpropagation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ReadoutChain {
    pub orientation: Orientation,
    /// Lines the chain reads: columns forward, rows backward
    pub lines: usize,
    /// Lines sharing one readout
    pub muxed: usize,

    pub mux: PeripheralBlock,
    pub mux_decoder: PeripheralBlock,
    pub sar_adc: PeripheralBlock,
    pub multilevel_sense_amp: PeripheralBlock,
    pub multilevel_sa_encoder: PeripheralBlock,
    pub row_current_sense_amp: PeripheralBlock,
    pub adder: PeripheralBlock,
    pub dff: PeripheralBlock,
    pub shift_add_input: PeripheralBlock,
    pub shift_add_weight: PeripheralBlock,
}

impl ReadoutChain {
    pub fn new(orientation: Orientation) -> Self {
        let block = |kind| PeripheralBlock::new(kind, orientation);
        Self {
            orientation,
            lines: 0,
            muxed: 1,
            mux: block(BlockKind::Mux),
            mux_decoder: block(BlockKind::MuxDecoder),
            sar_adc: block(BlockKind::SarAdc),
            multilevel_sense_amp: block(BlockKind::MultilevelSenseAmp),
            multilevel_sa_encoder: block(BlockKind::MultilevelSaEncoder),
            row_current_sense_amp: block(BlockKind::RowCurrentSenseAmp),
            adder: block(BlockKind::Adder),
            dff: block(BlockKind::Dff),
            shift_add_input: block(BlockKind::ShiftAddInput),
            shift_add_weight: block(BlockKind::ShiftAddWeight),
        }
    }

    pub fn blocks(&self) -> [&PeripheralBlock; 10] {
        [
            &self.mux,
            &self.mux_decoder,
            &self.sar_adc,
            &self.multilevel_sense_amp,
            &self.multilevel_sa_encoder,
            &self.row_current_sense_amp,
            &self.adder,
            &self.dff,
            &self.shift_add_input,
            &self.shift_add_weight,
        ]
    }

    pub fn adc_blocks(&self) -> [&PeripheralBlock; 4] {
        [&self.sar_adc, &self.multilevel_sense_amp, &self.multilevel_sa_encoder, &self.row_current_sense_amp]
    }

    pub fn accum_blocks(&self) -> [&PeripheralBlock; 4] {
        [&self.adder, &self.dff, &self.shift_add_input, &self.shift_add_weight]
    }

    pub fn route_blocks(&self) -> [&PeripheralBlock; 2] {
        [&self.mux, &self.mux_decoder]
    }

    /// Readout groups: lines divided by the mux ratio
    pub fn groups(&self) -> usize {
        self.lines.div_ceil(self.muxed.max(1))
    }

    pub fn initialize(&mut self, plan: &ChainPlan, model: &dyn PeripheralModel) {
        self.lines = plan.lines;
        self.muxed = plan.muxed;
        let groups = self.groups();

        if plan.muxed > 1 {
            self.mux.initialize(plan.lines, plan.muxed, model);
            self.mux_decoder.initialize(plan.muxed, address_bits(plan.muxed), model);
        }

        match plan.readout {
            ReadoutStyle::MultiLevel if plan.sar_adc => self.sar_adc.initialize(groups, 1, model),
            ReadoutStyle::MultiLevel => {
                self.multilevel_sense_amp.initialize(groups, 1, model);
                if plan.encoder {
                    self.multilevel_sa_encoder.initialize(groups, 1, model);
                }
            }
            ReadoutStyle::CurrentSense => self.row_current_sense_amp.initialize(groups, 1, model),
        }

        if plan.accumulate {
            let bits = address_bits(plan.depth) + plan.avg_weight_bit;
            self.adder.initialize(groups, bits, model);
            self.dff.initialize(groups, bits, model);
        }

        if plan.shift_add {
            if plan.read_pulses > 1 {
                self.shift_add_input.initialize(groups, plan.read_pulses, model);
            }
            if plan.cells_per_synapse > 1 {
                let synapses = groups.div_ceil(plan.cells_per_synapse);
                self.shift_add_weight.initialize(synapses, plan.cells_per_synapse, model);
            }
        }
    }

    pub fn calculate_area(&mut self, height_array: f64, width_array: f64, model: &dyn PeripheralModel) {
        // decoder and mux must line up: size both, then stretch the mux to the taller/wider one
        match self.orientation {
            Orientation::Forward => {
                self.mux.calculate_area(None, Some(width_array), AreaModify::None, model);
                self.mux_decoder.calculate_area(None, None, AreaModify::None, model);
                if self.mux.instantiated {
                    let min_mux_height = self.mux_decoder.height().max(self.mux.height());
                    self.mux.calculate_area(Some(min_mux_height), Some(width_array), AreaModify::Override, model);
                }
            }
            Orientation::Backward => {
                self.mux.calculate_area(Some(height_array), None, AreaModify::None, model);
                self.mux_decoder.calculate_area(None, None, AreaModify::None, model);
                if self.mux.instantiated {
                    let min_mux_width = self.mux_decoder.width().max(self.mux.width());
                    self.mux.calculate_area(Some(height_array), Some(min_mux_width), AreaModify::Override, model);
                }
            }
        }

        let (height, width) = match self.orientation {
            Orientation::Forward => (None, Some(width_array)),
            Orientation::Backward => (Some(height_array), None),
        };
        for block in [
            &mut self.sar_adc,
            &mut self.multilevel_sense_amp,
            &mut self.multilevel_sa_encoder,
            &mut self.row_current_sense_amp,
            &mut self.adder,
            &mut self.dff,
            &mut self.shift_add_input,
            &mut self.shift_add_weight,
        ] {
            block.calculate_area(height, width, AreaModify::None, model);
        }
    }

    /// How far the chain sticks out of the array: summed heights forward, summed widths backward.
    /// The mux decoder sits beside the mux and does not add to it.
    pub fn stacked_extent(&self) -> f64 {
        self.blocks()
            .iter()
            .filter(|b| b.kind() != BlockKind::MuxDecoder)
            .map(|b| match self.orientation {
                Orientation::Forward => b.height(),
                Orientation::Backward => b.width(),
            })
            .sum()
    }

    pub fn adc_area(&self) -> f64 {
        self.adc_blocks().iter().map(|b| b.area()).sum()
    }

    pub fn accum_area(&self) -> f64 {
        self.accum_blocks().iter().map(|b| b.area()).sum()
    }

    pub fn route_area(&self) -> f64 {
        self.route_blocks().iter().map(|b| b.area()).sum()
    }

    pub fn area(&self) -> f64 {
        self.blocks().iter().map(|b| b.area()).sum()
    }

    pub fn mux_read_latency(&self) -> f64 {
        self.route_blocks().iter().map(|b| b.read_latency()).sum()
    }

    pub fn adc_read_latency(&self) -> f64 {
        self.adc_blocks().iter().map(|b| b.read_latency()).sum()
    }

    pub fn accum_read_latency(&self) -> f64 {
        self.accum_blocks().iter().map(|b| b.read_latency()).sum()
    }
}

/// What one readout chain has to contain, resolved from mode and configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPlan {
    pub lines: usize,
    pub muxed: usize,
    /// Lines summed into one readout, sizes the accumulator
    pub depth: usize,
    pub readout: ReadoutStyle,
    pub sar_adc: bool,
    pub encoder: bool,
    pub accumulate: bool,
    pub avg_weight_bit: usize,
    pub shift_add: bool,
    pub read_pulses: usize,
    pub cells_per_synapse: usize,
    /// Readout operations per muxed line
    pub ops: f64,
}

impl ChainPlan {
    pub fn reads(&self) -> f64 {
        self.muxed as f64 * self.ops
    }
}

/// Address width for `n` selections, at least 1
pub fn address_bits(n: usize) -> usize {
    (usize::BITS - (n.max(2) - 1).leading_zeros()) as usize
}

/// Every block of one subarray, forward and transposed
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SubArrayBlocks {
    pub row_drive: RowDrive,
    pub sl_switch_matrix: PeripheralBlock,
    /// Timing of the same switch matrix when it drives the transposed read, never has area
    pub sl_switch_matrix_bp: PeripheralBlock,
    pub forward: ReadoutChain,
    pub backward: ReadoutChain,
}

impl SubArrayBlocks {
    pub fn new() -> Self {
        Self {
            row_drive: RowDrive::new(),
            sl_switch_matrix: PeripheralBlock::new(BlockKind::SlSwitchMatrix, Orientation::Forward),
            sl_switch_matrix_bp: PeripheralBlock::new(BlockKind::SlSwitchMatrix, Orientation::Backward),
            forward: ReadoutChain::new(Orientation::Forward),
            backward: ReadoutChain::new(Orientation::Backward),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeripheralBlock> {
        self.row_drive.blocks()
            .into_iter()
            .chain([&self.sl_switch_matrix, &self.sl_switch_matrix_bp])
            .chain(self.forward.blocks())
            .chain(self.backward.blocks())
    }

    pub fn get(&self, kind: BlockKind, orientation: Orientation) -> Option<&PeripheralBlock> {
        self.iter().find(|b| b.kind() == kind && b.orientation() == orientation)
    }

    pub fn instantiated(&self) -> impl Iterator<Item = &PeripheralBlock> {
        self.iter().filter(|b| b.instantiated)
    }

    /// Instantiated blocks that take up layout, i.e. all but the transposed SL switch matrix
    pub fn placed(&self) -> impl Iterator<Item = &PeripheralBlock> {
        self.instantiated()
            .filter(|b| !(b.kind() == BlockKind::SlSwitchMatrix && b.orientation() == Orientation::Backward))
    }
}

impl Default for RowDrive {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for SubArrayBlocks {
    fn default() -> Self {
        Self::new()
    }
}
