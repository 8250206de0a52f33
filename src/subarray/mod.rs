mod profile;
mod parasitics;
mod blocks;
mod result;
mod area;
mod latency;

pub use profile::*;
pub use parasitics::*;
pub use blocks::*;
pub use result::*;

use std::sync::Arc;
use crate::config::{Mode, SubArrayConfig};
use crate::periphery::{AnalyticPeriphery, PeripheralModel};
use crate::CimResult;

/// Area and latency estimator of one crossbar subarray.
///
/// The configuration is validated once, every `compute_*` call then builds its own set of
/// blocks, so a `SubArray` can be shared across threads.
#[derive(Debug, Clone)]
pub struct SubArray {
    config: SubArrayConfig,
    mode: Mode,
    model: Arc<dyn PeripheralModel>,
}

impl SubArray {
    pub fn new(config: SubArrayConfig, model: Arc<dyn PeripheralModel>) -> CimResult<Self> {
        let mode = config.validate()?;
        Ok(Self { config, mode, model })
    }

    pub fn with_analytic(config: SubArrayConfig) -> CimResult<Self> {
        Self::new(config, Arc::new(AnalyticPeriphery::default()))
    }

    pub fn config(&self) -> &SubArrayConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn profile(&self) -> ModeProfile {
        ModeProfile::from(self.mode)
    }

    pub fn model(&self) -> &dyn PeripheralModel {
        self.model.as_ref()
    }

    /// Backprop path exists in the layout
    pub fn has_backprop(&self) -> bool {
        self.config.training_estimation && self.profile().backprop
    }

    /// Conventional parallel with a single-cycle transposed read
    pub fn parallel_bp(&self) -> bool {
        self.mode == Mode::ConventionalParallel && self.config.parallel_bp
    }

    pub fn forward_plan(&self) -> ChainPlan {
        let config = &self.config;
        let profile = self.profile();
        let ops = if profile.parallel_read {
            1.0
        } else {
            config.num_row as f64 * config.activity_row_read
        };

        ChainPlan {
            lines: config.num_col,
            muxed: config.num_col_muxed,
            depth: config.num_row,
            readout: profile.readout,
            sar_adc: config.sar_adc,
            encoder: !profile.gated_encoder || config.avg_weight_bit > 1,
            accumulate: profile.accumulate,
            avg_weight_bit: config.avg_weight_bit,
            shift_add: profile.shift_add,
            read_pulses: config.num_read_pulse,
            cells_per_synapse: config.num_cell_per_synapse,
            ops,
        }
    }

    pub fn backward_plan(&self) -> Option<ChainPlan> {
        if !self.has_backprop() {
            return None;
        }

        let config = &self.config;
        let parallel_bp = self.parallel_bp();
        let ops = if parallel_bp {
            1.0
        } else {
            config.num_col as f64 * config.activity_bp_col_read
        };

        Some(ChainPlan {
            lines: config.num_row,
            muxed: config.num_row_muxed_bp,
            depth: config.num_col,
            readout: ReadoutStyle::MultiLevel,
            sar_adc: config.sar_adc,
            encoder: parallel_bp || config.avg_weight_bit > 1,
            accumulate: !parallel_bp,
            avg_weight_bit: config.avg_weight_bit,
            shift_add: true,
            read_pulses: config.num_read_pulse_bp,
            cells_per_synapse: config.num_cell_per_synapse,
            ops,
        })
    }

    /// Fresh block set with every block the mode needs initialized, nothing sized yet
    pub fn instantiate(&self) -> SubArrayBlocks {
        let config = &self.config;
        let model = self.model();
        let cmos = config.cell.is_cmos_access();
        let mut blocks = SubArrayBlocks::new();

        let row_drive = &mut blocks.row_drive;
        match self.profile().row_drive {
            RowDriveStyle::DecoderDriver => {
                row_drive.wl_decoder.initialize(config.num_row, address_bits(config.num_row), model);
                let driver = if cmos { &mut row_drive.wl_new_decoder_driver } else { &mut row_drive.wl_decoder_driver };
                driver.initialize(config.num_row, 1, model);
            }
            RowDriveStyle::SwitchMatrix => {
                let switch = if cmos { &mut row_drive.wl_new_switch_matrix } else { &mut row_drive.wl_switch_matrix };
                switch.initialize(config.num_row, 1, model);
            }
        }

        blocks.sl_switch_matrix.initialize(config.num_col, 1, model);
        blocks.forward.initialize(&self.forward_plan(), model);

        if let Some(plan) = self.backward_plan() {
            blocks.sl_switch_matrix_bp.initialize(config.num_col, 1, model);
            blocks.backward.initialize(&plan, model);
        }

        blocks
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{AccessType, CellConfig, MemCellType, ModeFlags, ReadScheme, SubArrayConfigBuilder};
    use crate::periphery::{BlockKind, Orientation};
    use super::*;

    fn config(flags: ModeFlags, scheme: ReadScheme) -> SubArrayConfig {
        SubArrayConfigBuilder::default()
            .cell(CellConfig {
                mem_cell_type: MemCellType::Rram,
                access_type: AccessType::CmosAccess,
                res_mem_cell_avg: 1e5,
                cap_access_gate: 1e-17,
                cap_access_drain: 1e-17,
                write_pulse_width: 10e-9,
            })
            .num_row(128usize)
            .num_col(128usize)
            .pitch_row(100e-9)
            .pitch_col(100e-9)
            .mode(flags)
            .read_scheme(scheme)
            .training_estimation(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sequential_uses_decoder() {
        let flags = ModeFlags { conventional_sequential: true, ..Default::default() };
        let subarray = SubArray::with_analytic(config(flags, ReadScheme::Parallel)).unwrap();
        let blocks = subarray.instantiate();

        assert!(blocks.row_drive.wl_decoder.instantiated);
        assert_eq!(blocks.row_drive.wl_decoder.sizing.ways, 7);
        assert!(blocks.row_drive.wl_new_decoder_driver.instantiated);
        assert!(!blocks.row_drive.wl_decoder_driver.instantiated);
        assert!(!blocks.row_drive.wl_new_switch_matrix.instantiated);
        assert!(blocks.forward.adder.instantiated);
        assert!(blocks.backward.adder.instantiated);
    }

    #[test]
    fn test_training_ignored_outside_conventional() {
        let subarray = SubArray::with_analytic(config(ModeFlags::default(), ReadScheme::Sequential)).unwrap();
        assert_eq!(subarray.mode(), Mode::DefaultSequential);
        assert!(subarray.backward_plan().is_none());
        let blocks = subarray.instantiate();
        assert!(blocks.forward.adder.instantiated);
        assert!(blocks.forward.dff.instantiated);
        assert!(blocks.iter().filter(|b| b.orientation() == Orientation::Backward).all(|b| !b.instantiated));
    }

    #[test]
    fn test_parallel_bp_drops_accumulator() {
        let flags = ModeFlags { conventional_parallel: true, ..Default::default() };
        let mut config = config(flags, ReadScheme::Parallel);
        config.parallel_bp = true;
        let subarray = SubArray::with_analytic(config).unwrap();
        let plan = subarray.backward_plan().unwrap();
        assert!(!plan.accumulate);
        assert!(plan.encoder);
        assert_eq!(plan.ops, 1.0);

        let blocks = subarray.instantiate();
        assert!(blocks.get(BlockKind::MultilevelSenseAmp, Orientation::Backward).unwrap().instantiated);
        assert!(!blocks.get(BlockKind::Adder, Orientation::Backward).unwrap().instantiated);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = config(ModeFlags::default(), ReadScheme::Parallel);
        config.num_cell_per_synapse = 0;
        assert!(SubArray::with_analytic(config).is_err());
    }
}
