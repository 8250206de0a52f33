use tracing::{info, warn};
use crate::periphery::AreaModify;
use super::{AreaResult, Breakdown, EstimateWarning, SubArray};

impl SubArray {
    /// Floorplan of the subarray.
    ///
    /// The SL switch matrix sits above the array and the forward readout chain below it. Row
    /// drive sits on the left, the backprop chain on the right.
    pub fn compute_area(&self) -> AreaResult {
        let config = self.config();
        let model = self.model();
        info!("compute area of {}x{} subarray in {} mode", config.num_row, config.num_col, self.mode());

        let height_array = config.length_col();
        let width_array = config.length_row();
        let area_array = height_array * width_array;

        let mut blocks = self.instantiate();
        blocks.row_drive.calculate_area(height_array, model);
        blocks.sl_switch_matrix.calculate_area(None, Some(width_array), AreaModify::None, model);
        blocks.forward.calculate_area(height_array, width_array, model);
        blocks.backward.calculate_area(height_array, width_array, model);

        let height = blocks.sl_switch_matrix.height() + height_array + blocks.forward.stacked_extent();
        let width = blocks.row_drive.width().max(blocks.forward.mux_decoder.width())
            + width_array
            + blocks.backward.stacked_extent();
        let area = height * width;

        let used_area = area_array + blocks.iter().map(|b| b.area()).sum::<f64>();
        let breakdown = Breakdown {
            adc: blocks.forward.adc_area(),
            accum: blocks.forward.accum_area(),
            other: area_array
                + blocks.row_drive.area()
                + blocks.sl_switch_matrix.area()
                + blocks.forward.route_area(),
            ag: blocks.backward.area(),
        };

        let empty_area = area - used_area;
        let mut warnings = vec![];
        if empty_area < 0.0 {
            let warning = EstimateWarning::NegativeEmptyArea { empty_area };
            warn!("{}", warning);
            warnings.push(warning);
        }

        info!("area {:.4e} ({:.4e} x {:.4e}), used {:.4e}", area, height, width, used_area);
        AreaResult {
            height,
            width,
            area,
            area_array,
            used_area,
            empty_area,
            breakdown,
            warnings,
            blocks: blocks.placed().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::config::{AccessType, CellConfig, MemCellType, ModeFlags, SubArrayConfigBuilder};
    use super::*;

    fn subarray(flags: ModeFlags, training: bool) -> SubArray {
        let config = SubArrayConfigBuilder::default()
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
            .pitch_row(200e-9)
            .pitch_col(200e-9)
            .num_col_muxed(8usize)
            .num_row_muxed_bp(8usize)
            .avg_weight_bit(2usize)
            .num_cell_per_synapse(2usize)
            .mode(flags)
            .training_estimation(training)
            .build()
            .unwrap();
        SubArray::with_analytic(config).unwrap()
    }

    #[test]
    fn test_bounding_box() {
        let result = subarray(ModeFlags { conventional_sequential: true, ..Default::default() }, false).compute_area();
        assert_relative_eq!(result.area, result.height * result.width, max_relative = 1e-12);
        assert!(result.height > result.area_array / result.width);
        assert_relative_eq!(result.empty_area, result.area - result.used_area, max_relative = 1e-12);
    }

    #[test]
    fn test_breakdown_sums_to_used_area() {
        for training in [false, true] {
            let result = subarray(ModeFlags { conventional_parallel: true, ..Default::default() }, training).compute_area();
            assert_relative_eq!(result.breakdown.total(), result.used_area, max_relative = 1e-12);
            assert_eq!(result.breakdown.ag > 0.0, training);
        }
    }

    #[test]
    fn test_training_widens_layout() {
        let flags = ModeFlags { conventional_sequential: true, ..Default::default() };
        let inference = subarray(flags, false).compute_area();
        let training = subarray(flags, true).compute_area();
        assert_relative_eq!(training.height, inference.height, max_relative = 1e-12);
        assert!(training.width > inference.width);
        assert!(training.used_area > inference.used_area);
    }
}
