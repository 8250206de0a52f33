use tracing::{debug, info};
use crate::periphery::{LatencyRequest, PeripheralModel, STEP_RAMP};
use super::{
    line_settling, ArrayParasitics, Breakdown, ChainPlan, LatencyResult, ReadoutChain,
    RowDriveStyle, SubArray,
};

fn request(ramp_input: f64, load_capacitance: f64, load_resistance: f64, num_read: f64, num_write: f64) -> LatencyRequest {
    LatencyRequest { ramp_input, load_capacitance, load_resistance, num_read, num_write }
}

/// Time the mux, readout and accumulation blocks of one chain.
///
/// `ramp` is the slope of the settled lines, `sense_resistance` what the sense amps see.
fn chain_latency(chain: &mut ReadoutChain, plan: &ChainPlan, ramp: f64, sense_resistance: f64, model: &dyn PeripheralModel) {
    let muxed = plan.muxed as f64;
    let reads = plan.reads();

    chain.mux.calculate_latency(&request(ramp, 0.0, 0.0, muxed, 0.0), model);
    let mux_gates = (chain.mux.parasitics.cap_tg_gate_n + chain.mux.parasitics.cap_tg_gate_p) * chain.groups() as f64;
    chain.mux_decoder.calculate_latency(&request(STEP_RAMP, mux_gates, 0.0, muxed, 0.0), model);

    let readout = request(STEP_RAMP, 0.0, sense_resistance, reads, 0.0);
    for block in [
        &mut chain.sar_adc,
        &mut chain.multilevel_sense_amp,
        &mut chain.multilevel_sa_encoder,
        &mut chain.row_current_sense_amp,
    ] {
        block.calculate_latency(&readout, model);
    }

    let dff_load = chain.dff.parasitics.cap_tg_drain;
    chain.adder.calculate_latency(&request(STEP_RAMP, dff_load, 0.0, reads, 0.0), model);
    chain.dff.calculate_latency(&request(STEP_RAMP, 0.0, 0.0, reads, 0.0), model);

    // one shift-add per muxed line, input shifts once per synapse
    let synapse_steps = plan.muxed.div_ceil(plan.cells_per_synapse.max(1)) as f64;
    chain.shift_add_weight.calculate_latency(&request(STEP_RAMP, 0.0, 0.0, muxed, 0.0), model);
    chain.shift_add_input.calculate_latency(&request(STEP_RAMP, 0.0, 0.0, synapse_steps, 0.0), model);
}

impl SubArray {
    /// Read and write timing of one subarray operation.
    ///
    /// Row drive and column mux select in parallel, so only the slower of the two counts; the
    /// readout and accumulation stages follow in series.
    pub fn compute_latency(&self) -> LatencyResult {
        let config = self.config();
        let model = self.model();
        let profile = self.profile();
        info!("compute latency of {}x{} subarray in {} mode", config.num_row, config.num_col, self.mode());

        let parasitics = ArrayParasitics::new(config);
        let res_cell = config.cell.res_mem_cell_avg;
        let cmos = config.cell.is_cmos_access();
        let mut blocks = self.instantiate();

        let col = line_settling(parasitics.cap_col, res_cell, config.num_row, profile.parallel_read, config.num_col_muxed);
        debug!("column tau {:.4e}, settling {:.4e}", col.tau, col.delay);

        let writes_per_row = (config.num_col as f64 * config.activity_col_write / config.num_write_cell_per_operation as f64).ceil();
        let writes = 2.0 * writes_per_row * config.num_row as f64 * config.activity_row_write;
        let cap_row = if cmos { parasitics.cap_row2 } else { parasitics.cap_row1 };

        let row_drive = &mut blocks.row_drive;
        match profile.row_drive {
            RowDriveStyle::DecoderDriver => {
                let reads = config.num_row as f64 * config.activity_row_read * config.num_col_muxed as f64;
                row_drive.wl_decoder.calculate_latency(&request(STEP_RAMP, parasitics.cap_row2, 0.0, reads, writes), model);
                let driver = request(row_drive.wl_decoder.ramp_output(), cap_row, parasitics.res_row, reads, writes);
                row_drive.wl_new_decoder_driver.calculate_latency(&driver, model);
                row_drive.wl_decoder_driver.calculate_latency(&driver, model);
            }
            RowDriveStyle::SwitchMatrix => {
                let switch = request(STEP_RAMP, cap_row, parasitics.res_row, config.num_col_muxed as f64, writes);
                row_drive.wl_new_switch_matrix.calculate_latency(&switch, model);
                row_drive.wl_switch_matrix.calculate_latency(&switch, model);
            }
        }
        blocks.sl_switch_matrix.calculate_latency(
            &request(STEP_RAMP, parasitics.cap_col, parasitics.res_col, 0.0, writes),
            model,
        );

        let forward = self.forward_plan();
        let sense_resistance = parasitics.column_resistance(config, profile.parallel_read);
        chain_latency(&mut blocks.forward, &forward, col.ramp, sense_resistance, model);

        let num_read_pulse = config.num_read_pulse as f64;
        let select = blocks.row_drive.read_latency().max(blocks.forward.mux_read_latency() / num_read_pulse);
        let mut breakdown = Breakdown {
            adc: blocks.forward.adc_read_latency(),
            accum: blocks.forward.accum_read_latency(),
            other: select + col.delay / num_read_pulse,
            ag: 0.0,
        };
        let read_latency = breakdown.adc + breakdown.accum + breakdown.other;

        let write_latency_array = config.total_num_write_pulse * config.cell.write_pulse_width;
        let write_latency = blocks.row_drive.write_latency().max(blocks.sl_switch_matrix.write_latency()) + write_latency_array;

        if let Some(backward) = self.backward_plan().filter(|_| config.layer_number != 0) {
            let cap_row_bp = ArrayParasitics::cap_row_bp(config);
            let row = line_settling(cap_row_bp, res_cell, config.num_col, profile.parallel_read, config.num_row_muxed_bp);
            debug!("row tau {:.4e}, settling {:.4e}", row.tau, row.delay);

            blocks.sl_switch_matrix_bp.calculate_latency(
                &request(STEP_RAMP, parasitics.cap_col, parasitics.res_col, backward.reads(), 0.0),
                model,
            );
            let sense_resistance = parasitics.row_resistance(config, profile.parallel_read);
            chain_latency(&mut blocks.backward, &backward, row.ramp, sense_resistance, model);

            let num_read_pulse_bp = config.num_read_pulse_bp as f64;
            let select = blocks.sl_switch_matrix_bp.read_latency().max(blocks.backward.mux_read_latency() / num_read_pulse_bp);
            breakdown.ag = select
                + blocks.backward.adc_read_latency()
                + blocks.backward.accum_read_latency()
                + row.delay / num_read_pulse_bp;
        }

        info!("read latency {:.4e}, write latency {:.4e}, backprop {:.4e}", read_latency, write_latency, breakdown.ag);
        LatencyResult {
            read_latency,
            write_latency,
            write_latency_array,
            read_latency_ag: breakdown.ag,
            col_delay: col.delay,
            breakdown,
            blocks: blocks.instantiated().cloned().collect(),
        }
    }
}
