use crate::{config::SubArrayConfig, periphery::{horowitz, STEP_RAMP}};

/// Share of the final line voltage that is enough for sensing
pub const SENSE_FRACTION: f64 = 0.2;

/// Wire and cell loading of the rows and columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayParasitics {
    /// Row wire only
    pub cap_row1: f64,
    /// Row wire plus access transistor gates, CMOS access only
    pub cap_row2: f64,
    /// Column wire plus cell drains
    pub cap_col: f64,
    pub res_row: f64,
    pub res_col: f64,
}

impl ArrayParasitics {
    pub fn new(config: &SubArrayConfig) -> Self {
        let tech = &config.tech;
        let cell = &config.cell;
        let length_row = config.length_row();
        let length_col = config.length_col();

        let cap_row1 = length_row * tech.wire_cap_per_meter;
        let mut cap_row2 = cap_row1;
        if cell.is_cmos_access() {
            cap_row2 += cell.cap_access_gate * config.num_col as f64;
        }
        // access type only changes what the row drive sees
        let cap_col = length_col * tech.wire_cap_per_meter + cell.cap_access_drain * config.num_row as f64;

        Self {
            cap_row1,
            cap_row2,
            cap_col,
            res_row: length_row * tech.row_wire_resistance,
            res_col: length_col * tech.col_wire_resistance,
        }
    }

    /// Row line load seen by the transposed read
    pub fn cap_row_bp(config: &SubArrayConfig) -> f64 {
        config.length_row() * config.tech.wire_cap_per_meter + config.cell.cap_access_drain * config.num_col as f64
    }

    /// Resistance a column sense amp sees: the active cells in parallel plus the column wire
    pub fn column_resistance(&self, config: &SubArrayConfig, parallel: bool) -> f64 {
        let active = if parallel { config.num_row } else { 1 };
        config.cell.res_mem_cell_avg / active as f64 + self.res_col
    }

    /// Transposed counterpart of `column_resistance`
    pub fn row_resistance(&self, config: &SubArrayConfig, parallel: bool) -> f64 {
        let active = if parallel { config.num_col } else { 1 };
        config.cell.res_mem_cell_avg / active as f64 + self.res_row
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSettling {
    pub tau: f64,
    /// Slope the line hands to the mux
    pub ramp: f64,
    /// Time until the line is sense-valid, for all muxed lines
    pub delay: f64,
}

/// Settling of a bit line loaded by `cap` and discharged through the cells.
///
/// With all `lines` cells driving at once the cell resistance is divided by `lines / 2`.
/// The line only has to reach `SENSE_FRACTION` of its final value, once per muxed line.
pub fn line_settling(cap: f64, res_cell: f64, lines: usize, parallel: bool, muxed: usize) -> LineSettling {
    let res = if parallel { res_cell / (lines / 2).max(1) as f64 } else { res_cell };
    let tau = cap * res;
    let ramp = horowitz(tau, 0.0, STEP_RAMP).ramp_output;
    LineSettling { tau, ramp, delay: tau * SENSE_FRACTION * muxed as f64 }
}
