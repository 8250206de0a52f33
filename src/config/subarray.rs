use std::path::Path;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::{check_config, CimResult, ErrorContext};
use super::{CellConfig, ConfigError, Mode, ModeFlags, ReadScheme, Technology};

/// Everything one estimation run needs to know about a subarray.
///
/// Lengths are in meter. Activities are fractions of rows/columns touched per operation.
///
/// # Example
///
/// ```ignore
/// let config = SubArrayConfigBuilder::default()
///     .cell(cell)
///     .num_row(128usize)
///     .num_col(128usize)
///     .pitch_row(88e-9)
///     .pitch_col(88e-9)
///     .sar_adc(true)
///     .build()?;
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Builder)]
#[builder(pattern = "owned", setter(into), build_fn(error = "ConfigError"))]
pub struct SubArrayConfig {
    pub cell: CellConfig,

    #[serde(default)]
    #[builder(default)]
    pub tech: Technology,

    pub num_row: usize,
    pub num_col: usize,

    /// Physical height of one cell row
    pub pitch_row: f64,
    /// Physical width of one cell column
    pub pitch_col: f64,

    #[serde(default = "default_activity")]
    #[builder(default = "default_activity()")]
    pub activity_row_read: f64,
    #[serde(default = "default_activity")]
    #[builder(default = "default_activity()")]
    pub activity_row_write: f64,
    #[serde(default = "default_activity")]
    #[builder(default = "default_activity()")]
    pub activity_col_write: f64,
    #[serde(default = "default_activity")]
    #[builder(default = "default_activity()")]
    pub activity_bp_col_read: f64,

    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub avg_weight_bit: usize,
    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub num_cell_per_synapse: usize,

    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub num_read_pulse: usize,
    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub num_read_pulse_bp: usize,
    #[serde(default)]
    #[builder(default)]
    pub total_num_write_pulse: f64,
    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub num_write_cell_per_operation: usize,

    #[serde(default)]
    #[builder(default)]
    pub mode: ModeFlags,
    #[serde(default)]
    #[builder(default)]
    pub read_scheme: ReadScheme,
    #[serde(default)]
    #[builder(default)]
    pub parallel_bp: bool,

    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub num_col_muxed: usize,
    #[serde(default = "default_one")]
    #[builder(default = "1")]
    pub num_row_muxed_bp: usize,

    #[serde(default)]
    #[builder(default)]
    pub sar_adc: bool,

    #[serde(default)]
    #[builder(default)]
    pub training_estimation: bool,
    #[serde(default)]
    #[builder(default)]
    pub layer_number: usize,
}

fn default_activity() -> f64 {
    0.5
}

fn default_one() -> usize {
    1
}

impl SubArrayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> CimResult<Self> {
        let path: &Path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| format!("read subarray config '{:?}'", path))?;
        let config: SubArrayConfig = serde_json::from_str(&content).context("parse subarray config")?;
        Ok(config)
    }

    /// Check geometry, denominators and mode flags before any block is touched.
    pub fn validate(&self) -> Result<Mode, ConfigError> {
        check_config!(self.num_row > 0, ConfigError::UndefinedGeometry("num_row"));
        check_config!(self.num_col > 0, ConfigError::UndefinedGeometry("num_col"));
        Self::check_positive("pitch_row", self.pitch_row)?;
        Self::check_positive("pitch_col", self.pitch_col)?;

        for (name, value) in [
            ("avg_weight_bit", self.avg_weight_bit),
            ("num_cell_per_synapse", self.num_cell_per_synapse),
            ("num_read_pulse", self.num_read_pulse),
            ("num_read_pulse_bp", self.num_read_pulse_bp),
            ("num_write_cell_per_operation", self.num_write_cell_per_operation),
            ("num_col_muxed", self.num_col_muxed),
            ("num_row_muxed_bp", self.num_row_muxed_bp),
        ] {
            check_config!(value >= 1, ConfigError::ZeroDenominator(name));
        }
        check_config!(self.num_col_muxed <= self.num_col,
            "num_col_muxed '{}' > num_col '{}'", self.num_col_muxed, self.num_col);
        check_config!(self.num_row_muxed_bp <= self.num_row,
            "num_row_muxed_bp '{}' > num_row '{}'", self.num_row_muxed_bp, self.num_row);

        for (name, value) in [
            ("activity_row_read", self.activity_row_read),
            ("activity_row_write", self.activity_row_write),
            ("activity_col_write", self.activity_col_write),
            ("activity_bp_col_read", self.activity_bp_col_read),
            ("total_num_write_pulse", self.total_num_write_pulse),
            ("cell.res_mem_cell_avg", self.cell.res_mem_cell_avg),
            ("cell.cap_access_gate", self.cell.cap_access_gate),
            ("cell.cap_access_drain", self.cell.cap_access_drain),
            ("cell.write_pulse_width", self.cell.write_pulse_width),
            ("tech.wire_cap_per_meter", self.tech.wire_cap_per_meter),
            ("tech.row_wire_resistance", self.tech.row_wire_resistance),
            ("tech.col_wire_resistance", self.tech.col_wire_resistance),
        ] {
            Self::check_non_negative(name, value)?;
        }

        let mode = Mode::select(&self.mode, self.read_scheme)?;
        debug!("select mode '{}' for {}x{} subarray", mode, self.num_row, self.num_col);
        Ok(mode)
    }

    /// Physical length of one row, spans all columns
    pub fn length_row(&self) -> f64 {
        self.num_col as f64 * self.pitch_col
    }

    /// Physical length of one column, spans all rows
    pub fn length_col(&self) -> f64 {
        self.num_row as f64 * self.pitch_row
    }

    fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
        check_config!(value.is_finite() && value > 0.0, ConfigError::InvalidPhysical(name, value));
        Ok(())
    }

    fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
        check_config!(value.is_finite() && value >= 0.0, ConfigError::InvalidPhysical(name, value));
        Ok(())
    }
}
