use std::fmt::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum MemCellType {
    #[serde(rename = "RRAM")]
    Rram,

    #[serde(rename = "FeFET")]
    FeFet,
}

/// How a cell is selected along its wordline
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum AccessType {
    /// 1T1R: an access transistor gates every cell, the wordline drives transistor gates
    #[serde(rename = "CMOS")]
    CmosAccess,

    /// Cross-point: no access device, the wordline drives the cells directly
    #[serde(rename = "none")]
    NoneAccess,
}

/// Electrical descriptor of one memory cell. 
/// 
/// All values are SI: ohm, farad, second.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CellConfig {
    pub mem_cell_type: MemCellType,
    pub access_type: AccessType,

    /// Average cell resistance over the programmed states
    pub res_mem_cell_avg: f64,

    /// Gate capacitance of the access transistor, loads the wordline
    #[serde(default)]
    pub cap_access_gate: f64,

    /// Drain capacitance of the access transistor, loads the bitline
    #[serde(default)]
    pub cap_access_drain: f64,

    pub write_pulse_width: f64,
}

impl CellConfig {
    pub fn is_cmos_access(&self) -> bool {
        self.access_type == AccessType::CmosAccess
    }
}

impl Display for MemCellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rram => write!(f, "RRAM"),
            Self::FeFet => write!(f, "FeFET"),
        }
    }
}

impl Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CmosAccess => write!(f, "CMOS"),
            Self::NoneAccess => write!(f, "none"),
        }
    }
}
