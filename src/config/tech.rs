use serde::{Deserialize, Serialize};

/// 0.2 fF per micron of routed wire
pub const DEFAULT_WIRE_CAP_PER_METER: f64 = 0.2e-15 / 1e-6;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Technology {
    /// Feature size in meter
    pub feature_size: f64,

    /// Wire capacitance in F/m
    pub wire_cap_per_meter: f64,

    /// Unit wire resistance of the row routing layer in ohm/m
    pub row_wire_resistance: f64,

    /// Unit wire resistance of the column routing layer in ohm/m
    pub col_wire_resistance: f64,
}

impl Default for Technology {
    fn default() -> Self {
        Self {
            feature_size: 22e-9,
            wire_cap_per_meter: DEFAULT_WIRE_CAP_PER_METER,
            row_wire_resistance: 1.25e7,
            col_wire_resistance: 2.0e7,
        }
    }
}
