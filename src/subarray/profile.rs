use crate::config::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDriveStyle {
    /// Decoder plus driver, one row at a time
    DecoderDriver,
    /// Switch matrix, all rows at once
    SwitchMatrix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadoutStyle {
    /// SAR ADC or multilevel sense amp with encoder
    MultiLevel,
    /// Binary current comparator
    CurrentSense,
}

/// Which blocks a mode instantiates and how they are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    pub row_drive: RowDriveStyle,
    pub readout: ReadoutStyle,
    /// The multilevel encoder only exists for multi-bit weights
    pub gated_encoder: bool,
    /// Adder + register behind the readout
    pub accumulate: bool,
    pub shift_add: bool,
    /// Transposed readout chain when training is estimated
    pub backprop: bool,
    pub parallel_read: bool,
}

impl From<Mode> for ModeProfile {
    fn from(mode: Mode) -> Self {
        use RowDriveStyle::*;
        use ReadoutStyle::*;

        let (row_drive, readout, gated_encoder, accumulate, shift_add, backprop) = match mode {
            Mode::ConventionalSequential => (DecoderDriver, MultiLevel, true,  true,  true,  true),
            Mode::ConventionalParallel   => (SwitchMatrix,  MultiLevel, false, false, true,  true),
            Mode::BinarySequential       => (DecoderDriver, CurrentSense, false, true, false, false),
            Mode::BinaryParallel         => (SwitchMatrix,  MultiLevel, false, false, false, false),
            Mode::DefaultParallel        => (SwitchMatrix,  MultiLevel, false, false, true,  false),
            Mode::DefaultSequential      => (DecoderDriver, MultiLevel, true,  true,  true,  false),
        };

        Self {
            row_drive,
            readout,
            gated_encoder,
            accumulate,
            shift_add,
            backprop,
            parallel_read: mode.is_parallel(),
        }
    }
}
