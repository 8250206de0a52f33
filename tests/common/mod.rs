#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use cimarray::config::{
    AccessType, CellConfig, MemCellType, Mode, ModeFlags, ReadScheme, SubArrayConfigBuilder,
};
use cimarray::periphery::{
    AreaConstraint, AreaModify, BlockArea, BlockKind, BlockSizing, BlockTiming, LatencyRequest,
    Orientation, Parasitics, PeripheralModel,
};

pub const BLOCK_WIDTH: f64 = 2e-6;
pub const BLOCK_HEIGHT: f64 = 1e-6;
pub const RAMP_OUTPUT: f64 = 1e9;

/// Fixed dimensions and per-operation delays for one kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBlock {
    pub width: f64,
    pub height: f64,
    pub read: f64,
    pub write: f64,
}

/// Periphery with fixed numbers per block that records every latency request.
///
/// The free dimension of a block is `BLOCK_WIDTH`/`BLOCK_HEIGHT`, per-operation read delay is
/// `(kind index + 1) * 1ns`, so every aggregate can be checked exactly.
#[derive(Debug, Default)]
pub struct FixedPeriphery {
    pub overrides: HashMap<BlockKind, FixedBlock>,
    pub requests: Mutex<Vec<(BlockSizing, LatencyRequest)>>,
}

impl FixedPeriphery {
    pub fn with(mut self, kind: BlockKind, block: FixedBlock) -> Self {
        self.overrides.insert(kind, block);
        self
    }

    pub fn block(&self, kind: BlockKind) -> FixedBlock {
        self.overrides.get(&kind).copied().unwrap_or(FixedBlock {
            width: BLOCK_WIDTH,
            height: BLOCK_HEIGHT,
            read: (kind as usize + 1) as f64 * 1e-9,
            write: (kind as usize + 1) as f64 * 2e-9,
        })
    }

    pub fn requests_for(&self, kind: BlockKind, orientation: Orientation) -> Vec<LatencyRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s.kind == kind && s.orientation == orientation)
            .map(|(_, r)| *r)
            .collect()
    }
}

impl PeripheralModel for FixedPeriphery {
    fn area(&self, sizing: &BlockSizing, constraint: &AreaConstraint) -> BlockArea {
        let block = self.block(sizing.kind);
        let (height, width) = match (constraint.height, constraint.width, constraint.modify) {
            (Some(height), Some(width), AreaModify::Override) => (height, width),
            (_, Some(width), _) => (block.height, width),
            (Some(height), None, _) => (height, block.width),
            (None, None, _) => (block.height, block.width),
        };
        BlockArea { width, height, area: width * height }
    }

    fn latency(&self, sizing: &BlockSizing, request: &LatencyRequest) -> BlockTiming {
        self.requests.lock().unwrap().push((*sizing, *request));
        let block = self.block(sizing.kind);
        BlockTiming {
            read_latency: block.read * request.num_read,
            write_latency: block.write * request.num_write,
            ramp_output: RAMP_OUTPUT,
        }
    }

    fn parasitics(&self, _sizing: &BlockSizing) -> Parasitics {
        Parasitics { cap_tg_gate_n: 1e-16, cap_tg_gate_p: 2e-16, cap_tg_drain: 3e-16 }
    }
}

pub fn cell(access_type: AccessType) -> CellConfig {
    CellConfig {
        mem_cell_type: MemCellType::Rram,
        access_type,
        res_mem_cell_avg: 1e5,
        cap_access_gate: 1e-17,
        cap_access_drain: 2e-17,
        write_pulse_width: 10e-9,
    }
}

/// 128x128 CMOS-access array in the mode described by `flags`
pub fn builder(flags: ModeFlags, scheme: ReadScheme) -> SubArrayConfigBuilder {
    SubArrayConfigBuilder::default()
        .cell(cell(AccessType::CmosAccess))
        .num_row(128usize)
        .num_col(128usize)
        .pitch_row(100e-9)
        .pitch_col(100e-9)
        .mode(flags)
        .read_scheme(scheme)
}

/// One flag set per mode
pub fn all_modes() -> Vec<(ModeFlags, ReadScheme, Mode)> {
    vec![
        (ModeFlags { conventional_sequential: true, ..Default::default() }, ReadScheme::Parallel, Mode::ConventionalSequential),
        (ModeFlags { conventional_parallel: true, ..Default::default() }, ReadScheme::Parallel, Mode::ConventionalParallel),
        (ModeFlags { bnn_sequential: true, ..Default::default() }, ReadScheme::Parallel, Mode::BinarySequential),
        (ModeFlags { xnor_parallel: true, ..Default::default() }, ReadScheme::Sequential, Mode::BinaryParallel),
        (ModeFlags::default(), ReadScheme::Parallel, Mode::DefaultParallel),
        (ModeFlags::default(), ReadScheme::Sequential, Mode::DefaultSequential),
    ]
}
