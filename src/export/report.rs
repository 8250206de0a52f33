use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::Context;
use serde::Serialize;
use tracing::info;
use crate::config::Mode;
use crate::periphery::PeripheralBlock;
use crate::subarray::{AreaResult, LatencyResult, SubArray};

/// Both estimates of one subarray, as written to disk or stdout
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: Mode,
    pub area: AreaResult,
    pub latency: LatencyResult,
}

impl Report {
    pub fn estimate(subarray: &SubArray) -> Self {
        Self {
            mode: subarray.mode(),
            area: subarray.compute_area(),
            latency: subarray.compute_latency(),
        }
    }
}

pub fn write_report<P: AsRef<Path>>(report: &Report, path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    info!("write report to {:?}", path);
    let file = File::create(path).with_context(|| format!("create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("serialize report")?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Per-block table, one line per instantiated block
pub fn write_block_table<W: Write>(writer: &mut W, report: &Report) -> anyhow::Result<()> {
    writeln!(writer, "{:<24} {:>12} {:>12} {:>12} {:>12} {:>12}", "block", "width", "height", "area", "read", "write")?;
    for area in report.area.blocks.iter() {
        let timing = find_timing(&report.latency.blocks, area);
        writeln!(
            writer,
            "{:<24} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e} {:>12.4e}",
            area.to_string(),
            area.width(),
            area.height(),
            area.area(),
            timing.map(|b| b.read_latency()).unwrap_or(0.0),
            timing.map(|b| b.write_latency()).unwrap_or(0.0),
        )?;
    }
    Ok(())
}

fn find_timing<'a>(blocks: &'a [PeripheralBlock], target: &PeripheralBlock) -> Option<&'a PeripheralBlock> {
    blocks.iter().find(|b| b.kind() == target.kind() && b.orientation() == target.orientation())
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;
    use crate::config::{AccessType, CellConfig, MemCellType, SubArrayConfigBuilder};
    use super::*;

    fn report() -> Report {
        let config = SubArrayConfigBuilder::default()
            .cell(CellConfig {
                mem_cell_type: MemCellType::FeFet,
                access_type: AccessType::NoneAccess,
                res_mem_cell_avg: 2e5,
                cap_access_gate: 0.0,
                cap_access_drain: 0.0,
                write_pulse_width: 50e-9,
            })
            .num_row(64usize)
            .num_col(64usize)
            .pitch_row(100e-9)
            .pitch_col(100e-9)
            .sar_adc(true)
            .build()
            .unwrap();
        Report::estimate(&SubArray::with_analytic(config).unwrap())
    }

    #[test]
    fn test_write_report() {
        let report = report();
        let file = NamedTempFile::new().unwrap();
        write_report(&report, file.path()).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["mode"], "default_parallel");
        assert!(value["area"]["used_area"].as_f64().unwrap() > 0.0);
        assert!(value["latency"]["read_latency"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_block_table() {
        let report = report();
        let mut buffer = Vec::new();
        write_block_table(&mut buffer, &report).unwrap();
        let table = String::from_utf8(buffer).unwrap();
        assert!(table.contains("sarADC"));
        assert!(table.contains("wlSwitchMatrix"));
        assert!(!table.contains("wlDecoder"));
        assert_eq!(table.lines().count(), 1 + report.area.blocks.len());
    }
}
