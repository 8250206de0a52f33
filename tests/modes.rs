mod common;

use std::io::Write;
use std::sync::Arc;
use std::thread;
use approx::assert_relative_eq;
use tempfile::NamedTempFile;
use cimarray::config::{ConfigError, Mode, ModeFlags, ReadScheme, SubArrayConfig};
use cimarray::periphery::{AnalyticPeriphery, BlockKind};
use cimarray::subarray::{ReadoutStyle, SubArray};
use cimarray::CimError;
use common::{all_modes, builder, FixedPeriphery};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn every_mode_selectable() -> TestResult {
    for (flags, scheme, mode) in all_modes() {
        let subarray = SubArray::new(builder(flags, scheme).build()?, Arc::new(FixedPeriphery::default()))?;
        assert_eq!(subarray.mode(), mode);
        assert_eq!(subarray.profile().parallel_read, mode.is_parallel());
    }
    Ok(())
}

#[test]
fn ambiguous_mode_rejected_before_blocks() -> TestResult {
    let flags = ModeFlags { bnn_sequential: true, xnor_sequential: true, ..Default::default() };
    let model = Arc::new(FixedPeriphery::default());
    let result = SubArray::new(builder(flags, ReadScheme::Sequential).build()?, model.clone());
    assert!(matches!(result, Err(CimError::Config(ConfigError::AmbiguousMode(_)))));
    assert!(model.requests.lock().unwrap().is_empty());
    Ok(())
}

#[test]
fn binary_sequential_uses_current_sense() -> TestResult {
    let flags = ModeFlags { xnor_sequential: true, ..Default::default() };
    let config = builder(flags, ReadScheme::Parallel).sar_adc(true).num_read_pulse(4usize).build()?;
    let subarray = SubArray::new(config, Arc::new(FixedPeriphery::default()))?;
    assert_eq!(subarray.profile().readout, ReadoutStyle::CurrentSense);

    let area = subarray.compute_area();
    let kinds: Vec<BlockKind> = area.blocks.iter().map(|b| b.kind()).collect();
    assert!(kinds.contains(&BlockKind::RowCurrentSenseAmp));
    assert!(kinds.contains(&BlockKind::Adder));
    assert!(!kinds.contains(&BlockKind::SarAdc));
    assert!(!kinds.contains(&BlockKind::ShiftAddInput));
    Ok(())
}

#[test]
fn encoder_gating() -> TestResult {
    let count = |flags: ModeFlags, scheme: ReadScheme, bits: usize| -> Result<usize, Box<dyn std::error::Error>> {
        let config = builder(flags, scheme).avg_weight_bit(bits).build()?;
        let area = SubArray::new(config, Arc::new(FixedPeriphery::default()))?.compute_area();
        Ok(area.blocks.iter().filter(|b| b.kind() == BlockKind::MultilevelSaEncoder).count())
    };
    let sequential = ModeFlags { conventional_sequential: true, ..Default::default() };
    let parallel = ModeFlags { conventional_parallel: true, ..Default::default() };

    assert_eq!(count(sequential, ReadScheme::Parallel, 1)?, 0);
    assert_eq!(count(sequential, ReadScheme::Parallel, 4)?, 1);
    assert_eq!(count(parallel, ReadScheme::Parallel, 1)?, 1);
    assert_eq!(count(ModeFlags::default(), ReadScheme::Sequential, 1)?, 0);
    Ok(())
}

#[test]
fn load_from_json() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{
        "cell": {{
            "mem_cell_type": "RRAM",
            "access_type": "CMOS",
            "res_mem_cell_avg": 1e5,
            "cap_access_gate": 1e-17,
            "cap_access_drain": 2e-17,
            "write_pulse_width": 1e-8
        }},
        "tech": {{ "feature_size": 14e-9 }},
        "num_row": 256,
        "num_col": 128,
        "pitch_row": 1e-7,
        "pitch_col": 1e-7,
        "read_scheme": "sequential",
        "num_col_muxed": 8,
        "avg_weight_bit": 2
    }}"#)?;

    let config = SubArrayConfig::load(file.path())?;
    assert_eq!(config.tech.feature_size, 14e-9);
    assert!(config.tech.row_wire_resistance > 0.0);
    let subarray = SubArray::with_analytic(config)?;
    assert_eq!(subarray.mode(), Mode::DefaultSequential);

    let latency = subarray.compute_latency();
    assert!(latency.read_latency.is_finite() && latency.read_latency > 0.0);
    Ok(())
}

#[test]
fn load_reports_context() {
    let err = SubArrayConfig::load("./no/such/config.json").unwrap_err();
    assert!(err.to_string().starts_with("read subarray config"));
}

#[test]
fn shared_across_threads() -> TestResult {
    let flags = ModeFlags { conventional_sequential: true, ..Default::default() };
    let config = builder(flags, ReadScheme::Parallel)
        .num_col_muxed(4usize)
        .training_estimation(true)
        .layer_number(1usize)
        .build()?;
    let subarray = Arc::new(SubArray::new(config, Arc::new(AnalyticPeriphery::default()))?);
    let expected_area = subarray.compute_area();
    let expected_latency = subarray.compute_latency();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let subarray = subarray.clone();
            thread::spawn(move || (subarray.compute_area(), subarray.compute_latency()))
        })
        .collect();

    for handle in handles {
        let (area, latency) = handle.join().map_err(|_| "estimation thread panicked")?;
        assert_relative_eq!(area.used_area, expected_area.used_area);
        assert_relative_eq!(area.area, expected_area.area);
        assert_relative_eq!(latency.read_latency, expected_latency.read_latency);
        assert_relative_eq!(latency.read_latency_ag, expected_latency.read_latency_ag);
        assert_relative_eq!(latency.write_latency, expected_latency.write_latency);
    }
    Ok(())
}
