use std::{path::PathBuf, sync::Arc};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use clap::Parser;
use cimarray::{
    config::SubArrayConfig,
    export::{self, Report},
    periphery::AnalyticPeriphery,
    subarray::SubArray,
    ErrorContext
};

fn main_result() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.level())
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();

    // load config
    let config: Config = {
        let context = std::fs::read_to_string(&args.config).context("read config file")?;
        serde_json::from_str(&context).context("parse config file")?
    };

    // load periphery model
    let periphery = config.periphery.unwrap_or_default();
    periphery.validate().context("check periphery model")?;

    // estimate
    let subarray = SubArray::new(config.subarray, Arc::new(periphery)).context("create subarray")?;
    let report = Report::estimate(&subarray);

    info!("mode: {}", report.mode);
    info!("area: {:.4e} m^2 (used {:.4e}, empty {:.4e})", report.area.area, report.area.used_area, report.area.empty_area);
    info!("read latency: {:.4e} s, write latency: {:.4e} s", report.latency.read_latency, report.latency.write_latency);
    if args.verbose {
        let mut table = Vec::new();
        export::write_block_table(&mut table, &report)?;
        info!("blocks:\n{}", String::from_utf8_lossy(&table));
    }

    // write report
    match &args.output {
        Some(path) => export::write_report(&report, path)?,
        None => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn main() {
    if let Err(e) = main_result() {
        eprint!("Err: {}\n", e);
    }
}

#[derive(Parser, Debug)]
#[command(name = "cimarray")]
#[command(about = "Compute-in-memory subarray area and latency estimator", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: String,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub subarray: SubArrayConfig,
    pub periphery: Option<AnalyticPeriphery>,
}
