//! Command-line takeoff: reads DXF files and prints the bill of quantities as JSON.
//!
//! Usage:
//!   rebar-takeoff plan.dxf
//!   rebar-takeoff --pretty --stock-length-m 6 floor1.dxf floor2.dxf

use anyhow::bail;
use clap::Parser;
use log::warn;
use rebar_takeoff::io::dxf::code_page::resolve_encoding_name;
use rebar_takeoff::{analyze_files, EstimationPolicy, Takeoff, TakeoffConfiguration};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rebar-takeoff",
    version,
    about = "Reinforcement bill of quantities from DXF annotations"
)]
struct Args {
    /// DXF files to analyse
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Length assumed for bar callouts without L=
    #[arg(long, default_value_t = 100)]
    fallback_length_cm: u32,

    /// Run length a stirrup spacing is applied over
    #[arg(long, default_value_t = 300)]
    stirrup_run_cm: u32,

    /// Bar length of a single stirrup
    #[arg(long, default_value_t = 150)]
    stirrup_perimeter_cm: u32,

    /// Commercial stock bar length
    #[arg(long, default_value_t = 12.0)]
    stock_length_m: f64,

    /// Do not group callouts under element labels
    #[arg(long)]
    no_elements: bool,

    /// Encoding for non-UTF-8 text when the drawing declares none (e.g. ANSI_1254, windows-1254)
    #[arg(long)]
    encoding: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Include notifications (skipped pairs, rejected callouts) in the output
    #[arg(long)]
    notifications: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(flatten)]
    report: &'a rebar_takeoff::QuantityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    notifications: Option<&'a rebar_takeoff::NotificationCollection>,
}

impl<'a> Output<'a> {
    fn new(takeoff: &'a Takeoff, with_notifications: bool) -> Self {
        Self {
            report: &takeoff.report,
            notifications: with_notifications.then_some(&takeoff.notifications),
        }
    }
}

fn configuration(args: &Args) -> anyhow::Result<TakeoffConfiguration> {
    let policy = EstimationPolicy {
        fallback_bar_length_cm: args.fallback_length_cm,
        stirrup_run_length_cm: args.stirrup_run_cm,
        stirrup_perimeter_cm: args.stirrup_perimeter_cm,
        stock_bar_length_m: args.stock_length_m,
    };
    let mut config = TakeoffConfiguration::default()
        .with_policy(policy)
        .with_element_attribution(!args.no_elements);
    if let Some(name) = &args.encoding {
        match resolve_encoding_name(name) {
            Some(encoding) => config = config.with_fallback_encoding(encoding),
            None => bail!("unknown encoding '{}'", name),
        }
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = configuration(&args)?;
    let results = analyze_files(&args.files, &config);

    let mut outputs = Vec::with_capacity(results.len());
    for (path, result) in args.files.iter().zip(&results) {
        let takeoff = match result {
            Ok(takeoff) => takeoff,
            Err(e) => bail!("failed to read {}: {}", path.display(), e),
        };
        if takeoff.report.is_empty() {
            warn!("{}: no reinforcement data found", path.display());
        }
        outputs.push((path.display().to_string(), Output::new(takeoff, args.notifications)));
    }

    let json = if outputs.len() == 1 {
        to_json(&outputs[0].1, args.pretty)?
    } else {
        let keyed: indexmap::IndexMap<_, _> = outputs.into_iter().collect();
        to_json(&keyed, args.pretty)?
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
