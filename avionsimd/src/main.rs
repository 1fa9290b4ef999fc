//! # AvionSim Daemon
//!
//! Command-line entry point for the host scheduler daemon.

use avionsimd::{run, DaemonConfig};
use core_types::{TaskKind, TaskParams};
use std::env;
use std::process;
use timer_hal::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(&args[0]);
        process::exit(1);
    });

    if let Err(e) = run(config) {
        eprintln!("Daemon error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<DaemonConfig, String> {
    let mut config = DaemonConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--runtime" | "-r" => {
                i += 1;
                let secs: u64 = parse_value(args, i, "--runtime")?;
                config.runtime = if secs == 0 {
                    None
                } else {
                    Some(Duration::from_secs(secs))
                };
            }
            "--dispatch-interval" => {
                i += 1;
                let millis: u64 = parse_value(args, i, "--dispatch-interval")?;
                config.dispatch_interval = Duration::from_millis(millis);
            }
            "--task" | "-t" => {
                i += 1;
                let spec = args
                    .get(i)
                    .ok_or_else(|| "Missing value for --task".to_string())?;
                config.overrides.push(parse_task_override(spec)?);
            }
            "--disable" => {
                i += 1;
                let name = args
                    .get(i)
                    .ok_or_else(|| "Missing value for --disable".to_string())?;
                config.disabled.push(parse_task_kind(name)?);
            }
            "--status-file" | "-s" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "Missing value for --status-file".to_string())?;
                config.status_file = Some(path.into());
            }
            "--status-interval" => {
                i += 1;
                let millis: u64 = parse_value(args, i, "--status-interval")?;
                config.status_interval = Duration::from_millis(millis);
            }
            "--export-log" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| "Missing value for --export-log".to_string())?;
                config.export_log = Some(path.into());
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn parse_value(args: &[String], index: usize, option: &str) -> Result<u64, String> {
    let raw = args
        .get(index)
        .ok_or_else(|| format!("Missing value for {}", option))?;
    raw.parse()
        .map_err(|_| format!("Invalid value for {}: {}", option, raw))
}

/// Parses `<kind>:<period_ms>,<deadline_ms>,<workload_ms>`
fn parse_task_override(spec: &str) -> Result<(TaskKind, TaskParams), String> {
    let (name, numbers) = spec
        .split_once(':')
        .ok_or_else(|| format!("Invalid task override (expected kind:p,d,w): {}", spec))?;
    let kind = parse_task_kind(name)?;

    let parts: Vec<&str> = numbers.split(',').collect();
    if parts.len() != 3 {
        return Err(format!(
            "Invalid task override (expected three values): {}",
            spec
        ));
    }
    let mut values = [0u64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("Invalid number in task override: {}", part))?;
    }

    Ok((kind, TaskParams::from_millis(values[0], values[1], values[2])))
}

fn parse_task_kind(name: &str) -> Result<TaskKind, String> {
    match name {
        "attitude" => Ok(TaskKind::FlightAttitude),
        "engine" => Ok(TaskKind::EngineControl),
        "nav" => Ok(TaskKind::Navigation),
        "comm" => Ok(TaskKind::Communication),
        "cabin" => Ok(TaskKind::CabinSystems),
        other => Err(format!(
            "Unknown task kind: {} (expected attitude, engine, nav, comm, or cabin)",
            other
        )),
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -r, --runtime <SECS>          Total runtime in seconds (0 = run until killed,");
    eprintln!("                                default 10)");
    eprintln!("      --dispatch-interval <MS>  Dispatch poll cadence in milliseconds (default 10)");
    eprintln!("  -t, --task <KIND:P,D,W>       Override a task's period, deadline, and workload");
    eprintln!("                                in milliseconds (repeatable)");
    eprintln!("      --disable <KIND>          Exclude a task from scheduling (repeatable)");
    eprintln!("  -s, --status-file <FILE>      Publish the status report to FILE periodically");
    eprintln!("      --status-interval <MS>    Publish/poll cadence in milliseconds (default 500)");
    eprintln!("      --export-log <FILE>       Write the execution log as JSON at exit");
    eprintln!("  -h, --help                    Show this help message");
    eprintln!();
    eprintln!("Task kinds: attitude, engine, nav, comm, cabin");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --runtime 10 --status-file /tmp/avionics_status", program);
    eprintln!("  {} --task attitude:100,50,80 --export-log trace.json", program);
}
