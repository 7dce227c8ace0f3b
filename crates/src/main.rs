// Entry point: program main
// Handles --config, --data, --log, --route, --help and runs the TUI

use shopdesk::catalog::{MemoryAccessor, ProductAccessor};
use shopdesk::config::load_settings;
use std::env;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    log: Option<PathBuf>,
    route: Option<String>,
    help: bool,
}

fn print_help() {
    println!("shopdesk - terminal admin shell for a product catalog");
    println!();
    println!("Usage:");
    println!("  shopdesk [options]");
    println!();
    println!("Options:");
    println!("  --config <file>  Settings file (JSON). Defaults to ./shopdesk.json when present.");
    println!("  --data <file>    Product collection (JSON). Defaults to the built-in sample.");
    println!("  --log <file>     Write logs to <file>. Filter with SHOPDESK_LOG (default: info).");
    println!("  --route <path>   Page to open first, e.g. /products.");
    println!("  --help           Show this help message.");
    println!();
    println!("Environment:");
    println!("  SHOPDESK_LOCALE, SHOPDESK_DARK_MODE, SHOPDESK_PAGE_SIZE, SHOPDESK_DATA_FILE,");
    println!("  SHOPDESK_LOG_FILE and friends override the settings file.");
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--help" || flag == "-h" {
            out.help = true;
            i += 1;
            continue;
        }
        let value = args
            .get(i + 1)
            .filter(|v| !v.starts_with("--"))
            .cloned();
        match (flag, value) {
            ("--config", Some(v)) => out.config = Some(PathBuf::from(v)),
            ("--data", Some(v)) => out.data = Some(PathBuf::from(v)),
            ("--log", Some(v)) => out.log = Some(PathBuf::from(v)),
            ("--route", Some(v)) => out.route = Some(v),
            ("--config" | "--data" | "--log" | "--route", None) => {
                return Err(format!("{flag} needs a value"));
            }
            _ => return Err(format!("unknown argument `{flag}` (try --help)")),
        }
        i += 2;
    }
    Ok(out)
}

fn init_logging(path: &Path) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("cannot open log file {}: {e}", path.display()))?;
    let filter = EnvFilter::try_from_env("SHOPDESK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    process::exit(2);
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args).unwrap_or_else(|e| fail(e));
    if cli.help {
        print_help();
        return;
    }

    let mut settings = load_settings(cli.config.as_deref()).unwrap_or_else(|e| fail(e));
    if let Some(data) = cli.data {
        settings.data_file = Some(data);
    }
    if let Some(log) = cli.log {
        settings.log_file = Some(log);
    }
    if let Some(route) = cli.route {
        settings.start_route = route;
    }
    if let Err(e) = settings.validate() {
        fail(e);
    }

    if let Some(path) = &settings.log_file {
        init_logging(path).unwrap_or_else(|e| fail(e));
    }

    let memory = match &settings.data_file {
        Some(path) => MemoryAccessor::from_file(path).unwrap_or_else(|e| fail(e)),
        None => MemoryAccessor::seeded(),
    };
    let accessor: Arc<dyn ProductAccessor> =
        Arc::new(memory.with_latency(Duration::from_millis(settings.latency_ms)));

    if let Err(e) = shopdesk::ui::run(settings, accessor).await {
        fail(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let cli = parse_args(&strings(&[
            "--config", "a.json", "--data", "p.json", "--log", "x.log", "--route", "/products",
        ]))
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.json")));
        assert_eq!(cli.data, Some(PathBuf::from("p.json")));
        assert_eq!(cli.log, Some(PathBuf::from("x.log")));
        assert_eq!(cli.route.as_deref(), Some("/products"));
        assert!(!cli.help);
    }

    #[test]
    fn rejects_missing_values_and_unknown_flags() {
        assert!(parse_args(&strings(&["--data"])).is_err());
        assert!(parse_args(&strings(&["--data", "--log", "x"])).is_err());
        assert!(parse_args(&strings(&["--frobnicate"])).is_err());
        assert!(parse_args(&strings(&["-h"])).unwrap().help);
    }
}
