//! dash-runner: headless driver for the pulse analytics pipeline.
//!
//! Usage:
//!   dash-runner --db pulse.db --list-periods
//!   dash-runner --db pulse.db --year 2022 --quarter 2 --overview
//!   dash-runner --db pulse.db --year 2022 --quarter 2 --case 3
//!   dash-runner --db pulse.db --ipc-mode
//!
//! In IPC mode the renderer shell drives the pipeline with JSON-lines
//! commands on stdin; render requests and notices come back as JSON
//! lines on stdout. Every command is a full synchronous re-run.

use anyhow::Result;
use pulse_core::{
    cases::{run_case, run_overview, BusinessCase, CaseOutcome},
    config::PulseConfig,
    error::PulseResult,
    period::Period,
    render::{deliver, ChartData, RenderRequest, RenderSink},
    store::PulseStore,
    types::{Quarter, Year},
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    ListPeriods,
    Overview { year: Year, quarter: Quarter },
    Case { id: u8, year: Year, quarter: Quarter },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str())
    {
        Some(path) => PulseConfig::load(path)?,
        None => PulseConfig::defaults(),
    };
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or(&config.db_path);

    // One connection for the whole process; a failed open is fatal and
    // reported here, never retried.
    let store = PulseStore::open(db)?;
    store.migrate()?;

    if args.iter().any(|a| a == "--ipc-mode") {
        return run_ipc_loop(&store, &config);
    }

    if args.iter().any(|a| a == "--list-periods") {
        let years = store.distinct_years()?;
        for year in years {
            let quarters = store.quarters_for_year(year)?;
            println!("{year}: {quarters:?}");
        }
        return Ok(());
    }

    let year = parse_arg(&args, "--year", 0);
    let quarter = parse_arg(&args, "--quarter", 0);
    let period = Period::select(&store, year, quarter)?;

    let outcome = if args.iter().any(|a| a == "--overview") {
        run_overview(&store, &config, &period)?
    } else {
        let id = parse_arg(&args, "--case", 1u8);
        let case = BusinessCase::try_from(id)?;
        println!("== {} ==", case.label());
        run_case(&store, &config, case, &period)?
    };
    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &CaseOutcome) {
    for request in &outcome.requests {
        let rows = match &request.data {
            ChartData::Table(frame) => frame.len(),
            ChartData::Matrix(pivot) => pivot.rows.len(),
        };
        println!("  [{:?}] {} ({rows} rows)", request.chart.kind, request.chart.title);
    }
    if let Some(notice) = &outcome.notice {
        println!("  (notice) {notice}");
    }
}

// ── IPC mode ─────────────────────────────────────────────────────────────────

/// Writes each render request and notice as one JSON line.
struct JsonLineSink<W: Write> {
    out: W,
}

impl<W: Write> RenderSink for JsonLineSink<W> {
    fn render(&mut self, request: &RenderRequest) -> PulseResult<()> {
        let line = serde_json::to_string(request)?;
        writeln!(self.out, "{line}").map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    }

    fn notice(&mut self, message: &str) -> PulseResult<()> {
        let line = serde_json::json!({ "notice": message });
        writeln!(self.out, "{line}").map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    }
}

fn run_ipc_loop(store: &PulseStore, config: &PulseConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::ListPeriods => match list_periods(store) {
                Ok(periods) => writeln!(stdout, "{}", serde_json::json!({ "periods": periods }))?,
                Err(e) => writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?,
            },
            IpcCommand::Overview { year, quarter } => {
                respond(store, config, &mut stdout, year, quarter, None)?;
            }
            IpcCommand::Case { id, year, quarter } => {
                respond(store, config, &mut stdout, year, quarter, Some(id))?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn list_periods(store: &PulseStore) -> PulseResult<Vec<(Year, Vec<Quarter>)>> {
    let mut periods = Vec::new();
    for year in store.distinct_years()? {
        periods.push((year, store.quarters_for_year(year)?));
    }
    Ok(periods)
}

/// Run one selection end to end and stream the outcome to stdout.
/// Selection errors go back to the shell as JSON; they never kill the loop.
fn respond(
    store: &PulseStore,
    config: &PulseConfig,
    stdout: &mut io::Stdout,
    year: Year,
    quarter: Quarter,
    case_id: Option<u8>,
) -> Result<()> {
    let outcome = (|| -> PulseResult<CaseOutcome> {
        let period = Period::select(store, year, quarter)?;
        match case_id {
            Some(id) => run_case(store, config, BusinessCase::try_from(id)?, &period),
            None => run_overview(store, config, &period),
        }
    })();

    match outcome {
        Ok(outcome) => {
            let mut sink = JsonLineSink { out: &mut *stdout };
            deliver(&mut sink, &outcome.requests, outcome.notice.as_deref())?;
        }
        Err(e) => {
            writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
        }
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
