use anyhow::{Context, Result};
use clap::Parser;
use initphase::{
    options::extract_init_phase_file, Controller, Formula, HintSummary, Literal, Options, Outcome,
    Phase, Search, Solver, StatsSnapshot,
};
use serde::Serialize;
use std::{env, ffi::OsString, fs::File, path::PathBuf, process::ExitCode, time::Duration};

/// DPLL solver with phase saving. Initial phases are read from `--init-phase-file=PATH`.
#[derive(Debug, Parser)]
struct Args {
    /// DIMACS CNF input
    input: PathBuf,
    /// Soft time limit, the search stops at its next poll after the alarm
    #[clap(long)]
    timeout_secs: Option<u64>,
    /// Do not print `c` lines
    #[clap(short, long)]
    quiet: bool,
    /// Decide with saved phases only
    #[clap(long)]
    no_target: bool,
    /// Polarity of variables without a stored phase
    #[clap(long, default_value_t = true, action = clap::ArgAction::Set)]
    initial_phase: bool,
    /// Write a JSON report of the run
    #[clap(long)]
    report: Option<PathBuf>,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            quiet: self.quiet,
            target: !self.no_target,
            initial_phase: Phase::from(self.initial_phase),
        }
    }
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    input: &'a PathBuf,
    status: &'static str,
    variables: usize,
    init_phase: Option<HintSummary>,
    statistics: StatsSnapshot,
}

fn print_model(model: &[Literal]) {
    for chunk in model.chunks(10) {
        let line: Vec<String> = chunk.iter().map(|lit| lit.as_dimacs().to_string()).collect();
        println!("v {}", line.join(" "));
    }
    println!("v 0");
}

fn run(solver: &mut Solver, args: &Args) -> Result<Outcome> {
    let formula = Formula::from_dimacs_file(&args.input)?;
    solver.message(format_args!(
        "parsed {} variables and {} clauses",
        formula.vars(),
        formula.clauses().len()
    ));
    solver.resize(formula.vars())?;

    let init_phase = solver.load_initial_phases()?;
    if let Some(summary) = &init_phase {
        solver.message(format_args!("{summary}"));
    }

    let outcome = Search::new(&formula).run(solver);
    let statistics = solver.statistics().snapshot();
    if !solver.options().quiet {
        print!("{statistics}");
    }
    println!("s {}", outcome.status());
    if let Outcome::Sat(model) = &outcome {
        print_model(model);
    }

    if let Some(path) = &args.report {
        let report = Report {
            input: &args.input,
            status: outcome.status(),
            variables: solver.vars(),
            init_phase,
            statistics,
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create report '{}'", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
    }
    Ok(outcome)
}

fn main() -> ExitCode {
    env_logger::init();
    let mut argv: Vec<OsString> = env::args_os().collect();
    let init_phase_file = extract_init_phase_file(&mut argv);
    let args = Args::parse_from(argv);

    let mut solver = Solver::new(args.options());
    if let Some(path) = init_phase_file {
        solver.set_init_phase_file(path);
    }

    let mut controller = Controller::default();
    let timeout = args.timeout_secs.map(Duration::from_secs);
    if let Err(err) = controller.arm(solver.handle(), timeout) {
        println!("c error: failed to install signal handlers: {err}");
        return ExitCode::FAILURE;
    }

    let result = run(&mut solver, &args);
    controller.teardown(solver);

    match result {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(err) => {
            println!("c error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
