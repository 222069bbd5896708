use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use budget_tracker::budget::Period;
use budget_tracker::chart::{BarChart, DEFAULT_CHART_WIDTH};
use budget_tracker::session::Session;
use budget_tracker::store::DEFAULT_DATA_FILE;
use budget_tracker::tracker::Tracker;

const PROMPT: &str = "budget> ";

#[derive(Debug, Parser)]
#[command(name = "budget-tracker", version, about = "Log expenses and chart weekly or monthly totals")]
struct Cli {
    /// Ledger CSV file, created on first use.
    #[arg(short, long, env = "BUDGET_TRACKER_FILE", default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Record an expense dated now.
    Add {
        category: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// List the known categories.
    Categories,
    /// Chart the totals for a period.
    Report {
        /// weekly or monthly
        period: Period,
        #[arg(short, long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,
    },
    /// Interactive session, reads commands from stdin.
    Shell {
        #[arg(short, long, default_value_t = DEFAULT_CHART_WIDTH)]
        width: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut tracker =
        Tracker::open(&cli.file).with_context(|| format!("failed to open ledger {}", cli.file.display()))?;
    info!(
        "opened ledger, path={}, records={}",
        tracker.store().path().display(),
        tracker.store().len()
    );

    match cli.command.unwrap_or(Command::Shell {
        width: DEFAULT_CHART_WIDTH,
    }) {
        Command::Add { category, amount } => {
            tracker.add_expense(&category, &amount)?;
            println!("Expense added successfully!");
        },
        Command::Categories => {
            for name in tracker.categories().list() {
                println!("{}", name);
            }
        },
        Command::Report { period, width } => {
            let report = tracker.report(period);
            print!("{}", BarChart::new(&report).with_width(width));
        },
        Command::Shell { width } => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            let mut session = Session::new(&mut tracker, stdin.lock(), io::stdout()).with_chart_width(width);
            if interactive {
                session = session.with_prompt(PROMPT);
            }
            session.run()?;
        },
    }

    Ok(())
}
