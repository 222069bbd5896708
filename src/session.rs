use std::io::{BufRead, Write};

use anyhow::Result;
use enum_dispatch::enum_dispatch;
use log::{debug, warn};
use thiserror::Error;

use crate::budget::Period;
use crate::chart::{BarChart, DEFAULT_CHART_WIDTH};
use crate::tracker::Tracker;

const HELP: &str = "\
commands:
  add <category> <amount>   record an expense dated now
  category <name>           register a new category for this session
  categories                list known categories
  weekly                    chart the last seven days
  monthly                   chart the current month
  help                      show this message
  exit | quit               leave the session
quote names containing spaces, e.g. add \"Cell Phone\" 35";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown command {0:?}, type help for a list of commands")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Parse(#[from] shell_words::ParseError),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Context<'a> {
    pub tracker: &'a mut Tracker,
    pub out: &'a mut dyn Write,
    pub chart_width: usize,
}

#[enum_dispatch]
pub trait Execute {
    fn execute(&self, ctx: &mut Context) -> Result<Flow>;
}

#[enum_dispatch(Execute)]
#[derive(Debug, PartialEq)]
pub enum Command {
    AddExpense,
    AddCategory,
    ListCategories,
    ShowReport,
    Help,
    Exit,
}

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, SessionError> {
        let words = shell_words::split(line)?;
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command: Command = match (name.to_lowercase().as_str(), args) {
            ("add", [category, amount]) => AddExpense {
                category: category.clone(),
                amount: amount.clone(),
            }
            .into(),
            ("add", _) => return Err(SessionError::Usage("add <category> <amount>")),
            ("category", []) => return Err(SessionError::Usage("category <name>")),
            ("category", name) => AddCategory { name: name.join(" ") }.into(),
            ("categories", []) => ListCategories.into(),
            ("weekly", []) => ShowReport { period: Period::Weekly }.into(),
            ("monthly", []) => ShowReport { period: Period::Monthly }.into(),
            ("help", _) => Help.into(),
            ("exit" | "quit", _) => Exit.into(),
            _ => return Err(SessionError::UnknownCommand(line.trim().to_string())),
        };

        Ok(Some(command))
    }
}

#[derive(Debug, PartialEq)]
pub struct AddExpense {
    category: String,
    amount: String,
}

impl Execute for AddExpense {
    fn execute(&self, ctx: &mut Context) -> Result<Flow> {
        ctx.tracker.add_expense(&self.category, &self.amount)?;
        writeln!(ctx.out, "Expense added successfully!")?;

        Ok(Flow::Continue)
    }
}

#[derive(Debug, PartialEq)]
pub struct AddCategory {
    name: String,
}

impl Execute for AddCategory {
    fn execute(&self, ctx: &mut Context) -> Result<Flow> {
        let name = ctx.tracker.add_category(&self.name)?;
        writeln!(ctx.out, "Category '{}' added successfully!", name)?;

        Ok(Flow::Continue)
    }
}

#[derive(Debug, PartialEq)]
pub struct ListCategories;

impl Execute for ListCategories {
    fn execute(&self, ctx: &mut Context) -> Result<Flow> {
        for name in ctx.tracker.categories().list() {
            writeln!(ctx.out, "{}", name)?;
        }

        Ok(Flow::Continue)
    }
}

#[derive(Debug, PartialEq)]
pub struct ShowReport {
    period: Period,
}

impl Execute for ShowReport {
    fn execute(&self, ctx: &mut Context) -> Result<Flow> {
        let report = ctx.tracker.report(self.period);
        write!(ctx.out, "{}", BarChart::new(&report).with_width(ctx.chart_width))?;

        Ok(Flow::Continue)
    }
}

#[derive(Debug, PartialEq)]
pub struct Help;

impl Execute for Help {
    fn execute(&self, ctx: &mut Context) -> Result<Flow> {
        writeln!(ctx.out, "{}", HELP)?;

        Ok(Flow::Continue)
    }
}

#[derive(Debug, PartialEq)]
pub struct Exit;

impl Execute for Exit {
    fn execute(&self, _ctx: &mut Context) -> Result<Flow> {
        Ok(Flow::Exit)
    }
}

/// Line-oriented front end over a [`Tracker`].
///
/// A failing command is reported on the output and the session moves on.
pub struct Session<'t, R, W> {
    tracker: &'t mut Tracker,
    input: R,
    output: W,
    prompt: Option<String>,
    chart_width: usize,
}

impl<'t, R: BufRead, W: Write> Session<'t, R, W> {
    pub fn new(tracker: &'t mut Tracker, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
            prompt: None,
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_chart_width(mut self, width: usize) -> Self {
        self.chart_width = width;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(self.output, "{}", prompt)?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input, leaving session");
                break;
            }

            match self.handle_line(&line) {
                Ok(Flow::Continue) => {},
                Ok(Flow::Exit) => break,
                Err(err) => {
                    warn!("command failed, line={:?}, err={}", line.trim(), err);
                    writeln!(self.output, "error: {}", err)?;
                },
            }
        }

        self.output.flush()?;

        Ok(())
    }

    fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Flow::Continue);
        };

        let mut ctx = Context {
            tracker: &mut *self.tracker,
            out: &mut self.output,
            chart_width: self.chart_width,
        };

        command.execute(&mut ctx)
    }
}
