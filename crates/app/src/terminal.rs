//! Line-oriented presentation: parses typed commands into intents and
//! renders view-models as text.

use std::fmt::{self, Write};

use scenario_core::model::{ParseCategoryError, ScenarioCategory};
use scenario_core::wire::DEFAULT_QUESTION_COUNT;
use services::{SessionIntent, ViewModel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(SessionIntent),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    InvalidNumber { raw: String },
    OutOfRange { value: usize, max: usize },
    Category(ParseCategoryError),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(raw) => write!(f, "unknown command: {raw} (type ? for help)"),
            CommandError::InvalidNumber { raw } => write!(f, "not a number: {raw}"),
            CommandError::OutOfRange { value, max } => {
                write!(f, "{value} is out of range (1-{max})")
            }
            CommandError::Category(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CommandError {}

/// Interpret one input line in the context of the screen currently shown.
///
/// # Errors
///
/// Returns `CommandError` when the line does not name an action available on this screen.
pub fn parse_command(line: &str, view: &ViewModel) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(match view {
            ViewModel::Question(_) => Command::Help,
            _ => Command::Intent(SessionIntent::Start),
        });
    };

    match head {
        "q" | "quit" => return Ok(Command::Quit),
        "?" | "h" | "help" => return Ok(Command::Help),
        "m" | "menu" => return Ok(Command::Intent(SessionIntent::Start)),
        _ => {}
    }

    match view {
        ViewModel::Menu(items) => match head {
            "g" | "generate" => {
                let category = words
                    .next()
                    .map(str::parse::<ScenarioCategory>)
                    .transpose()
                    .map_err(CommandError::Category)?
                    .unwrap_or(ScenarioCategory::DEFAULT);
                let count = words
                    .next()
                    .map(parse_number)
                    .transpose()?
                    .unwrap_or(DEFAULT_QUESTION_COUNT);
                Ok(Command::Intent(SessionIntent::Generate { category, count }))
            }
            "c" | "clear" => Ok(Command::Intent(SessionIntent::ClearAll)),
            raw => {
                let choice = pick(raw, items.len())?;
                Ok(Command::Intent(SessionIntent::Open(items[choice].id.clone())))
            }
        },
        ViewModel::Question(question) => match head {
            "n" | "next" => Ok(Command::Intent(SessionIntent::Advance)),
            raw => {
                let choice = pick(raw, question.options.len())?;
                Ok(Command::Intent(SessionIntent::SelectOption(choice)))
            }
        },
        ViewModel::Completed(_) => Err(CommandError::Unknown(head.to_string())),
    }
}

fn parse_number(raw: &str) -> Result<usize, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        raw: raw.to_string(),
    })
}

/// 1-based choice into a 0-based index.
fn pick(raw: &str, max: usize) -> Result<usize, CommandError> {
    let value = raw
        .parse::<usize>()
        .map_err(|_| CommandError::Unknown(raw.to_string()))?;
    if value == 0 || value > max {
        return Err(CommandError::OutOfRange { value, max });
    }
    Ok(value - 1)
}

/// Render a view-model as plain text.
///
/// # Errors
///
/// Propagates formatter errors from `out`.
pub fn render(view: &ViewModel, out: &mut impl Write) -> fmt::Result {
    match view {
        ViewModel::Menu(items) => {
            writeln!(out, "== Scenarios ==")?;
            if items.is_empty() {
                writeln!(out, "(none yet)")?;
            }
            for (n, item) in items.iter().enumerate() {
                let mark = if item.completed { " ✅" } else { "" };
                writeln!(
                    out,
                    "{}. {} ({}){mark}",
                    n + 1,
                    item.title,
                    item.generated_at.format("%Y-%m-%d")
                )?;
            }
            writeln!(out)?;
            writeln!(out, "<n> open · g <category> [count] generate · c clear · q quit")?;
        }
        ViewModel::Question(question) => {
            writeln!(out, "== {} ==", question.title)?;
            writeln!(out, "Question {} of {}", question.position, question.total)?;
            writeln!(out)?;
            writeln!(out, "{}", question.prompt)?;
            for (n, option) in question.options.iter().enumerate() {
                writeln!(out, "  {}. {option}", n + 1)?;
            }
            if let Some(feedback) = &question.feedback {
                writeln!(out)?;
                writeln!(out, "{}", feedback.feedback)?;
                writeln!(out, "n next · m menu")?;
            }
        }
        ViewModel::Completed(done) => {
            writeln!(out, "== {} ==", done.title)?;
            writeln!(out, "Scenario complete: {} question(s) answered.", done.total)?;
            writeln!(out, "Press Enter for the menu.")?;
        }
    }
    Ok(())
}

/// Help text for the current screen.
#[must_use]
pub fn help(view: &ViewModel) -> String {
    match view {
        ViewModel::Menu(_) => {
            let keys: Vec<&str> = ScenarioCategory::ALL.iter().map(|c| c.key()).collect();
            format!(
                "<n> open a scenario, g <category> [count] to generate, c to clear all, q to quit.\ncategories: {}",
                keys.join(", ")
            )
        }
        ViewModel::Question(_) => {
            "<n> pick an option, n for the next question, m for the menu, q to quit.".to_string()
        }
        ViewModel::Completed(_) => "Enter or m for the menu, q to quit.".to_string(),
    }
}
