//! Expense CLI commands
//!
//! Each command drives the same [`Controller`] the TUI uses, so deletes and
//! updates go through the same confirmation steps.

use std::io::{self, BufRead, Write};

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::controller::form::{format_date, parse_date};
use crate::controller::{Controller, ExpenseForm, Outcome, Prompt};
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, ExpenseId};
use crate::presentation::Column;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// List all expenses
    #[command(alias = "ls")]
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a single expense
    Show {
        /// Expense ID
        id: ExpenseId,
    },
    /// Record a new expense
    Add {
        /// Amount, stored as entered
        amount: String,
        /// Category (Food, Rent, Utilities, Transportation, Entertainment, Shopping, Health, Other)
        #[arg(short, long)]
        category: Option<String>,
        /// Date in the configured format (MM-DD-YYYY by default), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// Change fields of an expense
    #[command(alias = "edit")]
    Update {
        /// Expense ID
        id: ExpenseId,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long)]
        description: Option<String>,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete an expense
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: ExpenseId,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete every expense
    Clear {
        /// Skip both confirmations
        #[arg(short, long)]
        yes: bool,
    },
}

/// Source of yes/no answers
pub trait Confirm {
    fn ask(&mut self, prompt: &Prompt) -> ExpenseResult<bool>;
}

/// Answers every prompt with yes
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn ask(&mut self, _prompt: &Prompt) -> ExpenseResult<bool> {
        Ok(true)
    }
}

/// Asks on a line-based reader, echoing the question to a writer
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn ask(&mut self, prompt: &Prompt) -> ExpenseResult<bool> {
        write!(self.output, "{} {} [y/N]: ", prompt.title, prompt.message)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
    confirm: &mut dyn Confirm,
) -> ExpenseResult<()> {
    let mut controller = Controller::new(storage, settings.date_format.as_str())?;
    let mut assume_yes = AssumeYes;

    match cmd {
        ExpenseCommands::List { json } => {
            if json {
                let expenses = storage.expenses().list_all()?;
                println!("{}", serde_json::to_string_pretty(&expenses)?);
            } else {
                println!("{}", format_expense_table(controller.table().rows()));
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = storage
                .expenses()
                .get(id)?
                .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
            print!("{}", format_expense_details(&expense));
        }

        ExpenseCommands::Add {
            amount,
            category,
            date,
            description,
        } => {
            let mut form = ExpenseForm {
                date: match date {
                    Some(text) => parse_date(&text, &settings.date_format)?,
                    None => Local::now().date_naive(),
                },
                category: match category {
                    Some(name) => parse_category(&name)?,
                    None => Category::default(),
                },
                amount,
                description: description.unwrap_or_default(),
            };
            report(controller.add(&mut form)?);
        }

        ExpenseCommands::Update {
            id,
            amount,
            category,
            date,
            description,
            yes,
        } => {
            let row = select_id(&mut controller, id)?;

            if let Some(text) = date {
                // Re-render so the stored text keeps the configured format
                let parsed = parse_date(&text, &settings.date_format)?;
                let formatted = format_date(parsed, &settings.date_format)?;
                controller.table_mut().set_cell(row, Column::Date, formatted);
            }
            if let Some(name) = category {
                let category = parse_category(&name)?;
                controller
                    .table_mut()
                    .set_cell(row, Column::Category, category.name());
            }
            if let Some(amount) = amount {
                controller.table_mut().set_cell(row, Column::Amount, amount);
            }
            if let Some(description) = description {
                controller
                    .table_mut()
                    .set_cell(row, Column::Description, description);
            }

            let outcome = controller.request_update();
            let confirm: &mut dyn Confirm = if yes { &mut assume_yes } else { confirm };
            report(run_prompts(&mut controller, outcome, confirm)?);
        }

        ExpenseCommands::Delete { id, yes } => {
            select_id(&mut controller, id)?;
            let outcome = controller.request_delete();
            let confirm: &mut dyn Confirm = if yes { &mut assume_yes } else { confirm };
            report(run_prompts(&mut controller, outcome, confirm)?);
        }

        ExpenseCommands::Clear { yes } => {
            let outcome = controller.request_delete_all();
            let confirm: &mut dyn Confirm = if yes { &mut assume_yes } else { confirm };
            report(run_prompts(&mut controller, outcome, confirm)?);
        }
    }

    Ok(())
}

/// Answer prompts until the controller reaches a final outcome
pub fn run_prompts(
    controller: &mut Controller<'_>,
    mut outcome: Outcome,
    confirm: &mut dyn Confirm,
) -> ExpenseResult<Outcome> {
    while let Outcome::Confirm(prompt) = &outcome {
        outcome = if confirm.ask(prompt)? {
            controller.confirm()?
        } else {
            controller.decline()
        };
    }
    Ok(outcome)
}

fn select_id(controller: &mut Controller<'_>, id: ExpenseId) -> ExpenseResult<usize> {
    let index = controller
        .table()
        .rows()
        .iter()
        .position(|row| row.id() == Some(id))
        .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
    controller.table_mut().select(Some(index));
    Ok(index)
}

fn parse_category(name: &str) -> ExpenseResult<Category> {
    Category::parse(name).ok_or_else(|| {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.name()).collect();
        ExpenseError::Validation(format!(
            "Unknown category '{}'. Choose one of: {}",
            name,
            names.join(", ")
        ))
    })
}

fn report(outcome: Outcome) {
    match outcome {
        Outcome::Applied(message) => println!("{}", message),
        Outcome::Warning(notice) => println!("{}: {}", notice.title, notice.message),
        Outcome::Cancelled => println!("Cancelled, nothing changed."),
        Outcome::Confirm(prompt) => println!("{}", prompt.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{CONFIRM_DELETE_ALL, CONFIRM_DELETE_ALL_AGAIN};
    use crate::models::ExpenseInput;

    /// Replays canned answers and records what was asked
    struct Scripted {
        answers: Vec<bool>,
        asked: Vec<Prompt>,
    }

    impl Scripted {
        fn new(answers: &[bool]) -> Self {
            Self {
                answers: answers.iter().rev().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Confirm for Scripted {
        fn ask(&mut self, prompt: &Prompt) -> ExpenseResult<bool> {
            self.asked.push(prompt.clone());
            Ok(self.answers.pop().unwrap_or(false))
        }
    }

    fn seeded() -> Storage {
        let storage = Storage::open_in_memory().unwrap();
        let repo = storage.expenses();
        repo.insert(&ExpenseInput::new("01-01-2024", "Food", "25", "lunch"))
            .unwrap();
        repo.insert(&ExpenseInput::new("01-02-2024", "Rent", "900", ""))
            .unwrap();
        storage
    }

    #[test]
    fn test_clear_declined_at_second_prompt() {
        let storage = seeded();
        let settings = Settings::default();
        let mut answers = Scripted::new(&[true, false]);

        handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Clear { yes: false },
            &mut answers,
        )
        .unwrap();

        assert_eq!(answers.asked, vec![CONFIRM_DELETE_ALL, CONFIRM_DELETE_ALL_AGAIN]);
        assert_eq!(storage.expenses().count().unwrap(), 2);
    }

    #[test]
    fn test_clear_with_yes_skips_prompts() {
        let storage = seeded();
        let settings = Settings::default();
        let mut answers = Scripted::new(&[]);

        handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Clear { yes: true },
            &mut answers,
        )
        .unwrap();

        assert!(answers.asked.is_empty());
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_update_keeps_unspecified_fields() {
        let storage = seeded();
        let settings = Settings::default();
        let mut answers = Scripted::new(&[true]);

        handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Update {
                id: ExpenseId::new(1),
                amount: Some("30".into()),
                category: Some("health".into()),
                date: None,
                description: None,
                yes: false,
            },
            &mut answers,
        )
        .unwrap();

        let updated = storage.expenses().get(ExpenseId::new(1)).unwrap().unwrap();
        assert_eq!(updated.input(), ExpenseInput::new("01-01-2024", "Health", "30", "lunch"));
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let storage = seeded();
        let settings = Settings::default();
        let mut answers = Scripted::new(&[true]);

        let err = handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Delete {
                id: ExpenseId::new(42),
                yes: false,
            },
            &mut answers,
        )
        .unwrap_err();

        assert!(err.is_not_found());
        assert!(answers.asked.is_empty());
    }

    #[test]
    fn test_add_rejects_unknown_category() {
        let storage = seeded();
        let settings = Settings::default();

        let err = handle_expense_command(
            &storage,
            &settings,
            ExpenseCommands::Add {
                amount: "5".into(),
                category: Some("Groceries".into()),
                date: None,
                description: None,
            },
            &mut AssumeYes,
        )
        .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(storage.expenses().count().unwrap(), 2);
    }

    #[test]
    fn test_line_confirm_parses_answers() {
        let mut out = Vec::new();
        let mut confirm = LineConfirm::new("y\nno\n\nYES\n".as_bytes(), &mut out);
        let prompt = CONFIRM_DELETE_ALL;

        assert!(confirm.ask(&prompt).unwrap());
        assert!(!confirm.ask(&prompt).unwrap());
        assert!(!confirm.ask(&prompt).unwrap());
        assert!(confirm.ask(&prompt).unwrap());
        drop(confirm);

        let echoed = String::from_utf8(out).unwrap();
        assert!(echoed.contains("delete all expenses? [y/N]: "));
    }
}
