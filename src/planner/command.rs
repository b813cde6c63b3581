use super::error::{PlannerError, Result};
use super::storage::Filter;
use super::task::Priority;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add {
        description: String,
        priority: Priority,
        due_date: Option<String>,
    },
    List { filter: Filter },
    Complete { id: String },
    Delete { id: String },
    Search { query: String },
    Stats,
    Help,
    Clear,
    Quit,
}

/// Splits on whitespace; a double-quoted run is kept as a single token.
/// A quote left open at the end of the line is rejected.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if in_quotes {
        return Err(PlannerError::Validation(
            "unbalanced quote in command line".to_string(),
        ));
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn required(args: &[String], what: &str) -> Result<String> {
    args.first()
        .cloned()
        .ok_or_else(|| PlannerError::Validation(format!("please provide {}", what)))
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let tokens = tokenize(line)?;
        let Some((name, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = match name.to_lowercase().as_str() {
            "add" => {
                let description = required(args, "a description for the task")?;
                if description.trim().is_empty() {
                    return Err(PlannerError::Validation(
                        "task description cannot be empty".to_string(),
                    ));
                }
                let priority = match args.get(1) {
                    Some(p) => p.parse()?,
                    None => Priority::default(),
                };
                Command::Add {
                    description: description.trim().to_string(),
                    priority,
                    due_date: args.get(2).filter(|d| !d.trim().is_empty()).cloned(),
                }
            }
            "list" => Command::List {
                filter: args.first().map_or(Filter::All, |f| Filter::parse(f)),
            },
            "complete" => Command::Complete {
                id: required(args, "a task id")?,
            },
            "delete" => Command::Delete {
                id: required(args, "a task id")?,
            },
            "search" => {
                if args.is_empty() {
                    return Err(PlannerError::Validation(
                        "please provide a search query".to_string(),
                    ));
                }
                Command::Search {
                    query: args.join(" "),
                }
            }
            "stats" => Command::Stats,
            "help" => Command::Help,
            "clear" => Command::Clear,
            "quit" | "exit" => Command::Quit,
            other => return Err(PlannerError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}
