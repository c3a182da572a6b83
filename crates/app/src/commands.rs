use std::fmt;

/// Which slice of state a `reset` restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetScope {
    All,
    Filters,
    Progress,
    Bookmarks,
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    Bookmark,
    Filter { dimension: String, value: String },
    Options,
    Reset(ResetScope),
    Export { path: Option<String> },
    Import { path: String },
    Speak,
    Stats,
    OpenSet(String),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown(String),
    MissingArgument { command: &'static str, what: &'static str },
    InvalidResetScope(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Unknown(word) => write!(f, "unknown command: {word} (try `help`)"),
            CommandError::MissingArgument { command, what } => {
                write!(f, "{command} requires {what}")
            }
            CommandError::InvalidResetScope(raw) => {
                write!(f, "reset expects all, filters, progress or bookmarks, got {raw}")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl Command {
    /// Parse a prompt line. An empty line means `next`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Next);
        };
        let rest = || line.trim().get(head.len()..).unwrap_or("").trim().to_owned();

        match head.to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(Self::Next),
            "b" | "back" => Ok(Self::Back),
            "m" | "mark" | "bookmark" => Ok(Self::Bookmark),
            "f" | "filter" => {
                let dimension = words.next().ok_or(CommandError::MissingArgument {
                    command: "filter",
                    what: "a dimension",
                })?;
                let value = words.collect::<Vec<_>>().join(" ");
                if value.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "filter",
                        what: "a value",
                    });
                }
                Ok(Self::Filter {
                    dimension: dimension.to_owned(),
                    value,
                })
            }
            "o" | "options" => Ok(Self::Options),
            "reset" => {
                let scope = match words.next().map(str::to_ascii_lowercase).as_deref() {
                    None | Some("all") => ResetScope::All,
                    Some("filters") => ResetScope::Filters,
                    Some("progress") => ResetScope::Progress,
                    Some("bookmarks") => ResetScope::Bookmarks,
                    Some(other) => return Err(CommandError::InvalidResetScope(other.to_owned())),
                };
                Ok(Self::Reset(scope))
            }
            "export" => Ok(Self::Export {
                path: words.next().map(str::to_owned),
            }),
            "import" => {
                let path = words.next().ok_or(CommandError::MissingArgument {
                    command: "import",
                    what: "a file path",
                })?;
                Ok(Self::Import {
                    path: path.to_owned(),
                })
            }
            "s" | "speak" => Ok(Self::Speak),
            "stats" => Ok(Self::Stats),
            "set" => {
                let name = rest();
                if name.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        what: "a data set name",
                    });
                }
                Ok(Self::OpenSet(name))
            }
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(head.to_owned())),
        }
    }
}

pub const HELP: &str = "\
Commands:
  <enter> | next        reveal the answer, then move on
  back                  step back
  mark                  toggle bookmark on the current question
  filter <dim> <value>  category | subCategory | bookmarked | hasAsterisk |
                        isUpdateFlagged | shuffle  (value `All` clears)
  options               list categories and sub-categories
  reset [all|filters|progress|bookmarks]
  export [path]         write bookmarks (stdout without a path)
  import <path>         merge bookmarks exported from this set
  speak                 read the current question aloud
  stats                 progress over the current view
  set <name>            open another data set
  quit";
