use std::fmt;
use std::path::PathBuf;

use practice_core::filter::SortKey;
use practice_core::model::{DatasetCategory, Difficulty, ProgressStatus, QuestionId};

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidDataset { raw: String },
    InvalidDifficulty { raw: String },
    InvalidStatus { raw: String },
    InvalidQuestionId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing <{name}> argument"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            ArgsError::InvalidDataset { raw } => write!(f, "unknown dataset: {raw}"),
            ArgsError::InvalidDifficulty { raw } => write!(f, "invalid --difficulty value: {raw}"),
            ArgsError::InvalidStatus { raw } => {
                write!(f, "invalid status (expected unsolved|attempted|solved): {raw}")
            }
            ArgsError::InvalidQuestionId { raw } => write!(f, "invalid question id: {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [--db <sqlite_url>] [--data-dir <dir> | --data-url <url>] <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  overview                              progress for every dataset");
    eprintln!("  list <dataset> [filters] [--sort <difficulty|title|category>]");
    eprintln!("  show <dataset> <id>");
    eprintln!("  search [term] [filters]               search across all datasets");
    eprintln!("  status <dataset> <id> <unsolved|attempted|solved>");
    eprintln!("  cycle <dataset> <id>                  unsolved -> attempted -> solved");
    eprintln!("  bookmark <dataset> <id>               toggle bookmark");
    eprintln!("  categories [dataset]                  display categories to filter by");
    eprintln!("  bookmarks <dataset>                   bookmarked questions");
    eprintln!("  export [path]                         default: zoho-practice-progress.json");
    eprintln!("  import <path>                         replaces all progress");
    eprintln!("  clear [dataset]                       reset one or all datasets");
    eprintln!();
    eprintln!("Filters:");
    eprintln!("  --search <text> --difficulty <Easy|Medium|Hard> --category <label> --bookmarked");
    eprintln!();
    eprintln!("Datasets:");
    eprintln!("  c-programming, zoho-dsa, lld, zoho-docs, logical-coding");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  PRACTICE_DB_URL, PRACTICE_DATA_DIR, PRACTICE_DATA_URL, RUST_LOG");
}

/// Where progress lives and where question files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db_url: String,
    pub data_dir: PathBuf,
    pub data_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: "sqlite://practice.sqlite3".into(),
            data_dir: PathBuf::from("."),
            data_url: None,
        }
    }
}

impl Settings {
    /// Defaults overridden by `PRACTICE_*` environment variables.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(db_url) = std::env::var("PRACTICE_DB_URL") {
            settings.db_url = db_url;
        }
        if let Ok(dir) = std::env::var("PRACTICE_DATA_DIR") {
            settings.data_dir = PathBuf::from(dir);
        }
        settings.data_url = std::env::var("PRACTICE_DATA_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());
        settings
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub search: String,
    pub difficulty: Option<Difficulty>,
    pub category: Option<String>,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Overview,
    List {
        dataset: DatasetCategory,
        filters: Filters,
        sort: SortKey,
    },
    Show {
        dataset: DatasetCategory,
        id: QuestionId,
    },
    Search {
        term: String,
        filters: Filters,
    },
    Status {
        dataset: DatasetCategory,
        id: QuestionId,
        status: ProgressStatus,
    },
    Cycle {
        dataset: DatasetCategory,
        id: QuestionId,
    },
    Bookmark {
        dataset: DatasetCategory,
        id: QuestionId,
    },
    Categories {
        dataset: Option<DatasetCategory>,
    },
    Bookmarks {
        dataset: DatasetCategory,
    },
    Export {
        path: PathBuf,
    },
    Import {
        path: PathBuf,
    },
    Clear {
        dataset: Option<DatasetCategory>,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub settings: Settings,
    pub command: Command,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_positional(
    args: &mut impl Iterator<Item = String>,
    name: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingArgument { name })
}

fn parse_dataset(raw: String) -> Result<DatasetCategory, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidDataset { raw })
}

fn parse_id(raw: String) -> Result<QuestionId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidQuestionId { raw })
}

fn no_extra(args: &mut impl Iterator<Item = String>) -> Result<(), ArgsError> {
    match args.next() {
        Some(arg) => Err(ArgsError::UnknownArg(arg)),
        None => Ok(()),
    }
}

impl Cli {
    /// Parse `args` (without the program name) on top of `settings`.
    pub fn parse(
        args: impl IntoIterator<Item = String>,
        mut settings: Settings,
    ) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut rest = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    settings.db_url = value;
                }
                "--data-dir" => {
                    settings.data_dir = PathBuf::from(require_value(&mut args, "--data-dir")?);
                }
                "--data-url" => {
                    settings.data_url = Some(require_value(&mut args, "--data-url")?);
                }
                "--help" | "-h" => {
                    return Ok(Self {
                        settings,
                        command: Command::Help,
                    });
                }
                _ => rest.push(arg),
            }
        }

        let mut rest = rest.into_iter();
        let command = match rest.next().as_deref() {
            None | Some("overview") => {
                no_extra(&mut rest)?;
                Command::Overview
            }
            Some("list") => {
                let dataset = parse_dataset(require_positional(&mut rest, "dataset")?)?;
                let (filters, sort) = parse_filters(&mut rest, true)?;
                Command::List {
                    dataset,
                    filters,
                    sort,
                }
            }
            Some("show") => {
                let dataset = parse_dataset(require_positional(&mut rest, "dataset")?)?;
                let id = parse_id(require_positional(&mut rest, "id")?)?;
                no_extra(&mut rest)?;
                Command::Show { dataset, id }
            }
            Some("search") => {
                let mut tail: Vec<String> = rest.by_ref().collect();
                let has_term = tail.first().is_some_and(|first| !first.starts_with("--"));
                let term = if has_term { tail.remove(0) } else { String::new() };
                let (mut filters, _) = parse_filters(&mut tail.into_iter(), false)?;
                let term = if term.is_empty() {
                    std::mem::take(&mut filters.search)
                } else {
                    term
                };
                Command::Search { term, filters }
            }
            Some("categories") => {
                let dataset = rest.next().map(parse_dataset).transpose()?;
                no_extra(&mut rest)?;
                Command::Categories { dataset }
            }
            Some("bookmarks") => {
                let dataset = parse_dataset(require_positional(&mut rest, "dataset")?)?;
                no_extra(&mut rest)?;
                Command::Bookmarks { dataset }
            }
            Some("status") => {
                let dataset = parse_dataset(require_positional(&mut rest, "dataset")?)?;
                let id = parse_id(require_positional(&mut rest, "id")?)?;
                let raw = require_positional(&mut rest, "status")?;
                let status = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidStatus { raw: raw.clone() })?;
                no_extra(&mut rest)?;
                Command::Status {
                    dataset,
                    id,
                    status,
                }
            }
            Some("cycle") => {
                let dataset = parse_dataset(require_positional(&mut rest, "dataset")?)?;
                let id = parse_id(require_positional(&mut rest, "id")?)?;
                no_extra(&mut rest)?;
                Command::Cycle { dataset, id }
            }
            Some("bookmark") => {
                let dataset = parse_dataset(require_positional(&mut rest, "dataset")?)?;
                let id = parse_id(require_positional(&mut rest, "id")?)?;
                no_extra(&mut rest)?;
                Command::Bookmark { dataset, id }
            }
            Some("export") => {
                let path = rest
                    .next()
                    .map_or_else(|| PathBuf::from(services::EXPORT_FILE_NAME), PathBuf::from);
                no_extra(&mut rest)?;
                Command::Export { path }
            }
            Some("import") => {
                let path = PathBuf::from(require_positional(&mut rest, "path")?);
                no_extra(&mut rest)?;
                Command::Import { path }
            }
            Some("clear") => {
                let dataset = rest.next().map(parse_dataset).transpose()?;
                no_extra(&mut rest)?;
                Command::Clear { dataset }
            }
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        Ok(Self { settings, command })
    }
}

fn parse_filters(
    args: &mut impl Iterator<Item = String>,
    allow_sort: bool,
) -> Result<(Filters, SortKey), ArgsError> {
    let mut filters = Filters::default();
    let mut sort = SortKey::Original;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--search" => filters.search = require_value(args, "--search")?,
            "--difficulty" => {
                let raw = require_value(args, "--difficulty")?;
                let difficulty = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidDifficulty { raw: raw.clone() })?;
                filters.difficulty = Some(difficulty);
            }
            "--category" => filters.category = Some(require_value(args, "--category")?),
            "--bookmarked" => filters.bookmarked = true,
            "--sort" if allow_sort => sort = SortKey::parse(&require_value(args, "--sort")?),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    Ok((filters, sort))
}

/// Turn a user-supplied `SQLite` location into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
