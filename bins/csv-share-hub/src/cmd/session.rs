use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use format_csv::CsvReader;
use hub_api::{SortState, Table, TableError};
use storage_memory::{FileEntry, MemoryCatalog};

use crate::config::{HubConfig, SessionArgs};
use crate::error::HubError;
use crate::render;

const HELP: &str = "\
commands:
  upload <path>        add a CSV file to the list
  list                 show uploaded files
  show <id>            open a file (any unique id prefix)
  sort <column>        sort the open file; repeat to flip direction
  remove <id>          drop a file from the list
  help                 this text
  quit                 leave the session
";

// ═══════════════════════════════════════════════════════════════
//  Command
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Upload(PathBuf),
    List,
    Show(String),
    Sort(String),
    Remove(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = HubError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let arg = |what: &str| -> Result<String, HubError> {
            if rest.is_empty() {
                Err(HubError::Command(format!("usage: {verb} <{what}>")))
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "upload" => Ok(Command::Upload(PathBuf::from(arg("path")?))),
            "list" | "ls" => Ok(Command::List),
            "show" | "open" => Ok(Command::Show(arg("id")?)),
            "sort" => Ok(Command::Sort(arg("column")?)),
            "remove" | "rm" => Ok(Command::Remove(arg("id")?)),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(HubError::Command(format!("unknown command '{other}', try 'help'"))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Session
// ═══════════════════════════════════════════════════════════════

/// The file currently opened with `show`, with its own sort state.
#[derive(Debug)]
struct Details {
    entry: FileEntry,
    table: Table,
    state: SortState,
}

impl Details {
    fn render(&self) -> Result<String, HubError> {
        let sorted = self.table.sorted(&self.state)?;
        let title = format!("{} ({}, {} rows)\n", self.entry.name, self.entry.id, sorted.len());
        Ok(title + &render::table_text(&sorted, &self.state))
    }
}

enum Outcome {
    Print(String),
    Quit,
}

struct Session {
    catalog: MemoryCatalog,
    reader: CsvReader,
    details: Option<Details>,
}

impl Session {
    fn new(config: &HubConfig) -> Result<Self, HubError> {
        Ok(Self {
            catalog: MemoryCatalog::new(&config.catalog),
            reader: CsvReader::new(&config.csv)?,
            details: None,
        })
    }

    fn execute(&mut self, command: Command) -> Result<Outcome, HubError> {
        match command {
            Command::Upload(path) => self.upload(&path).map(Outcome::Print),
            Command::List => Ok(Outcome::Print(render::catalog_text(self.catalog.list()))),
            Command::Show(prefix) => self.show(&prefix).map(Outcome::Print),
            Command::Sort(column) => self.sort(column).map(Outcome::Print),
            Command::Remove(prefix) => self.remove(&prefix).map(Outcome::Print),
            Command::Help => Ok(Outcome::Print(HELP.to_string())),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    fn upload(&mut self, path: &Path) -> Result<String, HubError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| HubError::Command(format!("'{}' is not a file path", path.display())))?;
        let size = std::fs::metadata(path)
            .map_err(|source| HubError::Read { path: path.display().to_string(), source })?
            .len();
        self.catalog.check_size(&name, size)?;
        let bytes = super::read_file(path)?;
        let entry = self.catalog.upload(&name, bytes)?;
        Ok(format!("uploaded {} ({} bytes) as {}\n", entry.name, entry.size, entry.id))
    }

    fn show(&mut self, prefix: &str) -> Result<String, HubError> {
        let stored = self.catalog.lookup(prefix)?;
        let table = self.reader.read_table(stored.bytes())?;
        let details = Details { entry: stored.entry().clone(), table, state: SortState::new() };
        let out = details.render()?;
        self.details = Some(details);
        Ok(out)
    }

    fn sort(&mut self, column: String) -> Result<String, HubError> {
        let details = self
            .details
            .as_mut()
            .ok_or_else(|| HubError::Command("no file open, use 'show <id>' first".into()))?;
        if !details.table.has_column(&column) {
            return Err(TableError::UnknownColumn(column).into());
        }
        details.state.activate(column);
        details.render()
    }

    fn remove(&mut self, prefix: &str) -> Result<String, HubError> {
        let id = self.catalog.lookup(prefix)?.entry().id;
        let entry = self.catalog.remove(id)?;
        if self.details.as_ref().is_some_and(|d| d.entry.id == id) {
            self.details = None;
        }
        Ok(format!("removed {} ({})\n", entry.name, entry.id))
    }
}

// ═══════════════════════════════════════════════════════════════
//  Loop
// ═══════════════════════════════════════════════════════════════

pub fn run(config_path: &str, args: SessionArgs) -> Result<(), HubError> {
    let config = HubConfig::resolve(config_path)?.with_overrides(args.delimiter, args.max_files);
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    let stderr = std::io::stderr().lock();
    drive(&config, stdin, stdout, stderr)
}

/// Read commands line by line until `quit` or end of input. Command
/// failures go to `err` and the loop keeps going.
fn drive(config: &HubConfig, input: impl BufRead, mut out: impl Write, mut err: impl Write) -> Result<(), HubError> {
    let mut session = Session::new(config)?;
    tracing::info!("session started, type 'help' for commands");

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>().and_then(|command| session.execute(command)) {
            Ok(Outcome::Print(text)) => {
                out.write_all(text.as_bytes())?;
                out.flush()?;
            }
            Ok(Outcome::Quit) => break,
            Err(e) => {
                tracing::debug!(command = %line.trim(), error = %e, "command failed");
                writeln!(err, "error: {e}")?;
            }
        }
    }

    tracing::info!(files = session.catalog.len(), "session ended");
    Ok(())
}
