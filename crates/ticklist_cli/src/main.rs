//! Interactive line-oriented surface for the TickList core.
//!
//! # Responsibility
//! - Wire the task-list controller to a terminal command loop.
//! - Implement the blocking dialog contract over stdin/stdout.
//!
//! # Invariants
//! - Row numbers shown to the user are canonical list positions, so they
//!   stay valid while the filter hides rows in between.

use log::warn;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use ticklist_core::db::open_db;
use ticklist_core::{
    core_version, default_log_level, init_logging, ControllerError, Dialogs, FilterMode, RowView,
    SnapshotStore, SqliteSnapshotStore, TaskListController,
};

const DB_PATH_ENV: &str = "TICKLIST_DB";
const LOG_DIR_ENV: &str = "TICKLIST_LOG_DIR";
const DEFAULT_DB_FILE: &str = "ticklist.sqlite3";

/// Blocking dialogs over stdin/stdout.
///
/// Confirmation defaults to "no"; prompt submissions are taken verbatim
/// (an empty line submits empty text), and end-of-input cancels.
struct ConsoleDialogs;

impl Dialogs for ConsoleDialogs {
    fn alert(&self, message: &str) {
        println!("! {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{message} [y/N] ");
        let _ = io::stdout().flush();
        match read_line() {
            Some(answer) => matches!(answer.trim(), "y" | "Y" | "yes"),
            None => false,
        }
    }

    fn prompt_text(&self, message: &str, default: &str) -> Option<String> {
        print!("{message} [{default}] ");
        let _ = io::stdout().flush();
        read_line()
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ticklist: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Err(err) = init_logging(default_log_level(), &resolve_log_dir()) {
        eprintln!("ticklist: logging disabled: {err}");
    }

    let conn = open_db(resolve_db_path())?;
    let store = SqliteSnapshotStore::try_new(&conn)?;
    let mut list = TaskListController::new(store, ConsoleDialogs);
    list.restore()?;

    println!(
        "ticklist {} — {} task(s) loaded",
        core_version(),
        list.len()
    );
    print_rows(&list.visible_rows());

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = read_line() else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        if matches!(command, "quit" | "exit") {
            break;
        }
        if let Err(err) = execute(&mut list, command, rest) {
            // Empty-add already alerted through the dialog surface.
            if !matches!(err, ControllerError::EmptyText) {
                println!("error: {err}");
            }
            warn!("event=command_failed module=cli command={command} error={err}");
        }
    }

    Ok(())
}

fn execute<S: SnapshotStore>(
    list: &mut TaskListController<S, ConsoleDialogs>,
    command: &str,
    rest: &str,
) -> Result<(), ControllerError> {
    match command {
        "add" => {
            list.add(rest)?;
            print_rows(&list.visible_rows());
        }
        "toggle" => {
            let Some(position) = parse_position(rest) else {
                return Ok(());
            };
            list.toggle_completed(position)?;
            print_rows(&list.visible_rows());
        }
        "edit" => {
            let Some(position) = parse_position(rest) else {
                return Ok(());
            };
            list.edit(position)?;
            print_rows(&list.visible_rows());
        }
        "del" => {
            let Some(position) = parse_position(rest) else {
                return Ok(());
            };
            list.delete(position)?;
            print_rows(&list.visible_rows());
        }
        "clear" => {
            let removed = list.clear_completed()?;
            println!("removed {removed} completed task(s)");
            print_rows(&list.visible_rows());
        }
        "filter" => {
            let mode = list.toggle_filter()?;
            match mode {
                FilterMode::HideCompleted => println!("hiding completed tasks"),
                FilterMode::ShowAll => println!("showing all tasks"),
            }
            print_rows(&list.visible_rows());
        }
        "list" => print_rows(&list.visible_rows()),
        "help" => print_help(list.filter()),
        other => println!("unknown command `{other}` (try `help`)"),
    }
    Ok(())
}

fn parse_position(rest: &str) -> Option<usize> {
    match rest.parse::<usize>() {
        Ok(position) => Some(position),
        Err(_) => {
            println!("expected a row number, got `{rest}`");
            None
        }
    }
}

fn print_rows(rows: &[RowView]) {
    if rows.is_empty() {
        println!("(no tasks)");
        return;
    }
    for row in rows {
        let marker = if row.completed { "x" } else { " " };
        println!("{:>3} [{marker}] {}", row.position, row.text);
    }
}

fn print_help(filter: FilterMode) {
    println!("commands:");
    println!("  add <text>   add a task at the head of the list");
    println!("  toggle <n>   flip completion of row n");
    println!("  edit <n>     edit row n (prompt)");
    println!("  del <n>      delete row n (confirm)");
    println!("  clear        remove all completed tasks");
    println!("  filter       {}", filter.button_label());
    println!("  list         show visible rows");
    println!("  quit         exit");
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
    }
}

fn resolve_db_path() -> PathBuf {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(DEFAULT_DB_FILE)
}

fn resolve_log_dir() -> String {
    match std::env::var(LOG_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => dir,
        _ => std::env::temp_dir()
            .join("ticklist-logs")
            .to_string_lossy()
            .into_owned(),
    }
}
