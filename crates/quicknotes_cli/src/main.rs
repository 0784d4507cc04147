//! Terminal presenter for the QuickNotes store.
//!
//! # Responsibility
//! - Map subcommands onto store operations, one process per invocation.
//! - Own user-facing output, confirmation prompts and import/export file I/O.
//!
//! # Invariants
//! - Validation and format failures exit nonzero with an error message.
//! - Persistence failures exit zero: the in-memory result is rendered and
//!   the unsaved state is reported as a warning.

mod prefs;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use quicknotes_core::{
    core_version, default_log_level, init_logging, FileStorage, NotesStore, PersistenceError,
    Priority, SqliteStorage, Storage, StoreError,
};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Pocket notes for the terminal.
#[derive(Parser)]
#[command(name = "quicknotes", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the notes database.
    #[arg(long, value_name = "DIR", default_value = ".quicknotes", global = true)]
    data_dir: PathBuf,

    /// Storage backend for notes and preferences.
    #[arg(long, value_enum, default_value = "sqlite", global = true)]
    backend: Backend,

    /// Write diagnostic logs into this directory.
    ///
    /// Logging stays off when the flag is absent.
    #[arg(long, value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error); only used with --log-dir.
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Backend {
    /// Single SQLite database file.
    Sqlite,
    /// One plain file per key, easy to inspect by hand.
    File,
}

#[derive(Subcommand)]
enum Command {
    /// Add a note.
    Add {
        /// Short heading for the note.
        title: String,
        /// Note body; may contain newlines.
        content: String,
        /// Priority label; unrecognized values fall back to medium.
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },
    /// List all notes, newest first.
    List,
    /// Delete one note by its ID.
    Delete {
        /// ID as shown by `list`.
        id: String,
    },
    /// Delete every note.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Export all notes to a JSON file.
    Export {
        /// Target file; defaults to `notas-<date>.json` in the current
        /// directory.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Import notes from an exported JSON file.
    Import {
        /// File produced by `export`.
        file: PathBuf,
    },
    /// Search notes by title or content.
    Search {
        /// Case-insensitive substring to look for.
        query: String,
    },
    /// Show or switch the color theme.
    Theme {
        /// `on`, `off` or `toggle`; omit to show the current setting.
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    /// Switch to the dark theme.
    On,
    /// Switch to the light theme.
    Off,
    /// Flip the current setting.
    Toggle,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        init_cli_logging(log_dir, cli.log_level.as_deref());
    }
    debug!(
        "event=cli_start module=cli status=ok version={} core={}",
        env!("CARGO_PKG_VERSION"),
        core_version()
    );

    let data_dir = resolve_data_dir(cli.data_dir)?;
    match cli.backend {
        Backend::Sqlite => {
            std::fs::create_dir_all(&data_dir).with_context(|| {
                format!("failed to create data directory `{}`", data_dir.display())
            })?;
            let storage = SqliteStorage::open(data_dir.join("quicknotes.db"))
                .with_context(|| format!("failed to open notes database in `{}`", data_dir.display()))?;
            run(storage, cli.command)
        }
        Backend::File => run(FileStorage::new(data_dir.join("kv")), cli.command),
    }
}

fn run<S: Storage>(mut storage: S, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Add {
            title,
            content,
            priority,
        } => add(NotesStore::load(storage), &title, &content, &priority),
        Command::List => list(NotesStore::load(storage)),
        Command::Delete { id } => delete(NotesStore::load(storage), &id),
        Command::Clear { yes } => clear(NotesStore::load(storage), yes),
        Command::Export { out } => export(NotesStore::load(storage), out),
        Command::Import { file } => import(NotesStore::load(storage), &file),
        Command::Search { query } => search(NotesStore::load(storage), &query),
        Command::Theme { action } => theme(&mut storage, action),
    }
}

fn add<S: Storage>(
    mut store: NotesStore<S>,
    title: &str,
    content: &str,
    priority: &str,
) -> anyhow::Result<()> {
    let outcome = store.add(title, content, Priority::parse(priority));
    let unsaved = match outcome {
        Ok(_) => None,
        Err(StoreError::Persistence(err)) => Some(err),
        Err(other) => return Err(other.into()),
    };
    if let Some(note) = store.notes().first() {
        println!(
            "Added \"{}\" [{}] (id: {}).",
            render::sanitize_text(&note.title),
            note.priority,
            note.id
        );
    }
    finish(unsaved, "the new note")
}

fn list<S: Storage>(store: NotesStore<S>) -> anyhow::Result<()> {
    if store.is_empty() {
        println!("No notes yet. Use `quicknotes add` to create the first one.");
        return Ok(());
    }
    println!("{}", render::count_phrase(store.len()));
    let now = chrono::Utc::now();
    for note in store.notes() {
        println!();
        print!("{}", render::note_block(note, now));
    }
    Ok(())
}

fn delete<S: Storage>(mut store: NotesStore<S>, id: &str) -> anyhow::Result<()> {
    let unsaved = match store.delete(id) {
        Ok(true) => None,
        Ok(false) => {
            println!("No note with id {}.", render::sanitize_text(id));
            return Ok(());
        }
        Err(StoreError::Persistence(err)) => Some(err),
        Err(other) => return Err(other.into()),
    };
    println!("Deleted note {}.", render::sanitize_text(id));
    finish(unsaved, "the deletion")
}

fn clear<S: Storage>(mut store: NotesStore<S>, yes: bool) -> anyhow::Result<()> {
    if store.is_empty() {
        println!("Nothing to clear.");
        return Ok(());
    }
    let count = store.len();
    if !yes {
        let proceed = confirm(&format!(
            "Delete all {}? This cannot be undone.",
            render::count_phrase(count)
        ))?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }
    let unsaved = match store.clear_all() {
        Ok(_) => None,
        Err(StoreError::Persistence(err)) => Some(err),
        Err(other) => return Err(other.into()),
    };
    println!("Deleted {}.", render::count_phrase(count));
    finish(unsaved, "the cleared collection")
}

fn export<S: Storage>(store: NotesStore<S>, out: Option<PathBuf>) -> anyhow::Result<()> {
    let payload = match store.export_json()? {
        Some(payload) => payload,
        None => {
            println!("No notes to export.");
            return Ok(());
        }
    };
    let path = out.unwrap_or_else(render::default_export_path);
    std::fs::write(&path, payload)
        .with_context(|| format!("failed to write export file `{}`", path.display()))?;
    println!(
        "Exported {} to {}.",
        render::count_phrase(store.len()),
        path.display()
    );
    Ok(())
}

fn import<S: Storage>(mut store: NotesStore<S>, file: &Path) -> anyhow::Result<()> {
    let payload = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file `{}`", file.display()))?;
    let before = store.len();
    let unsaved = match store.import_json(&payload) {
        Ok(_) => None,
        Err(StoreError::Persistence(err)) => Some(err),
        Err(other) => return Err(other.into()),
    };
    println!(
        "Imported {} ({} total).",
        render::count_phrase(store.len() - before),
        store.len()
    );
    finish(unsaved, "the import")
}

fn search<S: Storage>(store: NotesStore<S>, query: &str) -> anyhow::Result<()> {
    let hits = store.search(query);
    if hits.is_empty() {
        println!("No notes match \"{}\".", render::sanitize_text(query));
        return Ok(());
    }
    println!(
        "{} match \"{}\":",
        render::count_phrase(hits.len()),
        render::sanitize_text(query)
    );
    let now = chrono::Utc::now();
    for note in hits {
        println!();
        print!("{}", render::note_block(note, now));
    }
    Ok(())
}

fn theme<S: Storage>(storage: &mut S, action: Option<ThemeAction>) -> anyhow::Result<()> {
    let enabled = match action {
        None => {
            let enabled = prefs::dark_theme_enabled(storage);
            println!("Theme: {}.", theme_name(enabled));
            return Ok(());
        }
        Some(ThemeAction::On) => true,
        Some(ThemeAction::Off) => false,
        Some(ThemeAction::Toggle) => !prefs::dark_theme_enabled(storage),
    };
    prefs::set_dark_theme(storage, enabled).context("failed to save theme preference")?;
    println!("Theme set to {}.", theme_name(enabled));
    Ok(())
}

fn theme_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

/// Closes out a mutating command: quiet success, or a warning that the
/// rendered result did not reach storage. Never an error.
fn finish(unsaved: Option<PersistenceError>, what: &str) -> anyhow::Result<()> {
    if let Some(err) = unsaved {
        eprintln!("warning: {what} was not saved: {err}");
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout()
        .flush()
        .context("failed to flush stdout")?;
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn init_cli_logging(log_dir: &Path, level: Option<&str>) {
    let level = effective_log_level(level);
    let absolute = if log_dir.is_absolute() {
        log_dir.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(log_dir))
            .unwrap_or_else(|_| log_dir.to_path_buf())
    };
    if let Err(err) = init_logging(level, &absolute.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }
}

/// Picks the `--log-level` value when given, the build default otherwise.
fn effective_log_level(level: Option<&str>) -> &str {
    // The closure coerces the static default to the borrowed lifetime.
    level.unwrap_or_else(|| default_log_level())
}

fn resolve_data_dir(dir: PathBuf) -> anyhow::Result<PathBuf> {
    if dir.is_absolute() {
        return Ok(dir);
    }
    let cwd = std::env::current_dir().context("cannot resolve current directory")?;
    Ok(cwd.join(dir))
}
