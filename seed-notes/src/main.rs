//! One-off seeding tool for the notes store.
//!
//! Usage:
//!   seed-notes <database-url>          insert the sample note
//!   seed-notes <database-url> --list   print every stored note

use notes_service::{Database, StoreError};
use notes_types::NewNote;

const SAMPLE_NOTE: &str = "GET and POST are the most important methods of the HTTP protocol";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Seed { database_url: String },
    List { database_url: String },
}

fn parse_args(args: &[String]) -> Option<Command> {
    let database_url = args.get(1)?.clone();
    match args.get(2).map(String::as_str) {
        Some("--list") => Some(Command::List { database_url }),
        _ => Some(Command::Seed { database_url }),
    }
}

/// Message and exit status used when no database URL is given
fn usage_error() -> (&'static str, i32) {
    ("give database url as argument", 1)
}

fn run(command: Command) -> Result<(), StoreError> {
    match command {
        Command::Seed { database_url } => {
            let db = Database::new(&database_url)?;
            let note = db.insert_note(&NewNote::new(SAMPLE_NOTE, false))?;
            log::debug!("[SEED] Inserted {}", note.id);
            println!("note saved!");
        }
        Command::List { database_url } => {
            let db = Database::new(&database_url)?;
            for note in db.list_notes()? {
                println!("{} {} (important: {})", note.id, note.content, note.important);
            }
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = parse_args(&args) else {
        let (message, code) = usage_error();
        eprintln!("{}", message);
        std::process::exit(code);
    };

    if let Err(e) = run(command) {
        log::error!("[SEED] {}", e);
        eprintln!("seeding failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_url_is_rejected() {
        assert_eq!(parse_args(&args(&["seed-notes"])), None);

        let (message, code) = usage_error();
        assert_eq!(message, "give database url as argument");
        assert_eq!(code, 1);
    }

    #[test]
    fn parses_seed_and_list() {
        assert_eq!(
            parse_args(&args(&["seed-notes", "notes.db"])),
            Some(Command::Seed {
                database_url: "notes.db".to_string()
            })
        );
        assert_eq!(
            parse_args(&args(&["seed-notes", "notes.db", "--list"])),
            Some(Command::List {
                database_url: "notes.db".to_string()
            })
        );
    }

    #[test]
    fn seeding_inserts_the_sample_note() {
        let dir = tempdir().unwrap();
        let url = dir.path().join("seed.db").to_str().unwrap().to_string();

        run(Command::Seed {
            database_url: url.clone(),
        })
        .unwrap();

        let db = Database::new(&url).unwrap();
        let notes = db.list_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].content, SAMPLE_NOTE);
        assert!(!notes[0].important);
    }
}
