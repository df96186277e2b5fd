//! taskstore CLI
//!
//! Offline administration of a taskstore data directory. Do not run it
//! against a directory a live server is using.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use taskstore::tasks::{import_csv, NewTask, Task, TaskUpdate};
use taskstore::{Database, Result, StoreError, TaskService};
use tracing_subscriber::{fmt, EnvFilter};

/// taskstore CLI
#[derive(Parser, Debug)]
#[command(name = "taskstore-cli")]
#[command(about = "CLI for a taskstore data directory")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./taskstore_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tasks as JSON
    List {
        /// Only tasks whose title or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create a task
    Add {
        title: String,
        description: String,
    },

    /// Replace the title and description of a task
    Edit {
        id: String,
        title: String,
        description: String,
    },

    /// Toggle the completion state of a task
    Complete {
        id: String,
    },

    /// Delete a task
    Delete {
        id: String,
    },

    /// Import tasks from a CSV file with `title` and `description` columns
    Import {
        file: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let tasks = TaskService::new(Database::open_path(&args.data_dir)?);

    match args.command {
        Commands::List { search } => {
            let found = tasks.list(search.as_deref())?;
            print_json(&found)?;
        }
        Commands::Add { title, description } => {
            let task = tasks.create(NewTask::new(title, description))?;
            print_json(&task)?;
        }
        Commands::Edit {
            id,
            title,
            description,
        } => {
            let task = tasks.update(&id, TaskUpdate::new(title, description))?;
            print_json(&task)?;
        }
        Commands::Complete { id } => {
            let task = tasks.toggle_complete(&id)?;
            println!("{} {}", task.id, completion_label(&task));
        }
        Commands::Delete { id } => {
            tasks.delete(&id)?;
            println!("{} deleted", id);
        }
        Commands::Import { file } => {
            let reader = BufReader::new(File::open(&file)?);
            let report = import_csv(&tasks, reader)?;
            println!(
                "imported {} task(s), skipped {} row(s)",
                report.imported, report.skipped
            );
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

fn completion_label(task: &Task) -> &'static str {
    if task.is_completed() {
        "completed"
    } else {
        "reopened"
    }
}
