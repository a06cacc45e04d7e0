use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use todo_app::{bootstrap, load_config, logging, AppConfig, MountedApp, TerminalHost};
use todo_core::{NewTodoEntry, TodoApi, TodoId, Transport};

#[derive(Parser)]
#[command(name = "todo", about = "Manage todos on a remote todo service")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Collection URL, overrides the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show all todos
    List,
    /// Create a todo
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        done: bool,
    },
    /// Mark a todo as done
    Done { id: TodoId },
    /// Mark a todo as not done
    Undo { id: TodoId },
    /// Change title or description
    Edit {
        id: TodoId,
        #[arg(short, long)]
        title: Option<String>,
        /// Empty string clears it
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a todo
    Rm { id: TodoId },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    let api = TodoApi::new(config.client_config());
    let mut host = TerminalHost::new(io::stdout());
    let mut app = bootstrap(api, &config, &mut host).context("failed to start")?;

    run(&mut app, cli.command.unwrap_or(Command::List))
}

fn run<T: Transport, W: io::Write>(app: &mut MountedApp<T, W>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List => {}
        Command::Add {
            title,
            description,
            done,
        } => {
            let todo = NewTodoEntry {
                title,
                description,
                done,
            };
            app.add(&todo).context("failed to add todo")?;
        }
        Command::Done { id } => {
            app.set_done(id, true)
                .with_context(|| format!("failed to complete todo {id}"))?;
        }
        Command::Undo { id } => {
            app.set_done(id, false)
                .with_context(|| format!("failed to reopen todo {id}"))?;
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            app.edit(id, title, description)
                .with_context(|| format!("failed to edit todo {id}"))?;
        }
        Command::Rm { id } => {
            app.remove(id)
                .with_context(|| format!("failed to delete todo {id}"))?;
        }
    }
    app.render().context("failed to load todos")
}
