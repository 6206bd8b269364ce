//! `lineage` - view a family tree from the command line

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use lineage::{JsonFileSource, LayoutOptions, PersonId, Session, ViewId, ViewRegistry};

const PROMPT: &str = "lineage> ";

const HELP: &str = "\
Commands:
  tree          show the family tree by generation
  stats         show family statistics
  person <id>   show details of one person
  reload        fetch the tree again
  help          show this message
  quit, exit    leave";

/// View a family tree grouped by generation
#[derive(Parser, Debug)]
#[command(name = "lineage", version, about)]
struct Cli {
    /// JSON file with the person list (a bare array or {"tree": [...]})
    file: PathBuf,

    /// View to print
    #[arg(long, value_enum, default_value_t = ViewArg::Tree)]
    view: ViewArg,

    /// Person id for `--view person`
    #[arg(long)]
    id: Option<i64>,

    /// Start an interactive prompt instead of printing one view
    #[arg(short, long)]
    interactive: bool,

    /// Name of the viewing user
    #[arg(long)]
    user: Option<String>,

    /// Refuse to show the tree unless --user is given
    #[arg(long)]
    require_user: bool,

    /// Label shown for persons without a birth date
    #[arg(long)]
    unknown_date_label: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ViewArg {
    Tree,
    Stats,
    Person,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut options = LayoutOptions::new();
    if let Some(label) = &cli.unknown_date_label {
        options = options.with_unknown_date_label(label.as_str());
    }
    let mut session = Session::new(options);
    if let Some(user) = &cli.user {
        session = session.with_user(user.as_str());
    }
    if cli.require_user {
        session = session.require_sign_in();
    }

    let source = JsonFileSource::new(&cli.file);
    let registry = ViewRegistry::standard();

    if cli.interactive {
        return run_prompt(&registry, &mut session, &source);
    }

    let view = match (cli.view, cli.id) {
        (ViewArg::Tree, _) => ViewId::Tree,
        (ViewArg::Stats, _) => ViewId::Statistics,
        (ViewArg::Person, Some(id)) => ViewId::Person(PersonId(id)),
        (ViewArg::Person, None) => bail!("--view person requires --id"),
    };

    let output = registry
        .dispatch(&view, &mut session, &source)
        .with_context(|| format!("failed to show {} view", view))?;
    println!("{}", output);
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_prompt(
    registry: &ViewRegistry,
    session: &mut Session,
    source: &JsonFileSource,
) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new().context("failed to start line editor")?;
    if let Some(user) = session.user() {
        println!("Welcome, {}. Type `help` for commands.", user);
    } else {
        println!("Type `help` for commands.");
    }

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => bail!("failed to read command: {}", e),
        };
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        if let Err(e) = editor.add_history_entry(command) {
            debug!(error = %e, "failed to record history entry");
        }

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "reload" => match session.load_from(source) {
                Ok(count) => println!("Loaded {} persons from {}", count, source),
                Err(e) => eprintln!("error: {}", e),
            },
            _ => match registry.dispatch_command(command, session, source) {
                Ok(output) => println!("{}", output),
                Err(e) => eprintln!("error: {}", e),
            },
        }
    }
    Ok(())
}
