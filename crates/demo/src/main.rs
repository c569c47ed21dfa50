use anyhow::Result;
use clap::{Parser, Subcommand, ValueHint};
use std::io::{self, Write};
use std::path::PathBuf;
use tabula_demo::exercises::{catalogue, run_all, Dataset};
use tabula_demo::fixture::{employees, load_employees};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tabula",
    version,
    about = "SQL clauses as in-memory operator pipelines",
    long_about = None,
    after_help = r#"EXAMPLES
  $ tabula list
  $ tabula run                 # every exercise
  $ tabula run ex1a ex9b
  $ RUST_LOG=debug tabula run ex3a"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "List the exercises with their SQL")]
    List,
    #[command(about = "Run exercises (all of them when none is named)")]
    Run {
        #[arg(help = "Exercise names, e.g. ex1a ex4")]
        exercises: Vec<String>,
        #[arg(
            long,
            help = "JSON file with the employees to query (default: built-in table)",
            value_hint = ValueHint::FilePath
        )]
        employees: Option<PathBuf>,
    },
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::List => {
            for exercise in catalogue() {
                writeln!(out, "{:<5} {}", exercise.name, exercise.title)?;
                writeln!(out, "      {}", exercise.sql)?;
            }
        }
        Command::Run {
            exercises,
            employees: path,
        } => {
            let employees = match path {
                Some(path) => load_employees(&path)?,
                None => employees(),
            };
            let data = Dataset::new(employees)?;
            run_all(&data, &exercises, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}
