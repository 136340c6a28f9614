use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, CONFIG_PATH_ENV};
use crate::interpreter::{count_primitives, parse_command, Command, ProgramRunner};
use crate::sandbox::{Arena, ArenaLayout};

#[derive(Parser)]
#[command(name = "roborally")]
#[command(about = "RoboRally - parse, format and run robot control programs", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a program and report its shape
    Check {
        /// Program source file
        file: PathBuf,

        /// Print the parsed tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a program in canonical form
    Fmt {
        /// Program source file
        file: PathBuf,

        /// Print everything on one line
        #[arg(long)]
        compact: bool,
    },

    /// Step a program through a sandbox arena
    Run {
        /// Program source file
        file: PathBuf,

        /// Arena layout (TOML)
        #[arg(long)]
        arena: PathBuf,

        /// Number of steps to execute (default: until done, capped by runner.max_steps)
        #[arg(long)]
        steps: Option<usize>,
    },
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

/// Run the CLI with provided arguments
pub fn run_cli_from_args(args: Vec<String>) -> Result<()> {
    let cli = Cli::parse_from(args);
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    if let Some(config_path) = &cli.config {
        std::env::set_var(CONFIG_PATH_ENV, config_path);
    }

    // Load config before anything else so errors surface first
    let config = Config::load()?;
    init_tracing(&config)?;

    match cli.command {
        Commands::Check { file, json } => {
            let program = load_program(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&program)?);
            } else {
                println!("{}", program);
                println!("{}", summarize(&program));
            }
        }

        Commands::Fmt { file, compact } => {
            let program = load_program(&file)?;
            println!("{}", format_program(&program, compact));
        }

        Commands::Run { file, arena, steps } => {
            let world = run_in_arena(&file, &arena, steps, &config)?;

            for (n, performed) in world.journal().iter().enumerate() {
                println!(
                    "{:>5}  {:<22} {}",
                    n + 1,
                    performed.primitive.to_string(),
                    performed.outcome
                );
            }

            let robot = world.robot();
            println!(
                "\nRobot at ({}, {}) facing {:?}, energy {}",
                robot.position.x, robot.position.y, robot.facing, robot.energy
            );
            println!("Steps delivered: {}", world.journal().len());
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log_level '{}'", config.log_level))?,
    };

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
    Ok(())
}

/// Step the program at `file` through the arena at `layout_path`
///
/// Without `steps` the program runs until done or until `runner.max_steps`.
fn run_in_arena(
    file: &Path,
    layout_path: &Path,
    steps: Option<usize>,
    config: &Config,
) -> Result<Arena> {
    let program = load_program(file)?;
    let source = fs::read_to_string(layout_path)
        .with_context(|| format!("Failed to read arena layout {}", layout_path.display()))?;
    let layout = ArenaLayout::from_toml_str(&source)
        .with_context(|| format!("Invalid arena layout {}", layout_path.display()))?;
    let mut world = layout.build(config.energy)?;

    let mut runner = ProgramRunner::with_program(program);
    let delivered = match steps {
        Some(n) => runner.step_n(&mut world, n)?,
        None => {
            let limit = config.runner.max_steps;
            let delivered = runner.step_n(&mut world, limit)?;
            if runner.has_next(&world)? {
                warn!(limit, "Stopped at runner.max_steps with steps remaining");
            }
            delivered
        }
    };
    info!(delivered, cursor = runner.cursor(), "Program stopped");

    Ok(world)
}

fn load_program(path: &Path) -> Result<Command> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))?;
    parse_command(&source).with_context(|| format!("Failed to parse {}", path.display()))
}

fn summarize(program: &Command) -> String {
    format!(
        "ok: {} primitive actions, fingerprint {}",
        count_primitives(program),
        program.fingerprint()
    )
}

fn format_program(program: &Command, compact: bool) -> String {
    if compact {
        program.to_string()
    } else {
        format!("{:#}", program)
    }
}
