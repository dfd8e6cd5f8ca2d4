use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;
use tursim::programs::PARITY_MACHINE;
use tursim::{
    EngineConfig, Frame, MachineRegistry, Mode, Outcome, RunConfig, SpecLoader, TuringMachine,
    ValidSpec,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Log engine events (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a machine on an input string
    Run {
        /// Name of a built-in machine
        #[arg(short, long, default_value = PARITY_MACHINE, conflicts_with = "spec")]
        machine: String,

        /// A machine specification in JSON
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// The input written on the tape
        #[arg(short, long, default_value = "")]
        input: String,

        /// Step budget before reporting an unknown result
        #[arg(long, default_value_t = RunConfig::default().max_steps)]
        max_steps: usize,

        /// Blank cells shown on each side of the tape
        #[arg(long, default_value_t = RunConfig::default().padding)]
        padding: usize,

        /// Accept input symbols outside the input alphabet
        #[arg(long)]
        lenient: bool,

        /// Print every step of the execution
        #[arg(short = 'd', long)]
        trace: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the built-in machines
    List,
    /// Show the formal definition of a machine
    Info {
        /// Name of a built-in machine
        #[arg(short, long, default_value = PARITY_MACHINE, conflicts_with = "spec")]
        machine: String,

        /// A machine specification in JSON
        #[arg(short, long)]
        spec: Option<PathBuf>,
    },
    /// Write a built-in machine as JSON
    Export {
        /// Name of a built-in machine
        #[arg(short, long)]
        machine: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = MachineRegistry::with_builtins().context("failed to build machine registry")?;

    match cli.command {
        Command::Run {
            machine,
            spec,
            input,
            max_steps,
            padding,
            lenient,
            trace,
            json,
        } => {
            let spec = resolve(&registry, &machine, spec.as_deref())?;
            let config = EngineConfig {
                mode: if lenient { Mode::Lenient } else { Mode::Strict },
                // Batch runs never undo.
                history_limit: Some(0),
            };
            let run = RunConfig { max_steps, padding };

            run_machine(spec, &input, config, &run, trace, json)
        }
        Command::List => {
            for (index, name) in registry.names().iter().enumerate() {
                println!("{:2}. {}", index + 1, name);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Info { machine, spec } => {
            let spec = resolve(&registry, &machine, spec.as_deref())?;
            print_info(&spec);
            Ok(ExitCode::SUCCESS)
        }
        Command::Export { machine, output } => {
            let spec = registry.get(&machine)?.spec();

            match output {
                Some(path) => SpecLoader::save(&path, spec)
                    .with_context(|| format!("failed to export to {}", path.display()))?,
                None => println!("{}", SpecLoader::to_json(spec)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve(registry: &MachineRegistry, name: &str, path: Option<&Path>) -> Result<ValidSpec> {
    match path {
        Some(path) => SpecLoader::load(path)
            .with_context(|| format!("failed to load machine from {}", path.display())),
        None => Ok(registry.get(name)?.clone()),
    }
}

fn run_machine(
    spec: ValidSpec,
    input: &str,
    config: EngineConfig,
    run: &RunConfig,
    trace: bool,
    json: bool,
) -> Result<ExitCode> {
    let name = spec.name().to_string();
    let mut machine = TuringMachine::with_config(spec, input, config)
        .with_context(|| format!("cannot run '{}' on input '{}'", name, input))?;

    let outcome = if trace {
        println!("Initial configuration:");
        print_frame(&machine.frame(), run.padding);
        machine.run_with(run.max_steps, |frame| print_frame(frame, run.padding))
    } else {
        machine.run(run.max_steps)
    };

    let viewport = machine.view(run.padding);

    if json {
        let report = json!({
            "machine": name,
            "input": input,
            "outcome": outcome,
            "steps": machine.step_count(),
            "head": machine.head(),
            "tape": viewport,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let result = match &outcome {
            Outcome::Accepted(state) => format!("ACCEPTED (final state = {})", state),
            Outcome::Rejected(state) => format!("REJECTED (final state = {})", state),
            Outcome::Unknown => format!("UNKNOWN (exceeded {} steps)", run.max_steps),
        };
        println!(
            "Result for input '{}': {} after {} steps",
            input,
            result,
            machine.step_count()
        );
        println!("Tape:  {}", viewport.symbols());
        println!("       {}^", " ".repeat(viewport.head_offset));
    }

    Ok(if machine.is_accepted() {
        ExitCode::SUCCESS
    } else if machine.is_halted() {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    })
}

fn print_frame(frame: &Frame<'_>, padding: usize) {
    let viewport = frame.view(padding);

    println!(
        "Step {:3} | state={} | head={}",
        frame.step_count, frame.state, frame.head
    );
    println!("Tape:  {}", viewport.symbols());
    println!("       {}^", " ".repeat(viewport.head_offset));
    println!();
}

fn print_info(spec: &ValidSpec) {
    let summary = spec.summary();

    println!("{}", summary.name);
    println!("Q  = {}", set(&summary.states));
    println!("Σ  = {}", set(&summary.input_alphabet));
    println!("Γ  = {}", set(&summary.tape_alphabet));
    println!("q0 = {}", summary.initial_state);
    println!("F  = {}", set(&summary.final_states));
    println!("δ defined for {} transitions", summary.transition_count);

    let unreachable = spec.unreachable_states();
    if !unreachable.is_empty() {
        println!("unreachable: {}", set(&unreachable));
    }
}

fn set<T: Display>(items: &[T]) -> String {
    let items: Vec<String> = items.iter().map(|item| item.to_string()).collect();
    format!("{{{}}}", items.join(", "))
}
