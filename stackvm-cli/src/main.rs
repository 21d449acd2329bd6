//! stackvm CLI — assemble, run, and disassemble programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/format/assembly error
//! - 2: Usage error (reported by clap)
//! - 3: Runtime error

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use stackvm_vm::config::DEFAULT_PRECISION;

#[derive(Parser, Debug)]
#[command(name = "stackvm", version, about = "Stack virtual machine toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Assemble a source file into a binary container
    Assemble {
        /// Assembly source
        source: PathBuf,
        /// Binary container to write
        output: PathBuf,
    },
    /// Execute one or more binary containers in order
    Run {
        /// Binary containers; execution stops at the first failure
        #[arg(required = true)]
        binaries: Vec<PathBuf>,
        /// Print each instruction before it executes
        #[arg(long)]
        trace: bool,
        /// Decimal places printed by OUT
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: usize,
    },
    /// Print the assembly text of a binary container
    Disassemble {
        /// Binary container to read
        binary: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Assemble { source, output } => commands::assemble(source, output),
        Command::Run {
            binaries,
            trace,
            precision,
        } => commands::run(binaries, *trace, *precision),
        Command::Disassemble { binary } => commands::disassemble(binary),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}
