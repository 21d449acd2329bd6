//! CLI command implementations.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use stackvm_common::Program;
use stackvm_vm::{Machine, MachineConfig};

/// Assemble a source file into a binary container.
pub fn assemble(source: &Path, output: &Path) -> Result<(), i32> {
    let text = fs::read_to_string(source).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", source.display());
        1
    })?;

    let program = stackvm_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {}: {e}", source.display());
        1
    })?;

    let bytes = program.encode();
    let instr_count = program.instructions().count();

    fs::write(output, &bytes).map_err(|e| {
        eprintln!("error: cannot write '{}': {e}", output.display());
        1
    })?;

    eprintln!(
        "assembled {instr_count} instructions ({} bytes) -> {}",
        bytes.len(),
        output.display()
    );
    Ok(())
}

/// Execute binary containers in order, stopping at the first failure.
pub fn run(binaries: &[PathBuf], trace: bool, precision: usize) -> Result<(), i32> {
    let mut vm = Machine::stdio(MachineConfig { precision, trace });

    for binary in binaries {
        let bytes = read_file(binary)?;

        vm.load(&bytes).map_err(|e| {
            eprintln!("error: {}: {e}", binary.display());
            1
        })?;

        let start = Instant::now();
        vm.execute().map_err(|e| {
            eprintln!("runtime error: {}: {e}", binary.display());
            3
        })?;
        eprintln!("Execution time: {} ms", start.elapsed().as_millis());
    }
    Ok(())
}

/// Print the assembly text of a binary container.
pub fn disassemble(binary: &Path) -> Result<(), i32> {
    let program = read_binary(binary)?;
    let text = stackvm_assembler::disassemble(&program).map_err(|e| {
        eprintln!("error: {}: {e}", binary.display());
        1
    })?;
    print!("{text}");
    Ok(())
}

fn read_file(path: &Path) -> Result<Vec<u8>, i32> {
    fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{}': {e}", path.display());
        1
    })
}

/// Read and validate a binary container.
fn read_binary(path: &Path) -> Result<Program, i32> {
    let bytes = read_file(path)?;
    Program::decode(&bytes).map_err(|e| {
        eprintln!("error: {}: {e}", path.display());
        1
    })
}
