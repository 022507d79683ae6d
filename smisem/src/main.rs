use clap::Parser;
use smis::{ExitCode as RunExitCode, Processor};
use std::path::PathBuf;
use std::process::ExitCode;

/// Runs a SMIS `.bin` machine-code file to completion on the register
/// machine and reports how it stopped.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Program file to run (must end in `.bin`).
    program: PathBuf,
}

fn has_extension(path: &PathBuf, expected: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(expected)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !has_extension(&args.program, "bin") {
        eprintln!("error: program file must have a .bin extension");
        return ExitCode::from(1);
    }

    let program = match smisbin::read_file(&args.program) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: reading \"{}\": {}", args.program.display(), err);
            return ExitCode::from(1);
        }
    };

    let mut processor = Processor::new();
    if let Err(err) = processor.load_program(program.words()) {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }

    let exit_code = processor.run();
    println!("Exit code: {:?}", exit_code);

    match exit_code {
        RunExitCode::Halted | RunExitCode::Terminated => ExitCode::SUCCESS,
        RunExitCode::DivisionByZero | RunExitCode::InvalidOpcode => ExitCode::from(3),
    }
}
