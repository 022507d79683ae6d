use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Disassembles a SMIS `.bin` machine-code file into assembly source.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input machine-code file (must end in `.bin`).
    input: PathBuf,
    /// Output assembly file (must end in `.txt`).
    output: PathBuf,
}

fn has_extension(path: &PathBuf, expected: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(expected)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !has_extension(&args.input, "bin") {
        eprintln!("error: input file must have a .bin extension");
        return ExitCode::from(1);
    }
    if !has_extension(&args.output, "txt") {
        eprintln!("error: output file must have a .txt extension");
        return ExitCode::from(1);
    }

    let program = match smisbin::read_file(&args.input) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: reading \"{}\": {}", args.input.display(), err);
            return ExitCode::from(1);
        }
    };

    let text = match smisdis::disassemble(program.words()) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    if let Err(err) = fs::write(&args.output, text) {
        eprintln!("error: writing \"{}\": {}", args.output.display(), err);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
