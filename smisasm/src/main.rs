use clap::Parser;
use smisbin::Program;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Assembles a SMIS assembly source file into a `.bin` machine-code file.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input assembly file (must end in `.txt`).
    input: PathBuf,
    /// Output machine-code file (must end in `.bin`).
    output: PathBuf,
}

fn has_extension(path: &PathBuf, expected: &str) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some(expected)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if !has_extension(&args.input, "txt") {
        eprintln!("error: input file must have a .txt extension");
        return ExitCode::from(1);
    }
    if !has_extension(&args.output, "bin") {
        eprintln!("error: output file must have a .bin extension");
        return ExitCode::from(1);
    }

    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: reading \"{}\": {}", args.input.display(), err);
            return ExitCode::from(1);
        }
    };

    let (words, _source_map) = match smisasm::assemble(&source) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    let program = Program::from_words(words);
    if let Err(err) = smisbin::write_file(&args.output, &program) {
        eprintln!("error: writing \"{}\": {}", args.output.display(), err);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
