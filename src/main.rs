use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use abacus::interpreter::{
    evaluator::core::{Interpreter, InterpreterConfig},
    import::FsLoader,
    result::{InterpreterResult, ResultEntry},
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// abacus is a small calculator language with guarded multi-clause
/// functions.
///
/// Without a file or inline script it reads statements from standard input,
/// one line at a time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Run the script in this file.
    #[arg(short, long, conflicts_with = "contents")]
    file: Option<PathBuf>,

    /// Do not load the bundled standard library.
    #[arg(long)]
    no_prelude: bool,

    /// Directory `IMPORT` paths are resolved against.
    #[arg(long, default_value = ".")]
    lib_dir: PathBuf,

    /// Do not echo statements back.
    #[arg(short, long)]
    quiet: bool,

    /// Inline script to run.
    contents: Option<String>,
}

/// What the host shows; `OUTPUT` pragmas change it between statements.
struct Output {
    ast:    bool,
    result: bool,
}

impl Output {
    fn render(&mut self, result: &InterpreterResult) {
        for entry in &result.entries {
            match entry {
                ResultEntry::Statement(statement) if self.ast => println!("> {statement}"),
                ResultEntry::Statement(_) => {},
                ResultEntry::Value(value) if self.result => println!("{value}"),
                ResultEntry::Value(_) => {},
                ResultEntry::Error(error) => eprintln!("! {error}"),
                ResultEntry::Pragma(pragma) if pragma.name == "OUTPUT" => {
                    self.ast = pragma.flag("AST").unwrap_or(self.ast);
                    self.result = pragma.flag("RESULT").unwrap_or(self.result);
                },
                ResultEntry::Pragma(pragma) => {
                    tracing::warn!(name = %pragma.name, "ignoring unknown pragma");
                },
            }
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
                             .with_writer(io::stderr)
                             .init();

    let args = Args::parse();

    let config = InterpreterConfig { load_prelude: !args.no_prelude,
                                     loader:       Box::new(FsLoader::new(args.lib_dir)), };
    let mut interpreter = match config.build() {
        Ok(interpreter) => interpreter,
        Err(e) => {
            eprintln!("! {e}");
            return ExitCode::FAILURE;
        },
    };
    let mut output = Output { ast:    !args.quiet,
                              result: true, };

    let script = match (&args.file, args.contents) {
        (Some(path), _) => match fs::read_to_string(path) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{}': {e}", path.display());
                return ExitCode::FAILURE;
            },
        },
        (None, Some(contents)) => contents,
        (None, None) => return repl(&mut interpreter, &mut output),
    };

    let result = interpreter.run(&script);
    output.render(&result);
    if result.has_error { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

/// Runs every line of standard input as its own submission.
fn repl(interpreter: &mut Interpreter, output: &mut Output) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("abacus> ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        match lines.next() {
            Some(Ok(line)) if line.trim().is_empty() => {},
            Some(Ok(line)) => output.render(&interpreter.run(&line)),
            Some(Err(e)) => {
                eprintln!("! {e}");
                return ExitCode::FAILURE;
            },
            None => return ExitCode::SUCCESS,
        }
    }
}
