//! Command-line tool for checking brace balance in source files.
//!
//! Usage: braces [OPTIONS] [FILE|DIR]...
//!
//! Options:
//!   -e, --ext <LIST>       Extensions checked in directories (comma-separated)
//!                          [default: $BRACES_EXTENSIONS, or a built-in list]
//!   -q, --quiet            Print nothing; report through the exit status only
//!   -v, --verbose          Log debug diagnostics to stderr
//!   -h, --help             Print help
//!   -V, --version          Print version

use libbrace::{Report, SourceContext, SourceText};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod walk;

/// Exit status for balanced input.
const EXIT_OK: i32 = 0;
/// Exit status when any input has a defect or could not be loaded.
const EXIT_DEFECTS: i32 = 1;
/// Exit status for bad command-line usage.
const EXIT_USAGE: i32 = 2;

/// What to check, classified once when arguments are parsed.
#[derive(Debug, PartialEq)]
enum Input {
    Stdin,
    File(PathBuf),
    Dir(PathBuf),
}

impl Input {
    fn from_arg(arg: &str) -> Self {
        let path = PathBuf::from(arg);
        if path.is_dir() {
            Input::Dir(path)
        } else {
            Input::File(path)
        }
    }
}

#[derive(Debug)]
struct Options {
    ext_list: Option<String>,
    quiet: bool,
    verbose: bool,
    inputs: Vec<Input>,
}

#[derive(Debug)]
enum Command {
    Help,
    Version,
    Check(Options),
}

/// How much to print.
#[derive(Clone, Copy)]
struct Output {
    quiet: bool,
    /// Prefix each report line with the file path.
    prefixed: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let stdout = io::stdout();
    let exit_code = run(&args, io::stdin().lock(), &mut stdout.lock());
    process::exit(exit_code);
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options {
        ext_list: None,
        quiet: false,
        verbose: false,
        inputs: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-e" | "--ext" => {
                i += 1;
                if i >= args.len() {
                    return Err("--ext requires a comma-separated list".to_string());
                }
                options.ext_list = Some(args[i].clone());
            }
            "-q" | "--quiet" => {
                options.quiet = true;
            }
            "-v" | "--verbose" => {
                options.verbose = true;
            }
            "-" => {
                options.inputs.push(Input::Stdin);
            }
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            path => {
                options.inputs.push(Input::from_arg(path));
            }
        }
        i += 1;
    }

    if options.inputs.is_empty() {
        options.inputs.push(Input::Stdin);
    }
    if options.inputs.iter().filter(|i| **i == Input::Stdin).count() > 1 {
        return Err("stdin can only be read once".to_string());
    }

    Ok(Command::Check(options))
}

/// Run the tool over `args`, writing reports to `out`. Returns the exit status.
fn run(args: &[String], mut stdin: impl Read, out: &mut impl Write) -> i32 {
    let options = match parse_args(args) {
        Ok(Command::Help) => return write_output(out, HELP),
        Ok(Command::Version) => {
            return write_output(out, &format!("braces {}\n", env!("CARGO_PKG_VERSION")))
        }
        Ok(Command::Check(options)) => options,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return EXIT_USAGE;
        }
    };

    init_logging(options.verbose);

    let extensions = walk::resolve_extensions(options.ext_list.as_deref());
    debug!(?extensions, "directory extension filter");

    let single_file = options.inputs.len() == 1 && !matches!(options.inputs[0], Input::Dir(_));
    let output = Output {
        quiet: options.quiet,
        prefixed: !single_file,
    };

    let mut had_errors = false;
    for input in &options.inputs {
        let exit_code = match input {
            Input::Stdin => process_stdin(&mut stdin, out, output),
            Input::Dir(path) => process_directory(path, &extensions, out, output),
            Input::File(path) => process_file(path, out, output),
        };
        if exit_code != EXIT_OK {
            had_errors = true;
        }
    }

    if had_errors {
        EXIT_DEFECTS
    } else {
        EXIT_OK
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Fails only when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn process_directory(
    dir: &Path,
    extensions: &[String],
    out: &mut impl Write,
    output: Output,
) -> i32 {
    let files = match walk::collect_files(dir, extensions) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return EXIT_DEFECTS;
        }
    };

    let mut had_errors = false;
    for file in &files {
        if process_file(file, out, output) != EXIT_OK {
            had_errors = true;
        }
    }

    if had_errors {
        EXIT_DEFECTS
    } else {
        EXIT_OK
    }
}

fn process_file(path: &Path, out: &mut impl Write, output: Output) -> i32 {
    match SourceText::read(path) {
        Ok(text) => {
            let label = path.display().to_string();
            emit_report(&text.check(), Some(&label), out, output)
        }
        Err(e) => {
            // Both variants already name the path.
            eprintln!("Error: {}", e);
            EXIT_DEFECTS
        }
    }
}

fn process_stdin(stdin: &mut impl Read, out: &mut impl Write, output: Output) -> i32 {
    let mut buffer = Vec::new();
    if let Err(e) = stdin.read_to_end(&mut buffer) {
        eprintln!("Error reading stdin: {}", e);
        return EXIT_DEFECTS;
    }
    match SourceText::from_bytes(&buffer, &SourceContext::new(Some("stdin"))) {
        Ok(text) => emit_report(&text.check(), Some("stdin"), out, output),
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_DEFECTS
        }
    }
}

fn emit_report(report: &Report, label: Option<&str>, out: &mut impl Write, output: Output) -> i32 {
    if !output.quiet && write_output(out, &render(report, label, output.prefixed)) != EXIT_OK {
        return EXIT_DEFECTS;
    }
    if report.is_balanced() {
        EXIT_OK
    } else {
        EXIT_DEFECTS
    }
}

fn write_output(out: &mut impl Write, text: &str) -> i32 {
    if let Err(e) = out.write_all(text.as_bytes()) {
        eprintln!("Error writing output: {}", e);
        return EXIT_DEFECTS;
    }
    EXIT_OK
}

/// Render a report for the terminal, newline-terminated.
fn render(report: &Report, label: Option<&str>, prefixed: bool) -> String {
    match label.filter(|_| prefixed) {
        Some(label) if report.is_balanced() => format!("{}: ok\n", label),
        Some(label) => report
            .to_string()
            .lines()
            .map(|line| format!("{}: {}\n", label, line))
            .collect(),
        None => format!("{}\n", report),
    }
}

const HELP: &str = "braces - brace balance checker

USAGE:
    braces [OPTIONS] [FILE|DIR]...

ARGS:
    [FILE|DIR]...    Files or directories to check (reads stdin if none, or for '-')
                     Directories are walked recursively; only files with a
                     listed extension are checked

OPTIONS:
    -e, --ext <LIST>    Comma-separated extensions checked in directories
                        [default: $BRACES_EXTENSIONS, or
                         ts,tsx,js,jsx,rs,c,h,cpp,java,go,cs,json,css]

    -q, --quiet         Print nothing; report through the exit status only

    -v, --verbose       Log debug diagnostics to stderr (RUST_LOG also works)

    -h, --help          Print help

    -V, --version       Print version

EXIT STATUS:
    0    All input is balanced
    1    Unmatched braces found, or an input could not be read
    2    Invalid command line

EXAMPLES:
    # Check a single file
    braces context/AppContext.tsx

    # Check every TypeScript file under src/
    braces -e ts,tsx src/

    # Check from a pipe, exit status only
    git show HEAD:context/AppContext.tsx | braces -q
";
