mod files;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use tracing::debug;
use vbs_fmt::{FormatOptions, OutputMode};
use vbs_lexer::{LexError, Lexer, TokenKind};
use vbs_scanner::ScanMode;

#[derive(Parser)]
#[command(name = "vbscribble")]
#[command(about = "Formatter, linter and token dumper for classic ASP / VBScript")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-indent and re-case ASP pages, writing the result to stdout
    Fmt {
        /// Rewrite markup into Response.Write statements
        #[arg(long)]
        rw: bool,

        /// Treat input as bare script instead of an ASP page
        #[arg(long)]
        code: bool,

        /// File extension searched for in directories
        #[arg(long, default_value = "asp")]
        ext: String,

        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Report discouraged constructs in every page under a folder
    Lint {
        /// Root folder to search
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// File extension to lint
        #[arg(long, default_value = "asp")]
        ext: String,
    },

    /// Print the classified token stream
    Lex {
        /// Treat input as bare script instead of an ASP page
        #[arg(long)]
        code: bool,

        /// File extension searched for in directories
        #[arg(long, default_value = "asp")]
        ext: String,

        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let ok = match cli.command {
        Command::Fmt {
            rw,
            code,
            ext,
            paths,
        } => cmd_fmt(&paths, &ext, rw, scan_mode(code)),
        Command::Lint { root, ext } => cmd_lint(&root, &ext),
        Command::Lex { code, ext, paths } => cmd_lex(&paths, &ext, scan_mode(code)),
    };

    if !ok {
        std::process::exit(1);
    }
}

/// Install a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init();
}

fn scan_mode(code: bool) -> ScanMode {
    if code {
        ScanMode::Code
    } else {
        ScanMode::Markup
    }
}

/// Expand paths, reporting walk failures. Returns the files and whether
/// the walk was clean.
fn expand(paths: &[PathBuf], ext: &str) -> (Vec<PathBuf>, bool) {
    let (files, errors) = files::collect(paths, ext);
    debug!(files = files.len(), errors = errors.len(), ext, "collected inputs");
    for (path, e) in &errors {
        eprintln!("Error reading {}: {e}", path.display());
    }
    (files, errors.is_empty())
}

fn read(path: &Path) -> Option<String> {
    match files::read_source(path) {
        Ok(source) => Some(source),
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            None
        }
    }
}

fn report_error(path: &Path, err: &LexError) {
    eprintln!("PARSE ERROR {}:{}: {}", path.display(), err.line, err.kind);
}

fn cmd_fmt(paths: &[PathBuf], ext: &str, rw: bool, mode: ScanMode) -> bool {
    let options = FormatOptions {
        output: if rw {
            OutputMode::Rewrite
        } else {
            OutputMode::Normal
        },
        initial_mode: mode,
        ..Default::default()
    };

    let (files, mut ok) = expand(paths, ext);
    for path in files {
        eprintln!("\n*** {} ***", path.display());
        let Some(source) = read(&path) else {
            ok = false;
            continue;
        };
        match vbs_fmt::format(&source, &options) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                report_error(&path, &e);
                ok = false;
            }
        }
    }
    ok
}

fn cmd_lint(root: &Path, ext: &str) -> bool {
    let (files, mut ok) = expand(&[root.to_path_buf()], ext);
    for path in files {
        let Some(source) = read(&path) else {
            ok = false;
            continue;
        };
        let report = vbs_lint::lint_source(&source, ScanMode::Markup);
        if !report.messages.is_empty() {
            println!("*** {} ***", path.display());
            for message in &report.messages {
                println!("{message}");
            }
            println!();
        }
        if let Some(e) = &report.error {
            report_error(&path, e);
            ok = false;
        }
    }
    ok
}

fn cmd_lex(paths: &[PathBuf], ext: &str, mode: ScanMode) -> bool {
    let (files, mut ok) = expand(paths, ext);
    for path in files {
        println!("\n*** {} ***", path.display());
        let Some(source) = read(&path) else {
            ok = false;
            continue;
        };
        let mut lexer = Lexer::new(&source, mode);
        loop {
            match lexer.lex() {
                Ok(token) if token.kind == TokenKind::Eof => break,
                Ok(token) => println!(
                    "{:<18} {:?} {:?}",
                    format!("{:?}", token.kind.category()),
                    token.kind.to_string(),
                    token.raw
                ),
                Err(e) => {
                    report_error(&path, &e);
                    ok = false;
                    break;
                }
            }
        }
    }
    ok
}
