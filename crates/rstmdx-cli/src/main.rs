//! rstmdx CLI - reStructuredText to MDX converter.

use clap::{ArgAction, Parser, Subcommand};
use rstmdx::{ConversionResult, EmitOptions, Severity, rst};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rstmdx")]
#[command(author, version, about = "reStructuredText to MDX converter", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an RST file, or every .rst file under a directory, to MDX
    Convert {
        /// Input file or directory (use - for stdin)
        input: PathBuf,

        /// Output file, or output directory when the input is a directory
        /// (use - or omit for stdout; directories default to sibling .mdx files)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reflow prose to this many columns (0 disables)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        wrap: i32,
    },

    /// Print the parsed document tree as JSON
    Ast {
        /// Input file (use - for stdin)
        input: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("output {} must be a directory when the input is a directory", .0.display())]
    OutputNotDirectory(PathBuf),

    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Convert {
            input,
            output,
            wrap,
        } => {
            let options = EmitOptions::wrapped(wrap);
            if input.is_dir() {
                convert_tree(&input, output.as_deref(), &options)?;
            } else {
                convert_single(&input, output.as_deref(), &options)?;
            }
        }
        Commands::Ast { input } => {
            print_ast(&input)?;
        }
    }

    Ok(())
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if is_stdio(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn write_output(path: &Path, mdx: &str) -> Result<(), CliError> {
    fs::write(path, with_final_newline(mdx)).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn with_final_newline(mdx: &str) -> String {
    if mdx.is_empty() {
        String::new()
    } else {
        format!("{mdx}\n")
    }
}

/// Log every diagnostic of a conversion against its source.
///
/// Warnings go out at `warn`; info diagnostics such as skipped comments
/// only show up with `-vv`.
fn report<T>(source: &Path, result: &ConversionResult<T>) {
    for diagnostic in &result.diagnostics {
        let path = source.display();
        match diagnostic.severity {
            Severity::Warning => warn!(
                path = %path,
                line = ?diagnostic.line,
                text = %diagnostic.text,
                "{}",
                diagnostic.message
            ),
            Severity::Info => debug!(
                path = %path,
                line = ?diagnostic.line,
                text = %diagnostic.text,
                "{}",
                diagnostic.message
            ),
        }
    }
}

fn convert_text(source: &Path, text: &str, options: &EmitOptions) -> ConversionResult<String> {
    let result = rstmdx::convert(text, options);
    report(source, &result);
    result
}

fn convert_single(
    input: &Path,
    output: Option<&Path>,
    options: &EmitOptions,
) -> Result<(), CliError> {
    let text = read_input(input)?;
    let mdx = convert_text(input, &text, options).value;

    match output {
        Some(path) if !is_stdio(path) => {
            write_output(path, &mdx)?;
            info!("converted {} -> {}", input.display(), path.display());
        }
        _ => {
            io::stdout().write_all(with_final_newline(&mdx).as_bytes())?;
        }
    }

    Ok(())
}

/// Convert every `.rst` file under `input`, returning the files written.
///
/// Without `output` each file gets a sibling `.mdx`; with it the tree is
/// mirrored under that directory.
fn convert_tree(
    input: &Path,
    output: Option<&Path>,
    options: &EmitOptions,
) -> Result<Vec<PathBuf>, CliError> {
    let output = output.filter(|path| !is_stdio(path));
    if let Some(out_dir) = output
        && out_dir.exists()
        && !out_dir.is_dir()
    {
        return Err(CliError::OutputNotDirectory(out_dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    collect_rst_files(input, &mut sources)?;
    sources.sort();

    let mut written = Vec::with_capacity(sources.len());
    let mut with_diagnostics = 0;
    for file in sources {
        let target = match output {
            Some(out_dir) => {
                let relative = file.strip_prefix(input).unwrap_or(&file);
                out_dir.join(relative).with_extension("mdx")
            }
            None => file.with_extension("mdx"),
        };
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| CliError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = read_input(&file)?;
        let result = convert_text(&file, &text, options);
        if result.has_diagnostics() {
            with_diagnostics += 1;
        }
        write_output(&target, &result.value)?;
        info!("converted {} -> {}", file.display(), target.display());
        written.push(target);
    }

    info!(
        files = written.len(),
        with_diagnostics,
        "converted directory {}",
        input.display()
    );
    Ok(written)
}

fn collect_rst_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), CliError> {
    let entries = fs::read_dir(dir).map_err(|source| CliError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_rst_files(&path, files)?;
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("rst"))
        {
            files.push(path);
        }
    }
    Ok(())
}

fn print_ast(input: &Path) -> Result<(), CliError> {
    let text = read_input(input)?;
    let result = rst::parse(&text);
    report(input, &result);

    let json = serde_json::to_string_pretty(&result.value)?;
    println!("{json}");
    eprintln!(
        "{} nodes, {} diagnostics",
        result.value.len(),
        result.diagnostics.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_args() {
        let cli = Cli::try_parse_from(["rstmdx", "-vv", "convert", "docs", "-o", "out", "-w", "80"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                input,
                output,
                wrap,
            } => {
                assert_eq!(input, PathBuf::from("docs"));
                assert_eq!(output, Some(PathBuf::from("out")));
                assert_eq!(wrap, 80);
            }
            Commands::Ast { .. } => panic!("expected convert"),
        }
    }

    #[test]
    fn test_convert_tree_writes_siblings() {
        let dir = tempdir().unwrap();
        write(&dir.path().join("index.rst"), "Home\n====\n\nWelcome.\n");
        write(&dir.path().join("guide/intro.rst"), "- a\n- b\n");
        write(&dir.path().join("notes.txt"), "ignored");

        let written = convert_tree(dir.path(), None, &EmitOptions::default()).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("guide/intro.mdx"),
                dir.path().join("index.mdx"),
            ]
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("index.mdx")).unwrap(),
            "---\ntitle: Home\n---\n\nWelcome.\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("guide/intro.mdx")).unwrap(),
            "- a\n- b\n"
        );
        assert!(!dir.path().join("notes.mdx").exists());
    }

    #[test]
    fn test_convert_tree_mirrors_into_output() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        write(&src.path().join("a/b/page.rst"), ".. note::\n\n   Hi.\n");

        let written =
            convert_tree(src.path(), Some(out.path()), &EmitOptions::default()).unwrap();

        let target = out.path().join("a/b/page.mdx");
        assert_eq!(written, vec![target.clone()]);
        assert_eq!(fs::read_to_string(target).unwrap(), ":::note\nHi.\n:::\n");
        assert!(!src.path().join("a/b/page.mdx").exists());
    }

    #[test]
    fn test_comment_is_reported_not_written() {
        let result = convert_text(
            Path::new("page.rst"),
            "Body.\n\n.. internal note\n",
            &EmitOptions::default(),
        );
        assert_eq!(result.value, "Body.");
        assert!(result.has_diagnostics());
        assert_eq!(result.diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn test_convert_tree_rejects_file_output() {
        let src = tempdir().unwrap();
        let file = src.path().join("out.mdx");
        write(&file, "");

        let err = convert_tree(src.path(), Some(&file), &EmitOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::OutputNotDirectory(_)));
    }

    #[test]
    fn test_convert_single_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("page.rst");
        let output = dir.path().join("page.mdx");
        write(&input, "A long line of words to wrap.\n");

        convert_single(&input, Some(&output), &EmitOptions::wrapped(12)).unwrap();

        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "A long line\nof words to\nwrap.\n"
        );
    }

    #[test]
    fn test_missing_input_is_read_error() {
        let dir = tempdir().unwrap();
        let err = convert_single(&dir.path().join("missing.rst"), None, &EmitOptions::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
        assert!(err.to_string().starts_with("cannot read "));
    }
}
