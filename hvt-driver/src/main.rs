//! Hack VM Translator Driver
//!
//! Command-line entry point. Owns everything the core treats as external:
//! file and directory discovery, comment stripping, unit base-name
//! extraction, and writing the generated assembly with the conventional
//! naming (file.vm -> file.asm, dir -> dir/dir.asm).

use clap::Parser;
use hvt_backend::ProgramAssembler;
use hvt_codegen::emit_program;
use hvt_common::{DiagnosticSink, TranslateError};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Comment marker; everything from it to end of line is stripped.
const COMMENT_MARKER: &str = "//";

#[derive(Parser)]
#[command(name = "hvt")]
#[command(about = "Hack VM Translator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input .vm file or directory of .vm files
    input: PathBuf,

    /// Output assembly file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the bootstrap block even when Sys.vm is absent
    #[arg(long, conflicts_with = "no_bootstrap")]
    bootstrap: bool,

    /// Suppress the bootstrap block even when Sys.vm is present
    #[arg(long)]
    no_bootstrap: bool,

    /// Write collected diagnostics to a JSON file
    #[arg(long)]
    diagnostics_json: Option<PathBuf>,

    /// Exit nonzero if any diagnostic was reported
    #[arg(long)]
    strict: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(diagnostic_count) => {
            if cli.strict && diagnostic_count > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<usize, TranslateError> {
    let input = &cli.input;

    let (units, bootstrap, default_output) = if input.is_dir() {
        collect_directory(input, cli)?
    } else if input.is_file() {
        let unit = unit_base_name(input)?;
        let lines = read_unit_lines(input)?;
        (
            vec![(unit, lines)],
            cli.bootstrap,
            input.with_extension("asm"),
        )
    } else {
        return Err(TranslateError::Io {
            message: format!("input is not a file or directory: {}", input.display()),
        });
    };

    let mut assembler = ProgramAssembler::new();
    if bootstrap {
        assembler.emit_bootstrap();
    }
    for (name, lines) in &units {
        assembler.add_unit(name, lines);
    }
    let (program, sink) = assembler.finish();

    sink.print_to_stderr();
    if !sink.is_empty() {
        eprintln!("{}", sink.summary());
    }

    if let Some(path) = &cli.diagnostics_json {
        write_diagnostics_json(&sink, path)?;
    }

    let asm_text = emit_program(&program).map_err(|e| TranslateError::Internal {
        message: e.to_string(),
    })?;

    let output_path = cli.output.clone().unwrap_or(default_output);
    fs::write(&output_path, asm_text)?;
    println!("Assembly written to: {}", output_path.display());

    Ok(sink.len())
}

/// Discover the `.vm` units of a directory, in sorted order for a
/// deterministic program layout. Bootstrap defaults to on iff `Sys.vm`
/// is among them.
fn collect_directory(
    dir: &Path,
    cli: &Cli,
) -> Result<(Vec<(String, Vec<String>)>, bool, PathBuf), TranslateError> {
    let mut vm_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "vm"))
        .collect();
    vm_files.sort();

    if vm_files.is_empty() {
        return Err(TranslateError::Io {
            message: format!("no .vm files found in {}", dir.display()),
        });
    }
    info!("found {} unit(s) in {}", vm_files.len(), dir.display());

    let has_sys = vm_files
        .iter()
        .any(|path| path.file_name().is_some_and(|name| name == "Sys.vm"));
    let bootstrap = if cli.no_bootstrap {
        false
    } else {
        cli.bootstrap || has_sys
    };

    let mut units = Vec::new();
    for path in &vm_files {
        units.push((unit_base_name(path)?, read_unit_lines(path)?));
    }

    let dir_name = dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "program".to_string());
    let output = dir.join(format!("{}.asm", dir_name));

    Ok((units, bootstrap, output))
}

/// Unit base name: the file stem, which namespaces the unit's statics.
fn unit_base_name(path: &Path) -> Result<String, TranslateError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| TranslateError::Io {
            message: format!("cannot derive unit name from {}", path.display()),
        })
}

/// Read a unit's lines with comments stripped; the core never sees `//`.
fn read_unit_lines(path: &Path) -> Result<Vec<String>, TranslateError> {
    debug!("reading unit {}", path.display());
    let source = fs::read_to_string(path)?;
    Ok(source.lines().map(strip_comment).collect())
}

fn strip_comment(line: &str) -> String {
    match line.find(COMMENT_MARKER) {
        Some(index) => line[..index].to_string(),
        None => line.to_string(),
    }
}

fn write_diagnostics_json(sink: &DiagnosticSink, path: &Path) -> Result<(), TranslateError> {
    let json = serde_json::to_string_pretty(sink.diagnostics()).map_err(|e| {
        TranslateError::Internal {
            message: format!("serializing diagnostics: {}", e),
        }
    })?;
    fs::write(path, json)?;
    info!("diagnostics written to {}", path.display());
    Ok(())
}
