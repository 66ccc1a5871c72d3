//! Small helpers shared across CLI tests.

use std::path::Path;

use tempfile::TempDir;

use super::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, GenerationReport, RenderOptions,
    run_cli,
};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Seeded options writing into `dir`.
pub(super) fn options_in(dir: &TempDir, file: &str) -> RenderOptions {
    RenderOptions {
        output: dir.path().join(file),
        seed: Some(42),
        ..RenderOptions::default()
    }
}

pub(super) fn generate_cli(nodes: &str, edges: &str, options: RenderOptions) -> Cli {
    Cli {
        command: Command::Generate(GenerateCommand {
            nodes: nodes.to_owned(),
            edges: edges.to_owned(),
            options,
        }),
    }
}

pub(super) fn generated_report(cli: Cli) -> GenerationReport {
    match run_cli(cli) {
        Ok(ExecutionSummary::Generated(report)) => report,
        Ok(other) => panic!("unexpected summary: {other:?}"),
        Err(err) => panic!("generate must succeed: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn read(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => panic!("failed to read {}: {err}", path.display()),
    }
}
