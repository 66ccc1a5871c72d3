//! Command-line interface for generating and drawing loop graphs.
//!
//! `generate` draws one graph into an SVG or JSON file. `interactive` reads
//! `<nodes> <edges>` requests from standard input and redraws the same file
//! for each accepted request.

mod commands;
mod session;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GenerateCommand, InteractiveCommand,
    MutualEdgeArg, OutputFormat, RenderOptions, StrategyArg, render_report, render_summary,
    run_cli, run_interactive,
};
pub use session::{GenerationReport, RenderSurface, Session, StatusLabels};

#[cfg(test)]
mod test_helpers;
