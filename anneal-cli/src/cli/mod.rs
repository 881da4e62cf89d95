//! Command-line interface for the anneal Hamiltonian-path simulator.
//!
//! Parses the three-positional-argument contract (graph document, start
//! vertex, end vertex), runs the search pipeline, and renders the narrated
//! report to stdout.

mod commands;

pub use commands::{
    Cli, CliError, ModeArg, Report, VERDICT_NO, VERDICT_YES, render_report, run_cli,
};
