//! CLI Layer - 命令行入口

mod runner;

pub use runner::{config_for_args, parse_args, run, CliError, CliOutcome, SpeakArgs, USAGE};
