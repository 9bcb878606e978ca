//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! the Wordy interpreter.

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for Wordy.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the Wordy source file.
    pub file: std::path::PathBuf,

    /// The function to invoke once the program is parsed.
    pub function: String,

    /// Literal arguments for the invoked function: `true`/`false`, integers
    /// (base 10 or 0x-prefixed), anything else is passed as a string.
    #[arg(allow_hyphen_values = true)]
    pub arguments: Vec<String>,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}

/// Enum for specifying the log level of Wordy.
#[derive(ValueEnum, Clone, Copy, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log warnings.
    #[value(alias("1"))]
    Warn,

    /// Also log information about the general state of the interpreter.
    #[value(alias("2"))]
    Info,

    /// Log everything which happens internally in the pipeline.
    #[value(alias("3"))]
    Debug,

    /// Log extra information, down to single evaluation steps.
    #[value(alias("4"))]
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(value)
    }
}

impl From<LogLevel> for log::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
