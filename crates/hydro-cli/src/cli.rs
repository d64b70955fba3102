//! CLI argument definitions for the sensor dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use hydro_model::{
    AliasCollisionPolicy, DEFAULT_HUMIDITY, DEFAULT_TEMPERATURE, HumidityDefault,
    NormalizeOptions, ValueColumn, ValveStatePolicy,
};

#[derive(Parser)]
#[command(
    name = "hydro-dash",
    version,
    about = "Hydroponic sensor dashboard - normalize and explore CSV exports",
    long_about = "Normalize hydroponic sensor CSV exports (Grafana, InfluxDB, ESP32 loggers)\n\
                  into a clean time-indexed table and print the dashboard views:\n\
                  summary statistics, chart series, filtered exports and raw data."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix each log line with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show advisories, headline metrics and summary statistics.
    Summary(InputArgs),

    /// Print the chart series as JSON.
    Series(InputArgs),

    /// Export the rows whose value lies inside a range as CSV.
    Filter(FilterArgs),

    /// Print the normalized table.
    Show(ShowArgs),

    /// List the known column aliases.
    Aliases,
}

#[derive(Args)]
pub struct InputArgs {
    /// Sensor export to read.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub normalize: NormalizeArgs,
}

#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column to filter on.
    #[arg(long = "column", value_enum)]
    pub column: ValueColumnArg,

    /// Inclusive lower bound (default: column minimum).
    #[arg(long = "min", allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Inclusive upper bound (default: column maximum).
    #[arg(long = "max", allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Write the CSV here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of rows to print.
    #[arg(long = "limit", default_value_t = 20)]
    pub limit: usize,
}

/// Normalization settings shared by every file command.
#[derive(Args)]
pub struct NormalizeArgs {
    /// How a missing humidity column is filled.
    #[arg(long = "humidity-default", value_enum, default_value = "constant")]
    pub humidity_default: HumidityDefaultArg,

    /// What to do when two columns map to the same canonical name.
    #[arg(long = "alias-collision", value_enum, default_value = "last-wins")]
    pub alias_collision: AliasCollisionArg,

    /// How valve states outside {0, 1} are handled.
    #[arg(long = "valve-state", value_enum, default_value = "pass-through")]
    pub valve_state: ValveStateArg,

    /// Temperature fill value when humidity is unavailable.
    #[arg(long = "default-temperature", default_value_t = DEFAULT_TEMPERATURE, allow_negative_numbers = true)]
    pub default_temperature: f64,

    /// Humidity fill value.
    #[arg(long = "default-humidity", default_value_t = DEFAULT_HUMIDITY)]
    pub default_humidity: f64,

    /// Reject alias collisions and out-of-range valve states.
    ///
    /// Overrides --alias-collision and --valve-state.
    #[arg(long = "strict")]
    pub strict: bool,
}

impl NormalizeArgs {
    pub fn to_options(&self) -> NormalizeOptions {
        let options = NormalizeOptions {
            humidity_default: self.humidity_default.into(),
            alias_collision: self.alias_collision.into(),
            valve_state: self.valve_state.into(),
            default_temperature: self.default_temperature,
            default_humidity: self.default_humidity,
        };
        if self.strict {
            NormalizeOptions {
                alias_collision: AliasCollisionPolicy::Reject,
                valve_state: ValveStatePolicy::Reject,
                ..options
            }
        } else {
            options
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValueColumnArg {
    Temperature,
    Humidity,
    ValveState,
}

impl From<ValueColumnArg> for ValueColumn {
    fn from(value: ValueColumnArg) -> Self {
        match value {
            ValueColumnArg::Temperature => ValueColumn::Temperature,
            ValueColumnArg::Humidity => ValueColumn::Humidity,
            ValueColumnArg::ValveState => ValueColumn::ValveState,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum HumidityDefaultArg {
    Constant,
    TemperatureMean,
}

impl From<HumidityDefaultArg> for HumidityDefault {
    fn from(value: HumidityDefaultArg) -> Self {
        match value {
            HumidityDefaultArg::Constant => HumidityDefault::Constant,
            HumidityDefaultArg::TemperatureMean => HumidityDefault::TemperatureMean,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AliasCollisionArg {
    LastWins,
    Reject,
}

impl From<AliasCollisionArg> for AliasCollisionPolicy {
    fn from(value: AliasCollisionArg) -> Self {
        match value {
            AliasCollisionArg::LastWins => AliasCollisionPolicy::LastWins,
            AliasCollisionArg::Reject => AliasCollisionPolicy::Reject,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ValveStateArg {
    PassThrough,
    Clamp,
    Reject,
}

impl From<ValveStateArg> for ValveStatePolicy {
    fn from(value: ValveStateArg) -> Self {
        match value {
            ValveStateArg::PassThrough => ValveStatePolicy::PassThrough,
            ValveStateArg::Clamp => ValveStatePolicy::Clamp,
            ValveStateArg::Reject => ValveStatePolicy::Reject,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_library_defaults() {
        let cli = parse(&["hydro-dash", "summary", "export.csv"]);
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.normalize.to_options(), NormalizeOptions::default());
    }

    #[test]
    fn strict_overrides_policies() {
        let cli = parse(&[
            "hydro-dash",
            "series",
            "export.csv",
            "--valve-state",
            "clamp",
            "--strict",
        ]);
        let Command::Series(args) = cli.command else {
            panic!("expected series");
        };
        assert_eq!(args.normalize.to_options(), NormalizeOptions::strict());
    }

    #[test]
    fn filter_accepts_negative_bounds() {
        let cli = parse(&[
            "hydro-dash",
            "filter",
            "export.csv",
            "--column",
            "valve-state",
            "--min",
            "-0.1",
            "--max",
            "0.5",
        ]);
        let Command::Filter(args) = cli.command else {
            panic!("expected filter");
        };
        assert_eq!(ValueColumn::from(args.column), ValueColumn::ValveState);
        assert_eq!(args.min, Some(-0.1));
        assert_eq!(args.max, Some(0.5));
    }

    #[test]
    fn log_flags_are_global() {
        let cli = parse(&[
            "hydro-dash",
            "aliases",
            "--log-timestamps",
            "--log-format",
            "compact",
        ]);
        assert!(cli.log_timestamps);
        assert!(matches!(cli.log_format, LogFormatArg::Compact));
        assert!(!parse(&["hydro-dash", "aliases"]).log_timestamps);
    }
}
