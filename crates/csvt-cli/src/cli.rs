//! CLI argument definitions for csvt.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use csvt_map::DuplicatePolicy;

#[derive(Parser)]
#[command(
    name = "csvt",
    version,
    about = "Composable streaming CSV transforms",
    long_about = "Composable streaming CSV transforms.\n\n\
                  Subcommands read CSV on stdin and write CSV on stdout, so they\n\
                  chain in a pipe. Logs and summaries go to stderr."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Replace entity attribute tuples with references into a mapping store.
    ExtractMap(ExtractMapArgs),

    /// Zip stdin with another CSV file on their single shared field.
    Zip(ZipArgs),

    /// Split stdin vertically into two id-linked CSV streams.
    Unzip(UnzipArgs),

    /// Select, reorder and rename columns.
    Select(SelectArgs),

    /// Remove named columns.
    Rmfields(RmfieldsArgs),
}

#[derive(Parser)]
pub struct ExtractMapArgs {
    /// Entity attribute fields as comma-separated [store=]input pairs.
    #[arg(value_name = "ENTITY_FIELDS")]
    pub entity_fields: String,

    /// Reference field as a [store=]output pair; the output side is the
    /// column appended to the data stream.
    #[arg(value_name = "REF_FIELD")]
    pub ref_field: String,

    /// Mapping store file; read then appended if present, created otherwise.
    #[arg(value_name = "MAP_FILE")]
    pub map_file: PathBuf,

    /// How to treat an existing store that maps one attribute tuple to two
    /// different references.
    #[arg(long = "duplicates", value_enum, default_value = "first")]
    pub duplicates: DuplicatesArg,

    /// Post-run summary written to stderr.
    #[arg(long = "summary", value_enum, default_value = "none")]
    pub summary: SummaryArg,
}

#[derive(Parser)]
pub struct ZipArgs {
    /// File to zip stdin with.
    #[arg(value_name = "OTHER_FILE")]
    pub other_file: PathBuf,

    /// Keep the shared id field in the output.
    #[arg(long = "keep-id")]
    pub keep_id: bool,

    /// Remove OTHER_FILE afterwards (clean up when used in a pipe).
    #[arg(long = "rm")]
    pub remove_other_file: bool,
}

#[derive(Parser)]
pub struct UnzipArgs {
    /// Comma-separated field names to split out (these go to stdout).
    #[arg(value_name = "FIELDS")]
    pub fields: String,

    /// File for the remaining fields.
    #[arg(value_name = "REST_FILE")]
    pub rest_file: PathBuf,

    /// Name of the synthetic field that links the unzipped parts.
    #[arg(long = "id", value_name = "NAME", default_value = "id")]
    pub id_field: String,
}

#[derive(Parser)]
pub struct SelectArgs {
    /// Comma-separated [out=]in field specs.
    #[arg(value_name = "FIELDS")]
    pub fields: String,
}

#[derive(Parser)]
pub struct RmfieldsArgs {
    /// Comma-separated field names to remove.
    #[arg(value_name = "FIELDS")]
    pub fields: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DuplicatesArg {
    /// Keep the first reference seen for a tuple.
    First,
    /// Keep the last reference seen for a tuple.
    Last,
    /// Fail on conflicting duplicate entries.
    Reject,
}

impl From<DuplicatesArg> for DuplicatePolicy {
    fn from(arg: DuplicatesArg) -> Self {
        match arg {
            DuplicatesArg::First => Self::FirstWins,
            DuplicatesArg::Last => Self::LastWins,
            DuplicatesArg::Reject => Self::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryArg {
    /// No summary.
    None,
    /// Table on stderr.
    Table,
    /// One JSON document on stderr.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_map_args_parse() {
        let cli = Cli::try_parse_from([
            "csvt",
            "extract-map",
            "a,other=b",
            "id=ab_id",
            "map.csv",
            "--duplicates",
            "reject",
            "--summary",
            "json",
        ])
        .unwrap();
        let Command::ExtractMap(args) = cli.command else {
            panic!("expected extract-map");
        };
        assert_eq!(args.entity_fields, "a,other=b");
        assert_eq!(args.ref_field, "id=ab_id");
        assert_eq!(args.map_file, PathBuf::from("map.csv"));
        assert_eq!(args.duplicates, DuplicatesArg::Reject);
        assert_eq!(args.summary, SummaryArg::Json);
    }

    #[test]
    fn duplicates_default_to_first_wins() {
        let cli = Cli::try_parse_from(["csvt", "extract-map", "a", "id", "map.csv"]).unwrap();
        let Command::ExtractMap(args) = cli.command else {
            panic!("expected extract-map");
        };
        assert_eq!(DuplicatePolicy::from(args.duplicates), DuplicatePolicy::FirstWins);
        assert_eq!(args.summary, SummaryArg::None);
    }

    #[test]
    fn unzip_id_defaults() {
        let cli = Cli::try_parse_from(["csvt", "unzip", "a,b", "rest.csv"]).unwrap();
        let Command::Unzip(args) = cli.command else {
            panic!("expected unzip");
        };
        assert_eq!(args.id_field, "id");
    }

    #[test]
    fn zip_flags_parse() {
        let cli =
            Cli::try_parse_from(["csvt", "zip", "other.csv", "--keep-id", "--rm"]).unwrap();
        let Command::Zip(args) = cli.command else {
            panic!("expected zip");
        };
        assert!(args.keep_id);
        assert!(args.remove_other_file);
    }
}
