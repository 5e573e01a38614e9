use clap::{Args as ClapArgs, Parser, Subcommand};
use evaluated_model::application::dto::OutputFormat;
use evaluated_model::model_building::domain::Severity;
use std::path::PathBuf;

/// Assemble analysis results into an evaluated model document
#[derive(Parser, Debug)]
#[command(name = "evaluated-model")]
#[command(version)]
#[command(about = "Assemble analyzer, scanner and evaluator results into an evaluated model", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging (RUST_LOG takes precedence when not set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the evaluated model from an analysis result
    Build(BuildArgs),
    /// Load a model document back and print a summary
    Decode(DecodeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct BuildArgs {
    /// Path to the analysis result (JSON, or YAML with a .yml/.yaml extension)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: json or yaml
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Config file (defaults to evaluated-model.config.yml next to the input)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit with code 1 when open issues or rule violations reach the severe thresholds
    #[arg(long)]
    pub fail_on_severe: bool,

    /// Minimum severity of an open issue to count as severe: hint, warning or error
    #[arg(long, value_name = "SEVERITY")]
    pub severe_issue_threshold: Option<Severity>,

    /// Minimum severity of an open rule violation to count as severe
    #[arg(long, value_name = "SEVERITY")]
    pub severe_rule_violation_threshold: Option<Severity>,
}

#[derive(ClapArgs, Debug)]
pub struct DecodeArgs {
    /// Path to a model document
    #[arg(short, long)]
    pub input: PathBuf,

    /// Document format (defaults to the file extension)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}
