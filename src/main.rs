mod cli;
mod config;

use clap::Parser;
use cli::{Args, BuildArgs, Command, DecodeArgs};
use config::ConfigFile;
use evaluated_model::adapters::outbound::console::StderrProgressReporter;
use evaluated_model::adapters::outbound::excludes::RepositoryExcludes;
use evaluated_model::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use evaluated_model::adapters::outbound::matching::{
    ProximityFindingsMatcher, DEFAULT_TOLERANCE_LINES,
};
use evaluated_model::adapters::outbound::resolutions::RegexResolutionProvider;
use evaluated_model::adapters::outbound::statistics::CountingStatisticsProvider;
use evaluated_model::application::dto::{BuildModelRequest, OutputFormat};
use evaluated_model::application::factories::CodecFactory;
use evaluated_model::application::use_cases::{BuildEvaluatedModelUseCase, DecodeModelUseCase};
use evaluated_model::model_building::domain::EvaluatedModel;
use evaluated_model::ports::outbound::{AnalysisResultReader, OutputPresenter, ProgressReporter};
use evaluated_model::shared::error::ExitCode;
use evaluated_model::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Build(build) => run_build(build),
        Command::Decode(decode) => run_decode(decode),
    }
}

fn load_config(args: &BuildArgs) -> Result<ConfigFile> {
    let config = match &args.config {
        Some(path) => {
            let config = config::load_config_from_path(path)?;
            eprintln!("⚙️  Loaded config from: {}", path.display());
            Some(config)
        }
        None => {
            let dir = args
                .input
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let config = config::discover_config(dir)?;
            if config.is_some() {
                eprintln!(
                    "⚙️  Auto-discovered config file: {}",
                    dir.join(config::CONFIG_FILENAME).display()
                );
            }
            config
        }
    };
    Ok(config.unwrap_or_default())
}

fn run_build(args: BuildArgs) -> Result<ExitCode> {
    let config = load_config(&args)?;

    // CLI flags override config values
    let format = match args.format {
        Some(format) => format,
        None => config.output_format()?.unwrap_or_default(),
    };
    let pretty = args.pretty || config.pretty.unwrap_or(false);
    let severe_issue_threshold = match args.severe_issue_threshold {
        Some(threshold) => threshold,
        None => config.severe_issue_threshold()?.unwrap_or_default(),
    };
    let severe_rule_violation_threshold = match args.severe_rule_violation_threshold {
        Some(threshold) => threshold,
        None => config.severe_rule_violation_threshold()?.unwrap_or_default(),
    };

    let progress_reporter = StderrProgressReporter::new();
    progress_reporter.report(&format!(
        "📖 Loading analysis result from: {}",
        args.input.display()
    ));
    let analysis = FileSystemReader::new().read_analysis_result(&args.input)?;

    let mut repository_configuration = analysis.repository.config.clone();
    repository_configuration.merge(config.repository_configuration());

    // Create adapters (Dependency Injection)
    let resolutions = RegexResolutionProvider::new(&repository_configuration.resolutions)?;
    let excludes = RepositoryExcludes::new(&repository_configuration.excludes, &analysis.projects)?;
    let matcher =
        ProximityFindingsMatcher::new(config.tolerance_lines().unwrap_or(DEFAULT_TOLERANCE_LINES));
    let statistics = CountingStatisticsProvider::new(
        &excludes,
        severe_issue_threshold,
        severe_rule_violation_threshold,
    );

    let use_case = BuildEvaluatedModelUseCase::new(
        &analysis,
        matcher,
        &resolutions,
        &excludes,
        statistics,
        progress_reporter,
    );
    let request = BuildModelRequest::new(
        severe_issue_threshold,
        severe_rule_violation_threshold,
        repository_configuration,
    );
    let response = use_case.execute(&analysis, &request)?;

    eprintln!("{}", CodecFactory::progress_message(format));
    let document = CodecFactory::create(format, pretty).encode(&response.model)?;

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(path) => Box::new(FileSystemWriter::new(path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&document)?;

    if args.fail_on_severe && response.has_severe_findings {
        eprintln!("⚠️  Open issues or rule violations reach the severe threshold.");
        return Ok(ExitCode::SevereFindings);
    }
    Ok(ExitCode::Success)
}

fn run_decode(args: DecodeArgs) -> Result<ExitCode> {
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_extension(&args.input));
    let codec = CodecFactory::create(format, false);

    let use_case = DecodeModelUseCase::new(FileSystemReader::new(), StderrProgressReporter::new());
    let model = use_case.execute(&args.input, codec.as_ref())?;

    StdoutPresenter::new().present(&summary(&model))?;
    Ok(ExitCode::Success)
}

fn summary(model: &EvaluatedModel) -> String {
    let mut lines = vec![
        format!("projects: {}", model.projects().count()),
        format!("packages: {}", model.packages.len()),
        format!("scan results: {}", model.scan_results.len()),
        format!("licenses: {}", model.licenses.len()),
        format!(
            "issues: {} ({} open)",
            model.issues.len(),
            model.open_issues().count()
        ),
        format!(
            "rule violations: {} ({} open)",
            model.rule_violations.len(),
            model.open_rule_violations().count()
        ),
        format!("severe findings: {}", model.has_severe_findings()),
    ];
    for (license, count) in &model.declared_license_stats {
        lines.push(format!("declared {}: {}", license, count));
    }
    lines.join("\n")
}
