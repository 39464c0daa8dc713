//! Scores all partitions of a workload. Run `eval-goodness --help` for more information.

#![warn(
    missing_docs,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::default_trait_access,
    clippy::cast_precision_loss
)]

use goodness::{
    DomainPolicy, Evaluator, GoodnessSummary, OperatingPointTable, Ranking, ScoredPartition,
    Workload, DEFAULT_MAX_WORKLOAD_SIZE,
};

use std::convert::TryFrom;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use eyre::WrapErr;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use structopt::StructOpt;

/// Evaluates the goodness of every split of a workload between the sequential-scan and
/// index-scan paths, and prints a JSON report to the standard output.
#[derive(Debug, StructOpt)]
struct Opt {
    /// Performance model: three lines of throughputs indexed by the number of concurrent index
    /// scans (sequential with one stream, index with no stream, index with one stream).
    #[structopt(long)]
    model: PathBuf,

    /// Workload: JSON array of objects with `blocks` and `deadline` fields.
    #[structopt(long)]
    workload: PathBuf,

    /// JSON file with evaluation settings. Flags below override it.
    #[structopt(long)]
    config: Option<PathBuf>,

    /// Largest workload size to enumerate.
    #[structopt(long)]
    max_size: Option<usize>,

    /// Enumerate workloads larger than the maximum size.
    #[structopt(long)]
    force: bool,

    /// Use the highest modeled concurrency level beyond the model's domain.
    #[structopt(long)]
    saturate: bool,

    /// Evaluate in parallel.
    #[structopt(long)]
    parallel: bool,

    /// Number of top partitions to report.
    #[structopt(long)]
    top: Option<usize>,

    /// Show a progress bar.
    #[structopt(long)]
    progress: bool,

    /// Verbosity.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Store the logs this file.
    #[structopt(long)]
    log_output: Option<PathBuf>,

    /// Do not log to the stderr.
    #[structopt(long)]
    no_stderr: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
struct EvaluationSettings {
    max_workload_size: usize,
    allow_oversize: bool,
    parallel: bool,
    domain_policy: DomainPolicy,
    top: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            max_workload_size: DEFAULT_MAX_WORKLOAD_SIZE,
            allow_oversize: false,
            parallel: false,
            domain_policy: DomainPolicy::Strict,
            top: 10,
        }
    }
}

struct EvaluationConfig {
    model: OperatingPointTable,
    workload: Workload,
    settings: EvaluationSettings,
    progress: bool,
}

#[derive(Debug, Serialize)]
struct Report {
    workload_size: usize,
    summary: GoodnessSummary,
    best: Option<ScoredPartition>,
    top: Vec<ScoredPartition>,
}

fn read_settings(path: &Path) -> eyre::Result<EvaluationSettings> {
    let file = File::open(path)
        .wrap_err_with(|| format!("unable to open config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).wrap_err("unable to parse config")
}

fn read_model(path: &Path) -> eyre::Result<OperatingPointTable> {
    let file = File::open(path)
        .wrap_err_with(|| format!("unable to open model file: {}", path.display()))?;
    OperatingPointTable::read(BufReader::new(file)).wrap_err("unable to parse model")
}

fn read_workload(path: &Path) -> eyre::Result<Workload> {
    let file = File::open(path)
        .wrap_err_with(|| format!("unable to open workload file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).wrap_err("unable to parse workload")
}

impl TryFrom<Opt> for EvaluationConfig {
    type Error = eyre::Error;
    fn try_from(opt: Opt) -> eyre::Result<Self> {
        let mut settings = match &opt.config {
            Some(path) => read_settings(path)?,
            None => EvaluationSettings::default(),
        };
        if let Some(max_size) = opt.max_size {
            settings.max_workload_size = max_size;
        }
        if let Some(top) = opt.top {
            settings.top = top;
        }
        settings.allow_oversize |= opt.force;
        settings.parallel |= opt.parallel;
        if opt.saturate {
            settings.domain_policy = DomainPolicy::Saturating;
        }
        let model = read_model(&opt.model)?.with_policy(settings.domain_policy);
        let workload = read_workload(&opt.workload)?;
        log::info!(
            "Loaded a workload of {} requests and a model of {} concurrency levels",
            workload.len(),
            model.levels()
        );
        Ok(Self {
            model,
            workload,
            settings,
            progress: opt.progress,
        })
    }
}

impl EvaluationConfig {
    fn run(&self) -> eyre::Result<Report> {
        let mut evaluator = Evaluator::new(&self.model);
        evaluator
            .max_workload_size(self.settings.max_workload_size)
            .allow_oversize(self.settings.allow_oversize)
            .parallel(self.settings.parallel);
        if self.progress {
            evaluator.progress_bar(ProgressBar::new(0));
        }
        let scored = evaluator
            .evaluate(&self.workload)
            .wrap_err("evaluation failed")?;
        let summary = GoodnessSummary::of(&scored);
        let ranking = Ranking::new(scored);
        log::info!(
            "Ranked {} partitions, {} degenerate",
            ranking.ranked().len(),
            ranking.degenerate().len()
        );
        Ok(Report {
            workload_size: self.workload.len(),
            summary,
            best: ranking.best().cloned(),
            top: ranking.top(self.settings.top).to_vec(),
        })
    }
}

/// Set up a logger based on the given user options.
fn set_up_logger(opt: &Opt) -> Result<(), fern::InitError> {
    let log_level = match opt.verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3 => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(log_level);
    let dispatch = if let Some(path) = &opt.log_output {
        dispatch.chain(fern::log_file(path)?)
    } else {
        dispatch
    };
    let dispatch = if opt.no_stderr {
        dispatch
    } else {
        dispatch.chain(std::io::stderr())
    };
    dispatch.apply()?;
    Ok(())
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let opt = Opt::from_args();
    set_up_logger(&opt)?;
    let conf = EvaluationConfig::try_from(opt)?;
    let report = conf.run()?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
