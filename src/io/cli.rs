//! Command-line interface for batch evaluation of puzzle files

use crate::algorithm::evaluator::{EvaluatorConfig, RegionEvaluator, RegionReport};
use crate::algorithm::search::{SearchConfig, SearchOutcome};
use crate::io::configuration::PUZZLE_EXTENSION;
use crate::io::error::{Result, WithContext, invalid_parameter};
use crate::io::parse::Puzzle;
use crate::io::progress::{ProgressLogger, ProgressManager};
use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "polypack")]
#[command(
    author,
    version,
    about = "Count the regions that can be exactly packed with their required shapes"
)]
/// Command-line arguments for the packing tool
pub struct Cli {
    /// Puzzle file, or directory of puzzle files, to evaluate
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Maximum search nodes per region before giving up (unbounded when omitted)
    #[arg(short, long, value_name = "NODES")]
    pub budget: Option<u64>,

    /// Evaluate the regions of each file in parallel
    #[arg(short = 'j', long)]
    pub parallel: bool,

    /// Suppress progress and log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log a line per evaluated region
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Log level implied by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Off
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    /// Evaluation settings implied by the arguments
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a zero node budget
    pub fn evaluator_config(&self) -> Result<EvaluatorConfig> {
        let search = match self.budget {
            Some(0) => {
                return Err(invalid_parameter(
                    "budget",
                    &0,
                    &"must allow at least one search node",
                ));
            }
            Some(nodes) => SearchConfig::with_budget(nodes),
            None => SearchConfig::unbounded(),
        };

        Ok(EvaluatorConfig {
            search,
            parallel: self.parallel,
        })
    }
}

/// Result of evaluating one puzzle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    /// Evaluated file
    pub path: PathBuf,
    /// Number of regions in the file
    pub regions: usize,
    /// Regions proven packable
    pub feasible: usize,
    /// Regions whose search ran out of budget
    pub unknown: usize,
}

/// Orchestrates batch evaluation of puzzle files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Evaluate files according to CLI arguments and print their counts
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, file reading, parsing or
    /// shape resolution fails
    pub fn process(&mut self) -> Result<Vec<FileSummary>> {
        let config = self.cli.evaluator_config()?;
        self.install_logger();

        let files = self.collect_files()?;
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut summaries = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            summaries.push(self.process_file(file, index, config)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        let label_files = files.len() > 1 || self.cli.target.is_dir();
        for summary in &summaries {
            Self::print_summary(summary, label_files);
        }

        Ok(summaries)
    }

    fn install_logger(&self) {
        let level = self.cli.log_level();
        match self.progress_manager {
            Some(ref pm) => ProgressLogger::new(pm.multi_progress(), level).install(),
            None => log::set_max_level(level),
        }
    }

    /// Files selected by the target argument
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a file nor a readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            Ok(vec![target.clone()])
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory")?.path();
                if path.is_file()
                    && path.extension().and_then(|s| s.to_str()) == Some(PUZZLE_EXTENSION)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a puzzle file or a directory",
            ))
        }
    }

    fn process_file(
        &mut self,
        input_path: &Path,
        index: usize,
        config: EvaluatorConfig,
    ) -> Result<FileSummary> {
        let start_time = Instant::now();
        let puzzle = Puzzle::from_path(input_path)?;
        let catalog = puzzle.catalog();
        let evaluator = RegionEvaluator::new(&catalog, config);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, puzzle.regions.len());
        }

        let reports: Vec<RegionReport> = {
            let progress = Mutex::new(self.progress_manager.as_mut());
            evaluator
                .evaluate_all_with(&puzzle.regions, |regions_done| {
                    let Ok(mut guard) = progress.lock() else {
                        return;
                    };
                    if let Some(pm) = guard.as_deref_mut() {
                        pm.update_regions(index, regions_done);
                    }
                })
                .into_iter()
                .collect::<Result<_>>()?
        };

        let summary = FileSummary {
            path: input_path.to_path_buf(),
            regions: reports.len(),
            feasible: count_outcome(&reports, SearchOutcome::Feasible),
            unknown: count_outcome(&reports, SearchOutcome::Unknown),
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, summary.feasible);
        }
        log::debug!(
            "{}: {} of {} regions feasible in {:?}",
            input_path.display(),
            summary.feasible,
            summary.regions,
            start_time.elapsed()
        );
        if summary.unknown > 0 {
            log::warn!(
                "{}: {} regions undecided within the search budget, counted as not feasible",
                input_path.display(),
                summary.unknown
            );
        }

        Ok(summary)
    }

    // The feasible count is the tool's answer and goes to stdout
    #[allow(clippy::print_stdout)]
    fn print_summary(summary: &FileSummary, label_file: bool) {
        if label_file {
            println!("{}: {}", summary.path.display(), summary.feasible);
        } else {
            println!("{}", summary.feasible);
        }
    }
}

fn count_outcome(reports: &[RegionReport], outcome: SearchOutcome) -> usize {
    reports
        .iter()
        .filter(|report| report.outcome == outcome)
        .count()
}
