//! Command-line interface for rasterizing PNG targets into move logs

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::algorithm::executor::{OptimizerConfig, Rasterizer, Strategy};
use crate::analysis::similarity::ColorStrategy;
use crate::io::configuration::{
    DEFAULT_GREEDY_DEPTH, DEFAULT_MAX_PASSES, LOG_ENV_VAR, MIN_CUT_STEP, MOVES_SUFFIX,
    OUTPUT_SUFFIX, RECOLOR_SLACK, UNIFORMITY_GRID, UNIFORMITY_THRESHOLD,
};
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::image::{export_partition_png, load_target};
use crate::io::progress::ProgressManager;
use crate::io::transcript::write_moves;
use crate::moves::request::Session;

/// Per-block search selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Center quad-split with downsampled colors
    Greedy,
    /// Best single divisor-step cut with selective recoloring
    BruteForce,
    /// Both, keeping the cheaper result per block
    Combined,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Greedy => Self::Greedy,
            StrategyArg::BruteForce => Self::BruteForce,
            StrategyArg::Combined => Self::Combined,
        }
    }
}

/// Region color selection selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// Per-channel mean
    Average,
    /// Most frequent color
    Frequent,
}

impl From<ColorArg> for ColorStrategy {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Average => Self::Average,
            ColorArg::Frequent => Self::MostFrequent,
        }
    }
}

#[derive(Parser)]
#[command(name = "blockraster")]
#[command(
    author,
    version,
    about = "Approximate PNG images with cost-weighted block cuts and recolors"
)]
/// Command-line arguments for the rasterizer
pub struct Cli {
    /// Input PNG file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Per-block search strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Combined)]
    pub strategy: StrategyArg,

    /// Maximum optimizer passes
    #[arg(short, long, default_value_t = DEFAULT_MAX_PASSES)]
    pub passes: usize,

    /// Quad-split recursion depth per pass
    #[arg(short, long, default_value_t = DEFAULT_GREEDY_DEPTH)]
    pub depth: usize,

    /// Smallest divisor used as a cut step
    #[arg(long, default_value_t = MIN_CUT_STEP)]
    pub min_step: u32,

    /// Sampled color spread below which a region is left alone
    #[arg(short, long, default_value_t = UNIFORMITY_THRESHOLD)]
    pub threshold: f64,

    /// Extra error tolerated when deciding to recolor a sub-block
    #[arg(long, default_value_t = RECOLOR_SLACK)]
    pub recolor_slack: u64,

    /// Color chosen for candidate sub-blocks
    #[arg(long, value_enum, default_value_t = ColorArg::Frequent)]
    pub color: ColorArg,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub threads: usize,

    /// Directory for outputs (defaults to next to each input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Optimizer configuration described by the flags
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric flag is out of range
    pub fn optimizer_config(&self) -> Result<OptimizerConfig> {
        if self.passes == 0 {
            return Err(invalid_parameter(
                "passes",
                &self.passes,
                &"at least one pass is required",
            ));
        }
        if self.min_step == 0 {
            return Err(invalid_parameter(
                "min-step",
                &self.min_step,
                &"cut step must be positive",
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(invalid_parameter(
                "threshold",
                &self.threshold,
                &"must be a non-negative number",
            ));
        }

        Ok(OptimizerConfig {
            strategy: self.strategy.into(),
            max_passes: self.passes,
            greedy_depth: self.depth.max(1),
            uniformity_threshold: self.threshold,
            uniformity_grid: UNIFORMITY_GRID,
            min_cut_step: self.min_step,
            recolor_slack: self.recolor_slack,
            color_strategy: self.color.into(),
        })
    }
}

/// Install the stderr log subscriber for the binary
///
/// The filter comes from the `BLOCKRASTER_LOG` environment variable, falling
/// back to `info` (or `warn` when quiet).
pub fn init_logging(quiet: bool) {
    let level = if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Orchestrates batch processing of PNG files with progress tracking
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

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.optimizer_config()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file, config)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if is_png(target) {
                if self.should_process_file(target) {
                    Ok(vec![target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target, "read directory")? {
                let path = entry.with_path(target, "read directory entry")?.path();
                if is_png(&path) && !is_output(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(input_path, OUTPUT_SUFFIX, "png");
        if output_path.exists() {
            info!(file = %input_path.display(), "skipping, output exists");
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, config: OptimizerConfig) -> Result<()> {
        let start_time = Instant::now();
        let target = load_target(input_path)?;
        let mut session = Session::new(target.size())?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(input_path);
        }

        let rasterizer = Rasterizer::new(config);
        let rasterizer = match self.progress_manager {
            Some(ref pm) => rasterizer.with_observer(pm),
            None => rasterizer,
        };

        let baseline = session.score(&target);
        let result = rasterizer.optimize(session.partition(), &target)?;
        session.absorb(result);
        let score = session.score(&target);

        if score > baseline {
            warn!(baseline, score, "optimized score is worse than the blank canvas");
        }

        write_moves(
            session.log(),
            self.output_path(input_path, MOVES_SUFFIX, "txt"),
        )?;
        export_partition_png(
            session.partition(),
            self.output_path(input_path, OUTPUT_SUFFIX, "png"),
        )?;

        info!(
            file = %input_path.display(),
            blocks = session.partition().len(),
            moves = session.log().len(),
            cost = session.cost(),
            baseline,
            score,
            elapsed_ms = start_time.elapsed().as_millis(),
            "rasterized"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(start_time.elapsed(), session.log().len(), session.cost());
        }

        Ok(())
    }

    /// Output path for an input: `<stem><suffix>.<extension>` next to the input
    /// or inside `--output`
    pub fn output_path(&self, input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

        match (&self.cli.output, input_path.parent()) {
            (Some(dir), _) => dir.join(name),
            (None, Some(parent)) => parent.join(name),
            (None, None) => PathBuf::from(name),
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

fn is_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
