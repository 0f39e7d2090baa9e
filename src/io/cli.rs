//! Command-line interface for batch generation from sample PNG files

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::algorithm::executor::{CellChange, Generator, GeneratorConfig};
use crate::analysis::adjacency::AdjacencyModel;
use crate::io::configuration::{
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_RETRIES, DEFAULT_SEED, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, WeaveError, invalid_parameter};
use crate::io::image::{SampleImage, export_grid_as_png};
use crate::io::progress::ProgressManager;
use crate::spatial::nav::BoundaryMode;

#[derive(Parser)]
#[command(name = "tileweave")]
#[command(
    author,
    version,
    about = "Generate tile grids by example using wave function collapse"
)]
/// Command-line arguments for the generation tool
pub struct Cli {
    /// Input PNG file or directory to process (one pixel = one tile)
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_OUTPUT_WIDTH)]
    pub width: usize,

    /// Output grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_OUTPUT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Generation attempts before giving up on contradiction
    #[arg(short, long, default_value_t = DEFAULT_RETRIES)]
    pub retries: usize,

    /// Treat the output grid as toroidal during propagation
    #[arg(long)]
    pub wrap: bool,

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

    /// Boundary policy selected on the command line
    pub const fn boundary(&self) -> BoundaryMode {
        if self.wrap {
            BoundaryMode::Wrap
        } else {
            BoundaryMode::Clamp
        }
    }
}

/// Orchestrates batch generation over PNG files with progress tracking
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
    /// Returns an error if target validation, generation or export fails.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if self.cli.target.extension().and_then(|s| s.to_str()) == Some("png") {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a PNG image",
                ))
            }
        } else if self.cli.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.cli.target)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("png")
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a PNG file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        let output_path = Self::get_output_path(input_path);

        let sample = SampleImage::from_png_path(input_path)?;
        let model = AdjacencyModel::from_sample(sample.grid());

        let config = GeneratorConfig::new(self.cli.width, self.cli.height)
            .with_boundary(self.cli.boundary());
        let cells = (self.cli.width * self.cli.height) as u64;

        let file_bar = self
            .progress_manager
            .as_mut()
            .map(|pm| pm.start_file(input_path, cells));

        // Whole-run retry is the only recovery from contradiction: the
        // core never backtracks, so each attempt restarts from scratch
        // with a shifted seed.
        let attempts = self.cli.retries.max(1);
        for attempt in 0..attempts {
            if let Some(ref pm) = self.progress_manager {
                pm.restart_attempt();
            }

            let mut generator =
                Generator::new(model.clone(), config, self.cli.seed.wrapping_add(attempt as u64))?;

            if let Some(bar) = &file_bar {
                let bar = bar.clone();
                generator.set_observer(Box::new(move |change| {
                    if matches!(change, CellChange::Collapsed { .. }) {
                        bar.inc(1);
                    }
                }));
            }

            match generator.generate() {
                Ok(grid) => {
                    export_grid_as_png(&grid, sample.palette(), &output_path)?;
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.complete_file();
                    }
                    return Ok(());
                }
                Err(WeaveError::EmptyCandidateSet { .. }) => {
                    // Allow print for user feedback on retry
                    #[allow(clippy::print_stderr)]
                    if !self.cli.quiet {
                        eprintln!(
                            "Contradiction in {} (attempt {}/{attempts}), retrying",
                            input_path.display(),
                            attempt + 1
                        );
                    }
                }
                Err(other) => return Err(other),
            }
        }

        Err(WeaveError::RetriesExhausted { attempts })
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let extension = input_path.extension().unwrap_or_default();
        let output_name = format!(
            "{}{}.{}",
            stem.to_string_lossy(),
            OUTPUT_SUFFIX,
            extension.to_string_lossy()
        );

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}
