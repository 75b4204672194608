use anyhow::Result;
use boundary_split::{pipeline, OutputLayout, PipelineConfig, SentenceSplitter};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(name = "boundary-split")]
#[command(about = "Split text into one sentence per line using rule-based boundary detection")]
#[command(version)]
struct Args {
    /// Documents to split; reads stdin when none are given
    inputs: Vec<PathBuf>,

    /// Honorific list, one entry per line including its trailing period
    #[arg(long)]
    honorifics: PathBuf,

    /// Directory for sentence files (default: next to each input)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print sentences to stdout instead of writing sentence files
    #[arg(long)]
    stdout: bool,

    /// Output layout
    #[arg(long, value_enum, default_value_t = OutputLayout::Lines)]
    layout: OutputLayout,

    /// Maximum documents processed concurrently (default: number of CPUs)
    #[arg(long)]
    jobs: Option<usize>,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Log debug detail
    #[arg(long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Log warnings and errors only
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.quiet {
            Level::WARN
        } else {
            Level::INFO
        }
    }

    fn pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        PipelineConfig {
            jobs: self.jobs.unwrap_or(defaults.jobs).max(1),
            fail_fast: self.fail_fast,
            output_dir: self.output_dir.clone(),
            layout: self.layout,
            to_stdout: self.stdout,
            show_progress: !self.no_progress && !self.stdout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // WHY: stdout may carry sentences, so structured logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    // Without fail_fast an unreadable input is recorded as a failed document instead
    if args.fail_fast {
        if let Some(input) = args.inputs.iter().find(|input| !input.is_file()) {
            anyhow::bail!("Input is not a readable file: {}", input.display());
        }
    }

    let splitter = Arc::new(SentenceSplitter::from_honorifics_file(&args.honorifics)?);
    info!("Loaded {} honorifics", splitter.honorifics().len());

    let config = args.pipeline_config();
    let run = if args.inputs.is_empty() {
        pipeline::process_stdin(splitter, &config).await?
    } else {
        pipeline::process_files(splitter, &args.inputs, &config).await?
    };

    if let Some(stats_path) = &args.stats_out {
        run.write_json(stats_path).await?;
        info!("Wrote run stats to {}", stats_path.display());
    }

    if run.files_failed > 0 {
        eprintln!(
            "boundary-split: {} of {} documents failed",
            run.files_failed,
            run.files_failed + run.files_processed
        );
        std::process::exit(1);
    }

    Ok(())
}
