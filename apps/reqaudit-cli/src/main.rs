//! Requisition audit CLI
//!
//! Thin surface over the audit engine: `single` processes one document
//! against its tracker ground truth, `batch` sweeps a directory. Exits
//! non-zero if any requisition in the run errored.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use audit_engine::{
    AuditConfig, AuditOrchestrator, BatchItem, ReferenceTextStore, ReportFormat, Reporter,
};
use audit_types::GroundTruth;

mod adapters;

use adapters::{
    JsonDocumentWriter, JsonExtractor, JsonlTracker, StandardSections, TokenOverlapScorer,
};

/// Command-line arguments for the requisition auditor
#[derive(Parser, Debug)]
#[command(name = "reqaudit")]
#[command(about = "Audit job requisition documents against tracker ground truth")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to a TOML configuration file (defaults apply if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON file with the tracker's ground-truth entries
    #[arg(long)]
    ground_truth: PathBuf,

    /// JSON file mapping jurisdiction codes to reference disclosure text
    #[arg(long)]
    reference_text: Option<PathBuf>,

    /// Directory for corrected documents and reports
    #[arg(long, default_value = "out")]
    output_dir: PathBuf,

    /// Tracker log file (JSON lines)
    #[arg(long, default_value = "tracker.jsonl")]
    tracker_log: PathBuf,

    /// Validate only, do not apply corrections
    #[arg(long)]
    no_correct: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit a single requisition document
    Single {
        /// Path to the document (pre-extracted JSON fields)
        #[arg(long)]
        document: PathBuf,

        /// Requisition id to look up in the ground-truth file
        #[arg(long)]
        requisition_id: String,
    },
    /// Audit every requisition in the ground-truth file against a
    /// document directory (expects `<requisition_id>.json` files)
    Batch {
        /// Directory containing requisition documents
        #[arg(long)]
        directory: PathBuf,
    },
}

fn load_ground_truth(path: &PathBuf) -> Result<Vec<GroundTruth>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ground truth file: {}", path.display()))?;
    serde_json::from_str(&content).context("Failed to parse ground truth JSON")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &args.config {
        Some(path) => AuditConfig::from_file(path)?,
        None => AuditConfig::default(),
    };
    if args.no_correct {
        config.auto_correct = false;
    }

    let reference = match &args.reference_text {
        Some(path) => Arc::new(ReferenceTextStore::from_file(path)?),
        None => Arc::new(ReferenceTextStore::default()),
    };
    info!(
        jurisdictions = reference.len(),
        auto_correct = config.auto_correct,
        "reference text loaded"
    );

    let ground_truths = load_ground_truth(&args.ground_truth)?;

    let orchestrator = AuditOrchestrator::new(
        config,
        Arc::new(JsonExtractor),
        Arc::new(TokenOverlapScorer),
        Arc::new(JsonDocumentWriter::new(&args.output_dir)),
        Arc::new(JsonlTracker::new(&args.tracker_log)),
        Arc::new(StandardSections),
        reference,
    );

    match args.command {
        Command::Single {
            document,
            requisition_id,
        } => {
            let ground_truth = ground_truths
                .iter()
                .find(|gt| gt.requisition_id == requisition_id);
            let Some(ground_truth) = ground_truth else {
                bail!("requisition {} not found in ground truth", requisition_id);
            };

            let outcome = orchestrator
                .process_requisition(&document, ground_truth)
                .await?;

            let reporter = Reporter::new(ReportFormat::Text);
            reporter.report(&outcome.record)?;

            std::fs::create_dir_all(&args.output_dir)?;
            let report_path = args
                .output_dir
                .join(format!("{}_audit.txt", requisition_id));
            reporter.write_to_file(&outcome.record, &report_path)?;
            info!(report = %report_path.display(), "audit report written");
        }
        Command::Batch { directory } => {
            let items: Vec<BatchItem> = ground_truths
                .into_iter()
                .map(|ground_truth| BatchItem {
                    document: directory.join(format!("{}.json", ground_truth.requisition_id)),
                    ground_truth,
                })
                .collect();

            let summary = orchestrator.process_batch(items).await;

            let reporter = Reporter::new(ReportFormat::Text);
            print!("{}", reporter.format_batch(&summary)?);

            std::fs::create_dir_all(&args.output_dir)?;
            let summary_path = args.output_dir.join("batch_summary.json");
            std::fs::write(
                &summary_path,
                Reporter::new(ReportFormat::JsonPretty).format_batch(&summary)?,
            )?;
            info!(summary = %summary_path.display(), "batch summary written");

            if !summary.is_clean() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
