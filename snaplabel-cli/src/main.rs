//! snaplabel — upload images, detect labels, record the results.
//!
//! Invoked by CI on pull-request (beta) and merge (production) triggers:
//! `snaplabel --context beta --images images --branch $BRANCH_NAME`.
//! Exits 0 only if every discovered image produced a persisted record.

use std::path::PathBuf;
use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use clap::{Parser, ValueEnum};
use snaplabel_core::aws::{DynamoRecordStore, RekognitionDetector, S3ObjectStore};
use snaplabel_core::{ExecutionContext, ImageRecorder, SnaplabelConfig};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "snaplabel",
    version,
    about = "Image labeling pipeline — upload to S3, detect with Rekognition, record in DynamoDB"
)]
struct Cli {
    /// Config file (TOML); SNAPLABEL_* env vars override it
    #[arg(short, long, default_value = "snaplabel.toml")]
    config: String,

    /// Execution context selecting the destination results table
    #[arg(long, value_enum)]
    context: ContextArg,

    /// Directory containing the images to analyze
    #[arg(long, default_value = "images")]
    images: PathBuf,

    /// Source-control branch recorded with each result
    #[arg(long, env = "BRANCH_NAME")]
    branch: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ContextArg {
    Beta,
    Production,
}

impl From<ContextArg> for ExecutionContext {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::Beta => ExecutionContext::Beta,
            ContextArg::Production => ExecutionContext::Production,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — CI uses real env vars)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match SnaplabelConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("snaplabel: failed to load config from {}: {}", cli.config, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("snaplabel: {}", e);
        std::process::exit(1);
    }

    // Credentials come from the default AWS provider chain; region from config
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.storage.region.clone()))
        .load()
        .await;

    let store = Arc::new(S3ObjectStore::new(&sdk_config, &config.storage.bucket));
    let detector = Arc::new(RekognitionDetector::new(
        &sdk_config,
        &config.storage.bucket,
        &config.detection,
    ));
    let records = Arc::new(DynamoRecordStore::new(&sdk_config));

    let recorder = ImageRecorder::new(
        store,
        detector,
        records,
        config.storage.key_prefix.clone(),
    );

    let context = ExecutionContext::from(cli.context);
    let summary = match recorder
        .run(&cli.images, context, &config.tables, &cli.branch)
        .await
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("snaplabel: run aborted: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "snaplabel: {} succeeded, {} failed",
        summary.succeeded.len(),
        summary.failed.len()
    );
    for failure in &summary.failed {
        eprintln!(
            "  ❌ {} failed at {}: {}",
            failure.filename, failure.step, failure.message
        );
    }

    if !summary.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
