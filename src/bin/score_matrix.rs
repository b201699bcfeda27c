//! Score a co-occurrence matrix with Fisher's exact test
//!
//! Reads a CSV count matrix (one label column, one count column per feature) and
//! writes `scores.csv` and `odds_ratios.csv` into the output directory.
//!
//! Usage:
//!   cargo run --release --bin score_matrix -- <counts.csv> <output_dir> [config.json]
//!
//! Without a config file, options come from SAMPLE_AXIS, FEATURE_AXIS,
//! LOGTRANSFORM, INDEX_COLUMN and PARALLEL.

use anyhow::{Context, Result};
use collexeme_scorer::{LabeledMatrix, ScoringConfig};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "collexeme_scorer=info,score_matrix=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        let program = args.first().map(String::as_str).unwrap_or("score_matrix");
        anyhow::bail!("Usage: {} <counts.csv> <output_dir> [config.json]", program);
    }
    let input = PathBuf::from(&args[1]);
    let output_dir = PathBuf::from(&args[2]);

    let config = match args.get(3) {
        Some(path) => ScoringConfig::load(&PathBuf::from(path))?,
        None => ScoringConfig::from_env()?,
    };

    tracing::info!("Configuration:");
    tracing::info!("  Sample axis: {}", config.sample_axis);
    tracing::info!("  Feature axis: {}", config.feature_axis);
    tracing::info!("  Log transform: {}", config.logtransform);
    tracing::info!("  Index column: {}", config.index_column);
    tracing::info!("  Parallel: {}", config.parallel);

    let total_start = Instant::now();

    let matrix = LabeledMatrix::read_csv(&input, &config.index_column)?;
    let (rows, cols) = matrix.shape();
    tracing::info!(
        "Loaded {:?}: {} rows x {} columns (total {})",
        input,
        rows,
        cols,
        matrix.total()
    );

    let start = Instant::now();
    let result = config.score(&matrix)?;
    tracing::info!("Scored {} pairs in {:.2?}", rows * cols, start.elapsed());

    let non_finite = result.scores.values().iter().filter(|v| !v.is_finite()).count();
    if non_finite > 0 {
        tracing::warn!("{} scores are not finite (p = 0 or empty margins)", non_finite);
    }

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let scores_path = output_dir.join("scores.csv");
    let odds_path = output_dir.join("odds_ratios.csv");
    result.scores.write_csv(&scores_path, &config.index_column)?;
    result.odds_ratios.write_csv(&odds_path, &config.index_column)?;

    tracing::info!("Wrote {:?} and {:?}", scores_path, odds_path);
    tracing::info!("Done in {:.2?}", total_start.elapsed());

    Ok(())
}
