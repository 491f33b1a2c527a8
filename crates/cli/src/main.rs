mod input;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trurev_classify::RevenueClassifier;
use trurev_core::{ClassifiedTransaction, RevenueType};

use input::CsvProfile;

/// Classify bank transactions by revenue type and MCA lender activity.
#[derive(Debug, Parser)]
#[command(name = "trurev", version, about)]
struct Cli {
    /// Directory holding mca_lender_list.json and revenue_patterns.json.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Statement CSV to classify.
    #[arg(long)]
    input: PathBuf,

    /// TOML column-mapping profile for the input CSV. Defaults to a
    /// date,description,amount layout with a header row.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Write classified transactions as JSON to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let classifier = RevenueClassifier::from_data_dir(&cli.data_dir)
        .with_context(|| format!("loading datasets from {}", cli.data_dir.display()))?;

    let profile = match &cli.profile {
        Some(path) => CsvProfile::from_path(path)
            .with_context(|| format!("loading CSV profile {}", path.display()))?,
        None => CsvProfile::default(),
    };

    let file = fs::File::open(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;
    let transactions = input::import_transactions(file, &profile)
        .with_context(|| format!("importing {}", cli.input.display()))?;
    tracing::info!(count = transactions.len(), "imported transactions");

    let classified = classifier.classify_all(&transactions);
    log_summary(&classified);

    let json = serde_json::to_string_pretty(&classified)?;
    match &cli.output {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}

fn log_summary(classified: &[ClassifiedTransaction]) {
    let count =
        |rt: RevenueType| classified.iter().filter(|c| c.revenue_type == rt).count();
    tracing::info!(
        true_revenue = count(RevenueType::TrueRevenue),
        non_true_revenue = count(RevenueType::NonTrueRevenue),
        needs_review = count(RevenueType::NeedsReview),
        mca_matches = classified.iter().filter(|c| c.mca_match.is_some()).count(),
        flagged = classified.iter().filter(|c| !c.flags.is_empty()).count(),
        "classification summary"
    );
}
