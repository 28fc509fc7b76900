use crate::client::Calculator;
use crate::config::{FailurePolicy, RunOptions};
use crate::error::AcquireError;
use crate::output::{self, OutputPaths};
use coli_model::{AvgPriceRow, Comparison, IndexRow, MetroCatalog, MetroOption};
use std::path::Path;

/// A metro left out of the output under [`FailurePolicy::Skip`].
#[derive(Debug)]
pub struct MetroFailure {
    pub metro: MetroOption,
    pub error: AcquireError,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    /// Metros harvested from the options page.
    pub metros: usize,
    pub index_rows: usize,
    pub avg_rows: usize,
    /// Average price rows whose page had no price cell.
    pub missing_prices: usize,
    pub failures: Vec<MetroFailure>,
    pub outputs: OutputPaths,
}

/// Fetch the calculator form and parse its metro options.
pub async fn harvest(
    calculator: &impl Calculator,
    cache_dir: Option<&Path>,
) -> Result<MetroCatalog, AcquireError> {
    let html = calculator.fetch_options().await?;
    tracing::info!(bytes = html.len(), "Received calculator form");

    if let Some(dir) = cache_dir {
        output::cache_html(dir, "options.html", &html)?;
    }

    let catalog = coli_parse::parse_metro_options(&html);
    if catalog.is_empty() {
        tracing::warn!("Calculator form lists no metros");
    } else {
        tracing::info!(metros = catalog.len(), "Harvested metro options");
    }
    Ok(catalog)
}

/// Compare one metro against the destination and extract its tables.
///
/// Any error is wrapped in [`AcquireError::Metro`] so the caller knows
/// which metro failed.
pub async fn compare(
    calculator: &impl Calculator,
    metro: &MetroOption,
    cache_dir: Option<&Path>,
) -> Result<Comparison, AcquireError> {
    fetch_and_extract(calculator, metro, cache_dir)
        .await
        .map_err(|source| AcquireError::Metro {
            metro_id: metro.id,
            metro: metro.name.clone(),
            source: Box::new(source),
        })
}

async fn fetch_and_extract(
    calculator: &impl Calculator,
    metro: &MetroOption,
    cache_dir: Option<&Path>,
) -> Result<Comparison, AcquireError> {
    let html = calculator.compute(metro).await?;
    if let Some(dir) = cache_dir {
        output::cache_html(dir, &format!("compute_{}.html", metro.id), &html)?;
    }
    Ok(coli_parse::parse_comparison(&html, &metro.name)?)
}

/// Run the full scrape: harvest, compare every metro in catalog order,
/// then write both CSV files.
///
/// Nothing is written until every metro has been processed, so under
/// [`FailurePolicy::Abort`] a failure leaves no output behind.
pub async fn run(
    calculator: &impl Calculator,
    options: &RunOptions,
) -> Result<RunSummary, AcquireError> {
    let cache_dir = options.cache_html.as_deref();
    let catalog = harvest(calculator, cache_dir).await?;

    let mut index_rows: Vec<IndexRow> = Vec::new();
    let mut avg_rows: Vec<AvgPriceRow> = Vec::new();
    let mut missing_prices = 0;
    let mut failures = Vec::new();

    for (position, metro) in catalog.iter().enumerate() {
        tracing::info!(
            metro_id = metro.id,
            metro = %metro.name,
            progress = %format!("{}/{}", position + 1, catalog.len()),
            "Comparing metro"
        );

        match compare(calculator, metro, cache_dir).await {
            Ok(comparison) => {
                tracing::debug!(metro_id = metro.id, note = %comparison.note, "Comparison note");
                missing_prices += comparison.missing_prices();
                index_rows.extend(comparison.index_rows);
                avg_rows.extend(comparison.avg_rows);
            }
            Err(error) if options.policy == FailurePolicy::Skip => {
                tracing::error!(metro_id = metro.id, metro = %metro.name, error = %error_chain(&error), "Skipping metro");
                failures.push(MetroFailure {
                    metro: metro.clone(),
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    let outputs = output::write_outputs(&options.output_dir, &index_rows, &avg_rows)?;

    let summary = RunSummary {
        metros: catalog.len(),
        index_rows: index_rows.len(),
        avg_rows: avg_rows.len(),
        missing_prices,
        failures,
        outputs,
    };
    tracing::info!(
        metros = summary.metros,
        index_rows = summary.index_rows,
        avg_rows = summary.avg_rows,
        missing_prices = summary.missing_prices,
        failed = summary.failures.len(),
        "Done"
    );
    Ok(summary)
}

/// Render an error and its sources on one line.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}
