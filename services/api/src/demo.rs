use crate::infra::KeywordClassifier;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use talentscan::config::AppConfig;
use talentscan::error::AppError;
use talentscan::screening::candidates::{
    csv_string, CandidateRecord, CandidateView, FilterCriteria, FunnelStatus, JsonFileStorage,
    MemoryStorage, ResultsStore, ScreeningService, SortCriteria, SortDirection, SortField,
    SubmissionError, SCORE_MULTIPLIER,
};
use talentscan::screening::classifier::RemoteClassifier;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Write the full CSV export to this path instead of printing a preview.
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
    /// Also show the view filtered to candidates at or above this percent score.
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// Skip the removal portion of the demo, leaving every sample on file.
    #[arg(long)]
    pub(crate) skip_cleanup: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Resume text to classify (takes precedence over --file).
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Read the resume text from this file.
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Override the configured classifier base URL.
    #[arg(long)]
    pub(crate) classifier_url: Option<String>,
}

/// One-shot submission against the configured classifier, persisting the
/// result alongside the serve command's history.
pub(crate) async fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let ScreenArgs {
        text,
        file,
        classifier_url,
    } = args;

    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(AppError::Screening(SubmissionError::EmptyInput)),
    };

    let config = AppConfig::load()?;
    let base_url = classifier_url.unwrap_or_else(|| config.classifier.base_url.clone());

    let classifier = RemoteClassifier::new()
        .with_url(base_url)
        .with_timeout(config.classifier.timeout);
    let store = Arc::new(ResultsStore::new(JsonFileStorage::new(
        &config.storage.results_path,
    )));
    let history = store.initialize();
    println!(
        "Loaded {} stored results from {}",
        history.len(),
        config.storage.results_path.display()
    );

    let service = ScreeningService::new(store, Arc::new(classifier));
    let handoff = service.submit(&text).await?;

    println!("\nClassification");
    render_funnel_table(&funnel_views(&handoff.fresh));
    println!("\n{} results now on file", handoff.results.len());

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        export_csv,
        min_score,
        skip_cleanup,
    } = args;

    println!("TalentScan screening demo (offline keyword classifier)");

    let store = Arc::new(ResultsStore::new(MemoryStorage::default()));
    let service = ScreeningService::new(store, Arc::new(KeywordClassifier));

    let resumes = sample_resumes();
    println!("Submitting {} sample resumes", resumes.len());
    let handoff = service.submit_batch(resumes).await?;

    println!("\nScreening results (score = confidence x {SCORE_MULTIPLIER}, uncapped)");
    let all_views = funnel_views(&handoff.results);
    render_funnel_table(&all_views);

    let qualified = all_views.iter().filter(|view| view.status == "qualified").count();
    let reviewing = all_views.iter().filter(|view| view.status == "reviewing").count();
    let rejected = all_views.iter().filter(|view| view.status == "rejected").count();
    println!("\nFunnel: {qualified} qualified | {reviewing} reviewing | {rejected} rejected");

    println!("\nQualified-only view");
    let criteria = FilterCriteria {
        status: Some(FunnelStatus::Qualified),
        ..FilterCriteria::default()
    };
    render_funnel_table(&funnel_views(&service.results_view(
        &criteria,
        &SortCriteria::default(),
    )));

    if let Some(min_score) = min_score {
        println!("\nCandidates at or above {min_score}%");
        let criteria = FilterCriteria {
            min_score_percent: min_score,
            ..FilterCriteria::default()
        };
        render_funnel_table(&funnel_views(&service.results_view(
            &criteria,
            &SortCriteria::default(),
        )));
    }

    println!("\nAlphabetical roster");
    let roster = SortCriteria {
        field: SortField::Name,
        direction: SortDirection::Ascending,
    };
    render_funnel_table(&funnel_views(
        &service.results_view(&FilterCriteria::default(), &roster),
    ));

    if let Some(first) = handoff.fresh.first() {
        match serde_json::to_string_pretty(&first.view()) {
            Ok(json) => println!("\nDashboard payload for the first candidate:\n{json}"),
            Err(err) => println!("\nDashboard payload unavailable: {err}"),
        }
    }

    if !skip_cleanup {
        let rejected_id = handoff
            .results
            .iter()
            .find(|record| record.status() == FunnelStatus::Rejected)
            .map(|record| record.id.clone());
        if let Some(id) = rejected_id {
            match service.discard(&id) {
                Ok(remaining) => println!(
                    "\nDiscarded rejected candidate {id}; {} remain on file",
                    remaining.len()
                ),
                Err(err) => println!("\nRemoval failed: {err}"),
            }
        }
    }

    let records = service.results_view(&FilterCriteria::default(), &SortCriteria::default());
    match csv_string(&records, service.policy()) {
        Ok(csv) => match export_csv {
            Some(path) => {
                std::fs::write(&path, csv)?;
                println!("\nWrote CSV export to {}", path.display());
            }
            None => {
                println!("\nCSV export preview");
                for line in csv.lines().take(4) {
                    println!("  {line}");
                }
            }
        },
        Err(err) => println!("\nCSV export unavailable: {err}"),
    }

    Ok(())
}

fn sample_resumes() -> Vec<String> {
    [
        "Ada Lovelace\nada.lovelace@example.com 515-555-0100\nBackend software engineer with a \
         decade of Rust and Python.\nDesigned distributed APIs, automated testing, cloud \
         deployments.",
        "Grace Hopper\ngrace@example.com\nBuilt data pipelines and a churn model for retention \
         teams.",
        "Joan Clarke\nCoordinated a cross-team project launch last spring.",
        "Sam Doe\nRecent graduate, eager to learn new things.",
        "Elena Alvarez\nCRM pipeline management, exceeded sales quota two years running, ran \
         negotiation workshops.",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn funnel_views(records: &[CandidateRecord]) -> Vec<CandidateView> {
    records.iter().map(CandidateRecord::view).collect()
}

fn render_funnel_table(views: &[CandidateView]) {
    if views.is_empty() {
        println!("  (no candidates matched)");
        return;
    }

    for view in views {
        println!(
            "- {} | {} | confidence {:.2} | score {}% | {}",
            view.name.as_deref().unwrap_or("(no name detected)"),
            view.predicted_label,
            view.confidence,
            view.score_percent,
            view.status
        );
    }
}
