mod settings;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use anchorbox_core::clustering::anchor_sort::{sort_with_members, Anchor};
use anchorbox_core::clustering::infrastructure::aggregator_factory::{
    create_aggregator, AggregatorKind,
};
use anchorbox_core::clustering::infrastructure::log_cluster_observer::LogClusterObserver;
use anchorbox_core::clustering::iou::average_iou;
use anchorbox_core::clustering::iou_kmeans::IouKMeans;
use anchorbox_core::dataset::domain::dataset_loader::DatasetLoader;
use anchorbox_core::dataset::infrastructure::voc_xml_loader::VocXmlLoader;
use anchorbox_core::report::anchor_report::AnchorReport;
use anchorbox_core::report::anchor_table::{anchor_line, anchor_table};
use anchorbox_core::report::shape_histogram::ShapeHistograms;

use settings::Settings;

const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Anchor-box generation from PASCAL-VOC annotations with IoU k-means.
#[derive(Parser)]
#[command(name = "anchorbox")]
struct Cli {
    /// Directory of PASCAL-VOC XML annotations, or a single annotation file.
    annotations: PathBuf,

    /// Number of anchor boxes to compute.
    #[arg(long, short = 'k')]
    clusters: Option<usize>,

    /// Random seed for reproducible clustering.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many iterations (default: run until converged).
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Center update: median or mean.
    #[arg(long)]
    aggregator: Option<AggregatorKind>,

    /// Cluster raw pixel sizes instead of sizes relative to the image.
    #[arg(long)]
    no_normalize: bool,

    /// Print width, height and aspect-ratio histograms of the dataset.
    #[arg(long)]
    histograms: bool,

    /// Histogram bin count.
    #[arg(long)]
    bins: Option<usize>,

    /// Write a JSON report of the anchors to this file.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Settings file (default: the user config directory's AnchorBox/settings.json).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    validate(&cli, &settings)?;

    log::info!("Loading annotations from {}", cli.annotations.display());
    let dataset = VocXmlLoader::new(settings.normalize).load(&cli.annotations)?;

    let mut engine = IouKMeans::new(settings.clusters)
        .with_aggregator(create_aggregator(settings.aggregator));
    if let Some(max) = settings.max_iterations {
        engine = engine.with_max_iterations(max);
    }
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    log::info!(
        "Clustering {} boxes into {} anchors",
        dataset.len(),
        settings.clusters
    );
    let mut observer = LogClusterObserver::new();
    let clustering = engine.fit(dataset.boxes(), &mut rng, &mut observer)?;
    let avg_iou = average_iou(dataset.boxes(), &clustering.clusters)?;

    let rows = sort_with_members(&clustering.clusters, &clustering.cluster_sizes());
    let anchors: Vec<Anchor> = rows.iter().map(|&(a, _)| a).collect();
    println!("{}", anchor_table(&rows, avg_iou));
    println!();
    println!("anchors = {}", anchor_line(&anchors));

    if cli.histograms {
        let histograms = ShapeHistograms::compute(&dataset, settings.histogram_bins);
        println!();
        println!("{}", histograms.render(HISTOGRAM_BAR_WIDTH));
    }

    if let Some(path) = &cli.json {
        AnchorReport::new(&clustering, avg_iou).write_json(path)?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}

fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load(),
    };

    if let Some(k) = cli.clusters {
        settings.clusters = k;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if cli.max_iterations.is_some() {
        settings.max_iterations = cli.max_iterations;
    }
    if let Some(aggregator) = cli.aggregator {
        settings.aggregator = aggregator;
    }
    if cli.no_normalize {
        settings.normalize = false;
    }
    if let Some(bins) = cli.bins {
        settings.histogram_bins = bins;
    }
    Ok(settings)
}

fn validate(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.annotations.exists() {
        return Err(format!("Annotations not found: {}", cli.annotations.display()).into());
    }
    if settings.clusters == 0 {
        return Err("Cluster count must be at least 1".into());
    }
    if settings.max_iterations == Some(0) {
        return Err("Max iterations must be at least 1".into());
    }
    if settings.histogram_bins == 0 {
        return Err("Histogram bins must be at least 1".into());
    }
    Ok(())
}
