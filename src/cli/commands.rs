// ============================================================
// Layer 1: CLI Commands and Arguments
// ============================================================
// One subcommand per pipeline stage:
//
//   fetch           download the dataset CSV
//   train-baseline  LinearSVC (or nearest centroid) + metrics
//   train-phase2    logistic regression + ranking metrics
//   bundle          copy the phase-2 artifact for the web demo
//   serve           run the demo page
//   predict         score one message from the command line
//
// Each Args struct converts into its application-layer config,
// so the use cases never see clap types.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::application::{
    bundle_use_case::BundleConfig,
    demo_use_case::DemoConfig,
    fetch_use_case::{FetchConfig, DEFAULT_DATASET_PATH, DEFAULT_DATASET_URL},
    train_use_case::TrainConfig,
};
use crate::ml::model::ClassifierKind;
use crate::ml::vectorizer::DEFAULT_MAX_FEATURES;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the SMS spam dataset
    Fetch(FetchArgs),

    /// Train the baseline classifier and write its metrics
    TrainBaseline(TrainBaselineArgs),

    /// Train logistic regression, write metrics, compare with the baseline
    TrainPhase2(TrainPhase2Args),

    /// Copy a trained artifact into the web models directory
    Bundle(BundleArgs),

    /// Serve the interactive demo page
    Serve(ServeArgs),

    /// Classify a single message
    Predict(PredictArgs),
}

// ─── fetch ────────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Where to download the CSV from
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub url: String,

    /// Where to write it
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub output: PathBuf,
}

impl From<FetchArgs> for FetchConfig {
    fn from(a: FetchArgs) -> Self {
        FetchConfig { url: a.url, output: a.output }
    }
}

// ─── train-* ──────────────────────────────────────────────────────────────────
/// Options shared by both trainers.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Headerless label,text CSV
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub data: PathBuf,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_size: f64,

    /// Seed for the stratified split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Vocabulary cap for the TF-IDF vectorizer
    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    pub max_features: usize,
}

impl DataArgs {
    fn apply(self, cfg: TrainConfig) -> TrainConfig {
        TrainConfig {
            data_path:    self.data,
            test_size:    self.test_size,
            seed:         self.seed,
            max_features: self.max_features,
            ..cfg
        }
    }
}

/// Classifiers the baseline trainer can fit.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierArg {
    LinearSvc,
    NearestCentroid,
}

impl From<ClassifierArg> for ClassifierKind {
    fn from(a: ClassifierArg) -> Self {
        match a {
            ClassifierArg::LinearSvc       => ClassifierKind::LinearSvc,
            ClassifierArg::NearestCentroid => ClassifierKind::NearestCentroid,
        }
    }
}

#[derive(Args, Debug)]
pub struct TrainBaselineArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long, default_value = "phase1/models/baseline_svm.json")]
    pub output_model: PathBuf,

    #[arg(long, default_value = "phase1/reports/phase1_metrics.json")]
    pub metrics: PathBuf,

    #[arg(long, value_enum, default_value_t = ClassifierArg::LinearSvc)]
    pub classifier: ClassifierArg,
}

impl From<TrainBaselineArgs> for TrainConfig {
    fn from(a: TrainBaselineArgs) -> Self {
        let cfg = TrainConfig {
            output_model: a.output_model,
            metrics_path: a.metrics,
            classifier:   a.classifier.into(),
            ..TrainConfig::baseline()
        };
        a.data.apply(cfg)
    }
}

#[derive(Args, Debug)]
pub struct TrainPhase2Args {
    #[command(flatten)]
    pub data: DataArgs,

    #[arg(long, default_value = "phase1/models/phase2_logreg.json")]
    pub output_model: PathBuf,

    #[arg(long, default_value = "phase1/reports/phase2_metrics.json")]
    pub metrics: PathBuf,

    /// Baseline report to compare against, skipped if absent
    #[arg(long, default_value = "phase1/reports/phase1_metrics.json")]
    pub baseline_metrics: PathBuf,
}

impl From<TrainPhase2Args> for TrainConfig {
    fn from(a: TrainPhase2Args) -> Self {
        let cfg = TrainConfig {
            output_model:     a.output_model,
            metrics_path:     a.metrics,
            baseline_metrics: Some(a.baseline_metrics),
            ..TrainConfig::phase2()
        };
        a.data.apply(cfg)
    }
}

// ─── bundle ───────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct BundleArgs {
    #[arg(long, default_value = "phase1/models/phase2_logreg.json")]
    pub source: PathBuf,

    #[arg(long, default_value = "web/models/phase2_logreg.json")]
    pub destination: PathBuf,
}

impl From<BundleArgs> for BundleConfig {
    fn from(a: BundleArgs) -> Self {
        BundleConfig { source: a.source, destination: a.destination }
    }
}

// ─── serve / predict ──────────────────────────────────────────────────────────
/// Where the demo looks for its model and dataset.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Candidate artifact, repeatable; replaces the default search list
    #[arg(long = "model")]
    pub models: Vec<PathBuf>,

    /// Dataset used for the sidebar stats
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,
}

impl From<ModelArgs> for DemoConfig {
    fn from(a: ModelArgs) -> Self {
        let candidates = if a.models.is_empty() {
            DemoConfig::default_candidates()
        } else {
            a.models
        };
        DemoConfig { candidates, dataset_path: a.dataset }
    }
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:8501")]
    pub addr: SocketAddr,

    #[command(flatten)]
    pub models: ModelArgs,
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Message to classify
    #[arg(long)]
    pub text: String,

    #[command(flatten)]
    pub models: ModelArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(std::iter::once("spam-lab").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_baseline_defaults() {
        let Commands::TrainBaseline(a) = parse(&["train-baseline"]) else { panic!("wrong command") };
        let cfg: TrainConfig = a.into();
        assert_eq!(cfg.classifier, ClassifierKind::LinearSvc);
        assert_eq!(cfg.output_model, PathBuf::from("phase1/models/baseline_svm.json"));
        assert_eq!(cfg.max_features, 10_000);
    }

    #[test]
    fn test_phase2_flags() {
        let Commands::TrainPhase2(a) = parse(&["train-phase2", "--seed", "7", "--test-size", "0.3"]) else {
            panic!("wrong command")
        };
        let cfg: TrainConfig = a.into();
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.test_size, 0.3);
        assert_eq!(cfg.classifier, ClassifierKind::LogisticRegression);
        assert_eq!(cfg.baseline_metrics, Some(PathBuf::from("phase1/reports/phase1_metrics.json")));
    }

    #[test]
    fn test_nearest_centroid_flag() {
        let Commands::TrainBaseline(a) = parse(&["train-baseline", "--classifier", "nearest-centroid"]) else {
            panic!("wrong command")
        };
        assert_eq!(TrainConfig::from(a).classifier, ClassifierKind::NearestCentroid);
    }

    #[test]
    fn test_repeated_model_flag_replaces_candidates() {
        let Commands::Predict(a) = parse(&["predict", "--text", "hi", "--model", "a.json", "--model", "b.json"]) else {
            panic!("wrong command")
        };
        let cfg: DemoConfig = a.models.into();
        assert_eq!(cfg.candidates, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);

        let Commands::Serve(s) = parse(&["serve"]) else { panic!("wrong command") };
        assert_eq!(DemoConfig::from(s.models).candidates, DemoConfig::default_candidates());
    }
}
