//! End-to-end runs of the training and demo workflows on small
//! generated datasets.

use std::fs;
use std::path::Path;

use sms_spam_lab::application::demo_use_case::{DemoApp, DemoConfig};
use sms_spam_lab::application::train_use_case::{TrainConfig, TrainUseCase};
use sms_spam_lab::data::loader::CsvLoader;
use sms_spam_lab::domain::traits::DatasetSource;
use sms_spam_lab::infra::metrics::MetricsReport;

const HAM: [&str; 5] = [
    "are we still on for lunch tomorrow",
    "running late, see you at the office",
    "can you pick up milk on the way home",
    "meeting moved to three, room b",
    "thanks for dinner last night",
];

const SPAM: [&str; 4] = [
    "WINNER! claim your free prize now, call 09061701461",
    "free entry to win cash, text WIN to 80086",
    "urgent: your mobile won a 2000 award, claim today",
    "congratulations you have been selected for a free holiday",
];

fn write_dataset(path: &Path, ham: usize, spam: usize) {
    let mut csv = String::new();
    for i in 0..ham {
        csv.push_str(&format!("ham,\"{} {i}\"\n", HAM[i % HAM.len()]));
    }
    for i in 0..spam {
        csv.push_str(&format!("spam,\"{} {i}\"\n", SPAM[i % SPAM.len()]));
    }
    fs::write(path, csv).unwrap();
}

fn phase2_config(dir: &Path) -> TrainConfig {
    TrainConfig {
        data_path:        dir.join("data/sms.csv"),
        output_model:     dir.join("phase1/models/phase2_logreg.json"),
        metrics_path:     dir.join("phase1/reports/phase2_metrics.json"),
        baseline_metrics: Some(dir.join("phase1/reports/phase1_metrics.json")),
        ..TrainConfig::phase2()
    }
}

fn setup(ham: usize, spam: usize) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    write_dataset(&dir.path().join("data/sms.csv"), ham, spam);
    dir
}

#[test]
fn hundred_ham_twenty_spam_split_sizes() {
    let dir = setup(100, 20);
    let cfg = phase2_config(dir.path());
    TrainUseCase::new(cfg.clone()).execute().unwrap();

    let report = MetricsReport::load(&cfg.metrics_path).unwrap();
    assert_eq!(report.n_train, 96);
    assert_eq!(report.n_test, 24);

    let cm = report.confusion_matrix;
    assert_eq!(cm[0][0] + cm[0][1] + cm[1][0] + cm[1][1], 24);
    // stratified: 20 ham and 4 spam in the test split
    assert_eq!(cm[0][0] + cm[0][1], 20);
    assert_eq!(cm[1][0] + cm[1][1], 4);
    assert!(report.roc_auc.is_some());
    assert!(report.pr_auc.is_some());
    assert!(cfg.output_model.exists());
}

#[test]
fn training_is_deterministic() {
    let dir = setup(60, 15);
    let cfg = phase2_config(dir.path());

    let first  = TrainUseCase::new(cfg.clone()).train_and_eval().unwrap();
    let second = TrainUseCase::new(cfg).train_and_eval().unwrap();
    assert_eq!(first.report, second.report);
    assert_eq!(first.artifact, second.artifact);
}

#[test]
fn incomplete_rows_are_excluded() {
    let dir  = tempfile::tempdir().unwrap();
    let path = dir.path().join("sms.csv");
    fs::write(&path, "ham,hello there\nspam,\n,orphan text\nham\nspam,win now\n").unwrap();

    let dataset = CsvLoader::new(&path).load_all().unwrap();
    assert_eq!(dataset.messages.len(), 2);
    assert_eq!(dataset.dropped, 3);
}

#[test]
fn baseline_then_phase2_then_demo() {
    let dir  = setup(80, 20);
    let root = dir.path();

    let baseline = TrainConfig {
        data_path:    root.join("data/sms.csv"),
        output_model: root.join("phase1/models/baseline_svm.json"),
        metrics_path: root.join("phase1/reports/phase1_metrics.json"),
        ..TrainConfig::baseline()
    };
    TrainUseCase::new(baseline).execute().unwrap();
    TrainUseCase::new(phase2_config(root)).execute().unwrap();

    let baseline_json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("phase1/reports/phase1_metrics.json")).unwrap())
            .unwrap();
    assert!(baseline_json.get("roc_auc").is_none());

    let config = DemoConfig {
        candidates: vec![
            root.join("web/models/phase2_logreg.json"),
            root.join("phase1/models/phase2_logreg.json"),
            root.join("phase1/models/baseline_svm.json"),
        ],
        dataset_path: root.join("data/sms.csv"),
    };
    let app = DemoApp::from_config(&config);
    assert_eq!(app.model_path(), Some(root.join("phase1/models/phase2_logreg.json").as_path()));

    let prediction = app.predict("claim your free prize now").unwrap();
    assert_eq!(prediction.label_str(), "spam");
    assert!(prediction.probability > 0.5 && prediction.probability <= 1.0);

    let stats = app.dataset_stats().unwrap();
    assert_eq!(stats.get("ham"), Some(&80));
    assert_eq!(stats.get("spam"), Some(&20));
}
