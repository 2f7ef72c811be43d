//! Loads whichever artifact the demo would pick and scores one
//! message. Passes without doing anything when no artifact has
//! been trained yet.

use std::path::PathBuf;

use sms_spam_lab::application::demo_use_case::{find_model_path, load_model, DemoConfig};
use sms_spam_lab::ml::inferencer::Inferencer;

fn candidates() -> Vec<PathBuf> {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    DemoConfig::default_candidates()
        .into_iter()
        .map(|p| root.join(p))
        .collect()
}

#[test]
fn smoke_predict() {
    let Some(path) = find_model_path(&candidates()) else {
        println!("No model found for smoke test; skipping");
        return;
    };

    let (model, vectorizer) = load_model(&path).unwrap();
    let inferencer = Inferencer::new(model, vectorizer);
    let prediction = inferencer.predict_text("Free entry: claim your prize now").unwrap();

    assert!(["spam", "ham"].contains(&prediction.label_str()));
    assert!(prediction.probability.is_finite());
}
