// ============================================================
// Layer 1: Demo Page Markup
// ============================================================
// Single HTML page rendered with maud:
//
//   main     title, message textarea, Predict button, result
//   sidebar  dataset label counts
//
// The result area shows either the prediction or an inline
// error. Nothing here touches the model.

use std::collections::BTreeMap;

use maud::{html, Markup, DOCTYPE};

use crate::application::demo_use_case::DemoError;
use crate::ml::inferencer::Prediction;

const STYLE: &str = "
body { font-family: sans-serif; margin: 0; display: flex; }
aside { width: 16rem; padding: 1rem; background: #f0f2f6; min-height: 100vh; }
main { padding: 1rem 2rem; flex: 1; max-width: 48rem; }
textarea { width: 100%; height: 8rem; }
.error { color: #8a1c1c; background: #fde8e8; padding: .75rem; border-radius: 4px; }
pre { white-space: pre-wrap; }
";

pub fn render(
    text:    &str,
    outcome: Option<&Result<Prediction, DemoError>>,
    stats:   Option<&BTreeMap<String, usize>>,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Spam classifier demo" }
                style { (STYLE) }
            }
            body {
                aside {
                    h2 { "Dataset stats" }
                    (sidebar(stats))
                }
                main {
                    h1 { "Spam classifier demo" }
                    p { "Enter a message (SMS or email) and click Predict to see the model output." }
                    form method="post" action="/predict" {
                        label for="text" { "Message text" }
                        textarea id="text" name="text" { (text) }
                        p { button type="submit" { "Predict" } }
                    }
                    @if let Some(outcome) = outcome {
                        (result(outcome))
                    }
                }
            }
        }
    }
}

fn result(outcome: &Result<Prediction, DemoError>) -> Markup {
    match outcome {
        Ok(p) => html! {
            section id="result" {
                p { "Prediction: " strong { (p.label_str().to_uppercase()) } }
                p { "Confidence (approx): " strong { (format!("{:.3}", p.probability)) } }
            }
        },
        Err(e) => html! {
            div class="error" { (e.to_string()) }
        },
    }
}

fn sidebar(stats: Option<&BTreeMap<String, usize>>) -> Markup {
    let json = stats
        .filter(|s| !s.is_empty())
        .and_then(|s| serde_json::to_string_pretty(s).ok());
    html! {
        @match json {
            Some(json) => pre { (json) },
            None       => p { "Dataset not found in expected path." },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::Label;

    #[test]
    fn test_prediction_is_shown_with_three_decimals() {
        let pred = Ok(Prediction { label: Label::Spam, probability: 0.98712 });
        let page = render("win", Some(&pred), None).into_string();
        assert!(page.contains("Prediction: <strong>SPAM</strong>"));
        assert!(page.contains("Confidence (approx): <strong>0.987</strong>"));
        assert!(page.contains("Dataset not found in expected path."));
    }

    #[test]
    fn test_text_is_escaped() {
        let page = render("<script>x</script>", None, None).into_string();
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("id=\"result\""));
    }

    #[test]
    fn test_stats_are_json() {
        let stats = BTreeMap::from([("ham".to_string(), 4825), ("spam".to_string(), 747)]);
        let page  = render("", None, Some(&stats)).into_string();
        assert!(page.contains("<pre>"));
        assert!(page.contains("ham"));
        assert!(page.contains("4825"));
        assert!(!page.contains("Dataset not found"));
    }
}
