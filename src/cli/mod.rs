// ============================================================
// Layer 1: CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and routes each subcommand to its
// use case in Layer 2. `serve` is the only async command; it
// gets its own current-thread tokio runtime.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{BundleArgs, Commands, FetchArgs, PredictArgs, ServeArgs};

use crate::application::{
    bundle_use_case::BundleUseCase,
    demo_use_case::{DemoApp, DemoConfig},
    fetch_use_case::FetchUseCase,
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::infra::downloader::HttpDownloader;

#[derive(Parser, Debug)]
#[command(
    name = "spam-lab",
    version,
    about = "Train TF-IDF spam classifiers on the SMS spam dataset and serve a demo page."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Fetch(args)         => run_fetch(args),
            Commands::TrainBaseline(args) => run_train(args.into()),
            Commands::TrainPhase2(args)   => run_train(args.into()),
            Commands::Bundle(args)        => run_bundle(args),
            Commands::Serve(args)         => run_serve(args),
            Commands::Predict(args)       => run_predict(args),
        }
    }
}

fn run_fetch(args: FetchArgs) -> Result<()> {
    let use_case = FetchUseCase::new(args.into(), HttpDownloader::new()?);
    use_case.execute()?;
    Ok(())
}

fn run_train(config: TrainConfig) -> Result<()> {
    tracing::info!(
        "Training {} on '{}'",
        config.classifier.display_name(),
        config.data_path.display()
    );
    TrainUseCase::new(config).execute()?;
    Ok(())
}

fn run_bundle(args: BundleArgs) -> Result<()> {
    BundleUseCase::new(args.into()).execute()
}

fn run_serve(args: ServeArgs) -> Result<()> {
    let config: DemoConfig = args.models.into();
    let app = Arc::new(DemoApp::from_config(&config));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Cannot start async runtime")?;
    runtime.block_on(crate::web::serve(app, args.addr))
}

fn run_predict(args: PredictArgs) -> Result<()> {
    let config: DemoConfig = args.models.into();
    let app = DemoApp::from_config(&config);

    let prediction = app.predict(&args.text)?;
    println!("Prediction: {}", prediction.label_str().to_uppercase());
    println!("Confidence (approx): {:.3}", prediction.probability);
    Ok(())
}
