use std::env;

use anyhow::Result;
use emotion_sim::{
    validate_upload, DemoConfig, GrayImage, ServiceStats, SessionStore, Simulator, IMAGE_SIDE,
};

/// Walks the demo pages end to end: trains the placeholder model, scores a
/// synthetic upload against it, then fabricates a prediction the way the
/// lightweight variants do.
fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => DemoConfig::load(path).map_err(anyhow::Error::msg)?,
        None => DemoConfig::default(),
    };

    let labels = config.label_set()?;
    let interval = config.interval()?;
    let mut rng = config.rng();

    log::info!(
        "labels: [{}], confidence interval [{}, {}]",
        labels.names().join(", "),
        interval.low(),
        interval.high()
    );

    // "Train Model" page: fit the placeholder and show its chance-level report.
    let mut store = SessionStore::new(labels.clone());
    let session = store.session("demo");
    let report = session.train(&config.training_spec(), &mut rng)?;

    println!("Model trained (placeholder, fitted on noise).");
    println!("Accuracy: {:.1}%", report.accuracy * 100.0);
    for metrics in &report.per_label {
        println!(
            "  {:<10} precision {:.3}  recall {:.3}  f1 {:.3}  support {}",
            metrics.label, metrics.precision, metrics.recall, metrics.f1, metrics.support
        );
    }

    // "Predict Emotion" page: validate the upload, preprocess, score it.
    let upload_name = "selfie.png";
    validate_upload(upload_name, 256 * 1024)?;
    let image = GrayImage::new(64, 64, vec![128; 64 * 64])?;
    let scored = session.predict(&image.to_features(IMAGE_SIDE))?;
    println!(
        "\nPlaceholder model says '{upload_name}' looks {} {} ({})",
        scored.label,
        scored.emoji().unwrap_or_default(),
        scored.confidence_percent()
    );

    // The other two variants skip the model entirely and fabricate the answer.
    let simulator = Simulator::new(labels.clone(), interval)?;
    let prediction = simulator.simulate(&mut rng);
    println!(
        "\nPredicted Emotion: {} {}",
        prediction.label,
        prediction.emoji().unwrap_or_default()
    );
    println!("Confidence: {}", prediction.confidence_percent());
    println!("Probability Distribution:");
    for row in prediction.ranked() {
        println!(
            "  {} {:<10} {}",
            row.emoji().unwrap_or("  "),
            row.label,
            row.percent()
        );
    }

    let stats = ServiceStats::sample(&labels, &mut rng);
    println!("\nService stats:\n{}", serde_json::to_string_pretty(&stats)?);

    store.end("demo");
    Ok(())
}
