use emotion_sim::{
    validate_upload, DemoConfig, GrayImage, SessionStore, SimError, IMAGE_SIDE,
};

#[test]
fn train_predict_retrain_cycle() {
    let config: DemoConfig =
        serde_json::from_str(r#"{"seed": 4, "train_samples": 100}"#).unwrap();
    let labels = config.label_set().unwrap();
    let mut rng = config.rng();

    let mut store = SessionStore::new(labels);
    let session = store.session("browser-tab-1");

    // Predicting before training must fail, as the demo page warns.
    let features = vec![0.5; IMAGE_SIDE * IMAGE_SIDE];
    assert!(matches!(
        session.predict(&features),
        Err(SimError::NotTrained)
    ));

    let accuracy = {
        let report = session.train(&config.training_spec(), &mut rng).unwrap();
        assert_eq!(report.train_samples + report.test_samples, 100);
        report.accuracy
    };
    assert!((0.0..=1.0).contains(&accuracy));

    let prediction = session.predict(&features).unwrap();
    let sum: f64 = prediction.probabilities.iter().map(|s| s.probability).sum();
    assert!((sum - 1.0).abs() < 1e-9);

    // "Retrain" clears the session back to untrained.
    session.reset();
    assert!(matches!(
        session.predict(&features),
        Err(SimError::NotTrained)
    ));

    assert!(store.end("browser-tab-1").is_some());
    assert!(store.is_empty());
}

#[test]
fn upload_then_preprocess_then_score() {
    let config: DemoConfig = serde_json::from_str(r#"{"seed": 8}"#).unwrap();
    let mut rng = config.rng();

    let mut store = SessionStore::new(config.label_set().unwrap());
    let session = store.session("demo");
    session
        .train(
            &emotion_sim::TrainingSpec {
                samples: 60,
                features: IMAGE_SIDE * IMAGE_SIDE,
                test_fraction: 0.2,
            },
            &mut rng,
        )
        .unwrap();

    validate_upload("face.jpg", 42_000).unwrap();

    // A 64x64 gradient stands in for a decoded upload.
    let pixels: Vec<u8> = (0..64 * 64).map(|i| (i % 256) as u8).collect();
    let image = GrayImage::new(64, 64, pixels).unwrap();
    let features = image.to_features(IMAGE_SIDE);
    assert_eq!(features.len(), IMAGE_SIDE * IMAGE_SIDE);
    assert!(features.iter().all(|&f| (0.0..=1.0).contains(&f)));

    let prediction = session.predict(&features).unwrap();
    assert!(prediction.probabilities.iter().any(|s| s.label == prediction.label));
}

#[test]
fn wrong_feature_length_is_a_shape_error() {
    let config: DemoConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
    let mut rng = config.rng();

    let mut store = SessionStore::new(config.label_set().unwrap());
    let session = store.session("demo");
    session.train(&config.training_spec(), &mut rng).unwrap();

    let err = session.predict(&[0.5; 10]).unwrap_err();
    assert!(matches!(err, SimError::ShapeMismatch { .. }));
}
