//! Train → evaluate → persist → reload through the predictor seam

use dealsense_core::{Dataset, FeatureVector, WinPredictor};
use dealsense_model::{evaluate, NetworkConfig, Trainer, TrainingConfig, WinNetwork};
use std::sync::Arc;

fn threshold_dataset(n: usize, offset: f64) -> Dataset {
    let features = (0..n)
        .map(|i| {
            let x = (i as f64 / n as f64) * 4.0 - 2.0 + offset;
            FeatureVector::new(vec![x, -x * 0.5, 1.0])
        })
        .collect::<Vec<_>>();
    let targets = features
        .iter()
        .map(|f| if f.as_slice()[0] > 0.0 { 1.0 } else { 0.0 })
        .collect();
    Dataset::new(features, targets)
}

#[test]
fn test_trained_model_survives_reload() {
    let train = threshold_dataset(160, 0.0);
    let validation = threshold_dataset(40, 0.01);
    let test = threshold_dataset(40, 0.02);

    let mut network = WinNetwork::new(&NetworkConfig::new(3)).unwrap();
    let history = Trainer::new(TrainingConfig::default().with_epochs(20).with_learning_rate(0.01))
        .fit(&mut network, &train, &validation)
        .unwrap();
    assert!(history.best_epoch >= 1);

    let report = evaluate(&network, &test).unwrap();
    assert!(report.accuracy > 0.8, "accuracy = {}", report.accuracy);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");
    network.save(&path).unwrap();

    let predictor: Arc<dyn WinPredictor> = Arc::new(WinNetwork::load(&path).unwrap());
    for features in &test.features {
        let p = predictor.predict(features).unwrap();
        assert_eq!(p, network.predict_slice(features.as_slice()).unwrap());
        assert!((0.0..=1.0).contains(&p));
    }
}

#[test]
fn test_missing_artifact_is_a_model_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = WinNetwork::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(dealsense_model::ModelError::Serialization(_))));
}
