//! Intake-to-result flow against a stub prediction service.

mod common;

use std::sync::Arc;

use common::{spawn_stub_service, Route};
use pretty_assertions::assert_eq;
use serde_json::json;

use pulmocheck::adapters::HttpPredictionClient;
use pulmocheck::application::{HistoryFilter, HistoryService, PredictionService};
use pulmocheck::domain::{Answer, Symptom, SymptomProfile};
use pulmocheck::{ModelSelector, PulmocheckError, RiskLevel};

fn service_for(stub_url: &str) -> PredictionService<HttpPredictionClient> {
    let client = HttpPredictionClient::new(stub_url).expect("client");
    PredictionService::new(Arc::new(client))
}

#[test]
fn smoker_profile_yields_high_risk_result() {
    let stub = spawn_stub_service(vec![Route::json(
        "/api/predict",
        json!({
            "prediction": "YES",
            "confidence_score": 0.8123,
            "probabilities": { "cancer_risk_yes": 0.8123, "cancer_risk_no": 0.1877 },
            "model_used": "neural_network",
            "log_id": 99
        }),
    )]);
    let service = service_for(&stub.base_url);

    let mut profile = SymptomProfile::with_defaults();
    profile.set_symptom(Symptom::Smoking, Answer::Yes);
    profile.set_symptom(Symptom::Coughing, Answer::Yes);

    let result = service
        .submit(&profile, ModelSelector::NeuralNetwork)
        .expect("prediction");

    assert_eq!(stub.requests().len(), 1);
    assert_eq!(result.model, "neural_network");
    assert_eq!(result.risk_level(), RiskLevel::High);
    assert_eq!(result.risk_percent(), 81);
    assert_eq!(result.confidence_percent(), 81);
    assert_eq!(result.log_id, Some(99));
    assert_eq!(
        result.details,
        "Prediction: YES. The model indicates potential cancer risk based on provided symptoms. \
         Analysis completed using neural_network model."
    );
    assert_eq!(service.current_result(), Some(result));
}

#[test]
fn incomplete_profile_sends_nothing() {
    let stub = spawn_stub_service(vec![Route::json("/api/predict", json!({}))]);
    let service = service_for(&stub.base_url);

    let mut profile = SymptomProfile::with_defaults();
    profile.clear_symptom(Symptom::Wheezing);
    profile.gender = None;

    match service.submit(&profile, ModelSelector::Svm) {
        Err(PulmocheckError::Validation(errors)) => {
            assert_eq!(errors.len(), 2);
            assert!(errors.iter().any(|e| e.contains("Wheezing")));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(stub.requests().is_empty());
}

#[test]
fn failures_leave_no_result() {
    let ok = spawn_stub_service(vec![Route::json(
        "/api/predict",
        json!({
            "prediction": "NO",
            "confidence_score": 0.9,
            "probabilities": { "cancer_risk_yes": 0.1, "cancer_risk_no": 0.9 },
            "model_used": "svm",
            "log_id": 1
        }),
    )]);
    let service = service_for(&ok.base_url);
    let profile = SymptomProfile::with_defaults();

    let first = service.submit(&profile, ModelSelector::Svm).expect("prediction");
    assert_eq!(first.risk_level(), RiskLevel::Low);

    let broken = spawn_stub_service(vec![Route::raw("/api/predict", 503, "maintenance")]);
    let failing = service_for(&broken.base_url);
    assert!(failing.submit(&profile, ModelSelector::Svm).is_err());
    assert!(failing.current_result().is_none());

    let malformed = spawn_stub_service(vec![Route::json(
        "/api/predict",
        json!({ "prediction": "NO", "model_used": "svm" }),
    )]);
    let undecided = service_for(&malformed.base_url);
    assert!(matches!(
        undecided.submit(&profile, ModelSelector::Svm),
        Err(PulmocheckError::MalformedResponse(_))
    ));
    assert!(undecided.current_result().is_none());
}

#[test]
fn history_loads_and_filters() {
    let stub = spawn_stub_service(vec![Route::json(
        "/api/predictions",
        json!({
            "predictions": [
                {
                    "id": 3, "timestamp": "2024-05-03T10:00:00", "model_name": "svm",
                    "prediction_result": "YES", "confidence_score": 0.9,
                    "probability_yes": 0.9, "probability_no": 0.1
                },
                {
                    "id": 2, "timestamp": "2024-05-02T10:00:00", "model_name": "random_forest",
                    "prediction_result": "NO", "confidence_score": 0.8,
                    "probability_yes": 0.2, "probability_no": 0.8
                }
            ],
            "total_count": 2
        }),
    )]);
    let client = Arc::new(HttpPredictionClient::new(stub.base_url.as_str()).expect("client"));
    let history = HistoryService::new(client, 10);

    let page = history.load().expect("history");
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].id, "3");

    let filter = HistoryFilter {
        risk: Some(RiskLevel::Low),
        ..HistoryFilter::default()
    };
    let low = filter.apply(&page.records);
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].result.model, "random_forest");

    assert_eq!(stub.requests()[0].url, "/api/predictions?limit=10");
}
