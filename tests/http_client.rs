mod common;

use common::{spawn_stub_service, Route};
use pretty_assertions::assert_eq;
use serde_json::json;

use pulmocheck::adapters::HttpPredictionClient;
use pulmocheck::domain::{Answer, PredictionRequest, Symptom, SymptomProfile};
use pulmocheck::ports::PredictionApi;
use pulmocheck::{ModelSelector, PulmocheckError};

fn smoker_45() -> SymptomProfile {
    let mut profile = SymptomProfile::with_defaults();
    profile.set_symptom(Symptom::Smoking, Answer::Yes);
    profile
}

#[test]
fn predict_posts_exact_feature_body_once() {
    let stub = spawn_stub_service(vec![Route::json(
        "/api/predict",
        json!({
            "prediction": "YES",
            "confidence_score": 0.77,
            "probabilities": { "cancer_risk_yes": 0.77, "cancer_risk_no": 0.23 },
            "model_used": "random_forest",
            "log_id": 12
        }),
    )]);
    let client = HttpPredictionClient::new(stub.base_url.as_str()).expect("client");

    let request =
        PredictionRequest::new(&smoker_45(), ModelSelector::RandomForest).expect("valid profile");
    let raw = client.predict(&request).expect("prediction");
    assert_eq!(raw.log_id, Some(12));

    let sent = stub.requests_to("/api/predict");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].method, "POST");
    assert!(sent[0]
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json")));

    let body: serde_json::Value = serde_json::from_str(&sent[0].body).expect("json body");
    assert_eq!(
        body,
        json!({
            "features": {
                "GENDER": 1,
                "AGE": 45,
                "SMOKING": 1,
                "YELLOW_FINGERS": 0,
                "ANXIETY": 0,
                "PEER_PRESSURE": 0,
                "CHRONIC_DISEASE": 0,
                "FATIGUE": 0,
                "ALLERGY": 0,
                "WHEEZING": 0,
                "ALCOHOL_CONSUMING": 0,
                "COUGHING": 0,
                "SHORTNESS_OF_BREATH": 0,
                "SWALLOWING_DIFFICULTY": 0
            },
            "model": "random_forest"
        })
    );
}

#[test]
fn server_error_becomes_transport_error() {
    let stub = spawn_stub_service(vec![Route::raw(
        "/api/predict",
        500,
        r#"{"error":"internal"}"#,
    )]);
    let client = HttpPredictionClient::new(stub.base_url.as_str()).expect("client");
    let request = PredictionRequest::new(&smoker_45(), ModelSelector::Svm).expect("valid");

    match client.predict(&request) {
        Err(PulmocheckError::Transport { status, message }) => {
            assert_eq!(status, Some(500));
            assert!(message.contains("internal"));
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert_eq!(stub.requests_to("/api/predict").len(), 1);
}

#[test]
fn undecodable_body_is_malformed() {
    let stub = spawn_stub_service(vec![Route::raw("/api/predict", 200, "<html>oops</html>")]);
    let client = HttpPredictionClient::new(stub.base_url.as_str()).expect("client");
    let request = PredictionRequest::new(&smoker_45(), ModelSelector::Svm).expect("valid");

    assert!(matches!(
        client.predict(&request),
        Err(PulmocheckError::MalformedResponse(_))
    ));
}

#[test]
fn unreachable_service_is_transport_without_status() {
    // Port 9 (discard) is essentially never served on loopback.
    let client = HttpPredictionClient::new("http://127.0.0.1:9").expect("client");
    let request = PredictionRequest::new(&smoker_45(), ModelSelector::Svm).expect("valid");

    assert!(matches!(
        client.predict(&request),
        Err(PulmocheckError::Transport { status: None, .. })
    ));
    assert!(!client.health());
}

#[test]
fn history_models_and_health_endpoints() {
    let stub = spawn_stub_service(vec![
        Route::json(
            "/api/predictions",
            json!({
                "predictions": [{
                    "id": 41,
                    "timestamp": "2024-05-02T09:30:00.123456",
                    "model_name": "svm",
                    "prediction_result": "NO",
                    "confidence_score": 0.64,
                    "probability_yes": 0.36,
                    "probability_no": 0.64
                }],
                "total_count": 41
            }),
        ),
        Route::json(
            "/api/models",
            json!({
                "available_models": ["random_forest", "svm"],
                "default_model": "random_forest"
            }),
        ),
        Route::json("/api/health", json!({ "status": "healthy" })),
    ]);
    let client = HttpPredictionClient::new(stub.base_url.as_str()).expect("client");

    let history = client.history(5).expect("history");
    assert_eq!(history.total_count, 41);
    assert_eq!(history.predictions.len(), 1);
    let sent = stub.requests_to("/api/predictions");
    assert_eq!(sent[0].url, "/api/predictions?limit=5");

    let catalog = client.models().expect("models");
    assert_eq!(catalog.available_models, vec!["random_forest", "svm"]);
    assert_eq!(catalog.default_model.as_deref(), Some("random_forest"));

    assert!(client.health());
}
