//! In-process `PredictionApi` double for service tests.

use std::sync::Mutex;
use std::time::Duration;

use crate::domain::{PredictionRequest, RawHistory, RawPrediction};
use crate::ports::{ModelCatalog, PredictionApi};
use crate::PulmocheckError;

type Scripted<T> = Box<dyn Fn() -> Result<T, PulmocheckError> + Send + Sync>;

pub struct FakeApi {
    predict: Scripted<RawPrediction>,
    history: Scripted<RawHistory>,
    delay: Option<Duration>,
    pub requests: Mutex<Vec<PredictionRequest>>,
}

impl FakeApi {
    pub fn answering(raw: serde_json::Value) -> Self {
        Self {
            predict: Box::new(move || {
                serde_json::from_value(raw.clone())
                    .map_err(|e| PulmocheckError::MalformedResponse(e.to_string()))
            }),
            history: Box::new(|| Ok(RawHistory::default())),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self {
            predict: Box::new(move || {
                Err(PulmocheckError::Transport {
                    status: Some(status),
                    message: body.clone(),
                })
            }),
            history: Box::new(|| Ok(RawHistory::default())),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_history(mut self, history: serde_json::Value) -> Self {
        self.history = Box::new(move || {
            serde_json::from_value(history.clone())
                .map_err(|e| PulmocheckError::MalformedResponse(e.to_string()))
        });
        self
    }

    /// Hold every prediction for `delay` before answering.
    pub fn slowed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl PredictionApi for FakeApi {
    fn predict(&self, request: &PredictionRequest) -> Result<RawPrediction, PulmocheckError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        (self.predict)()
    }

    fn history(&self, _limit: usize) -> Result<RawHistory, PulmocheckError> {
        (self.history)()
    }

    fn models(&self) -> Result<ModelCatalog, PulmocheckError> {
        Ok(ModelCatalog {
            available_models: vec!["random_forest".to_string(), "svm".to_string()],
            default_model: Some("random_forest".to_string()),
        })
    }

    fn health(&self) -> bool {
        true
    }
}
