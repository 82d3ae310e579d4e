//! Background workers for remote calls.
//!
//! The HTTP client blocks, so the prediction pipeline and the smaller
//! lookups (health, model list, history page) each run on their own thread
//! and report back over a channel. The TUI main loop stays responsive.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::PredictionService;
use crate::domain::{ModelSelector, PredictionResult, SymptomProfile};
use crate::ports::PredictionApi;

/// Progress updates from the prediction worker.
#[derive(Debug, Clone)]
pub enum PredictionProgress {
    /// Request sent, waiting for the service
    Submitting,
    /// Pipeline finished with a result
    Complete(PredictionResult),
    /// Pipeline failed; the message is shown to the user
    Failed(String),
}

/// Handle to a running prediction worker.
pub struct PredictionWorkerHandle {
    progress_rx: Receiver<PredictionProgress>,
    _handle: JoinHandle<()>,
}

impl PredictionWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<PredictionProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Block until the next update; `None` once the worker is gone.
    #[must_use]
    pub fn recv(&self) -> Option<PredictionProgress> {
        self.progress_rx.recv().ok()
    }
}

/// Runs one submission in the background.
pub struct PredictionWorker;

impl PredictionWorker {
    /// Spawn a background prediction.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<A>(
        service: Arc<PredictionService<A>>,
        profile: SymptomProfile,
        model: ModelSelector,
    ) -> PredictionWorkerHandle
    where
        A: PredictionApi + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, &profile, model, &tx);
        });

        PredictionWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run_with_progress<A>(
        service: &PredictionService<A>,
        profile: &SymptomProfile,
        model: ModelSelector,
        tx: &Sender<PredictionProgress>,
    ) where
        A: PredictionApi,
    {
        let _ = tx.send(PredictionProgress::Submitting);

        let update = match service.submit(profile, model) {
            Ok(result) => PredictionProgress::Complete(result),
            Err(e) => PredictionProgress::Failed(e.to_string()),
        };
        let _ = tx.send(update);
    }
}

/// Handle to a one-shot background lookup.
pub struct LookupHandle<T> {
    rx: Receiver<T>,
    _handle: JoinHandle<()>,
}

impl<T> LookupHandle<T> {
    /// The answer, once the lookup has finished (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Block until the answer arrives; `None` if the thread died first.
    #[must_use]
    pub fn recv(&self) -> Option<T> {
        self.rx.recv().ok()
    }
}

/// Run `lookup` on its own thread.
pub fn spawn_lookup<T, F>(lookup: F) -> LookupHandle<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        let _ = tx.send(lookup());
    });
    LookupHandle {
        rx,
        _handle: handle,
    }
}
