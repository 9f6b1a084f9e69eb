//! The search service
//!
//! A dedicated OS thread owns the search; callers hand it an owned state
//! snapshot over a channel and block for the answer with a timeout bound.
//! The chosen action references its actor structurally (cell + kind), so it
//! can be replayed against the live state the snapshot was cloned from.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, error};

use crate::error::{EngineError, EngineResult};
use crate::search::{choose_action, SearchConfig, SearchOutcome};
use crate::types::GameState;

/// Extra wait on top of the search budget before a request is declared lost.
const RESPONSE_GRACE: Duration = Duration::from_millis(500);

struct Request {
    state: GameState,
    config: SearchConfig,
}

/// Handle to the search thread.
pub struct SearchService {
    requests: Sender<Request>,
    responses: Receiver<EngineResult<SearchOutcome>>,
    worker: Option<JoinHandle<()>>,
}

impl SearchService {
    /// Spawn the worker thread.
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = bounded::<Request>(1);
        let (response_tx, response_rx) = bounded::<EngineResult<SearchOutcome>>(1);

        let worker = thread::Builder::new()
            .name("frostfall-search".into())
            .spawn(move || {
                for mut request in request_rx {
                    // The board index is derived data and does not travel.
                    request.state.reindex();
                    let outcome = choose_action(&request.state, &request.config);
                    if let Ok(outcome) = &outcome {
                        debug!(depth = outcome.depth, score = outcome.score, "search done");
                    }
                    if response_tx.send(outcome).is_err() {
                        return;
                    }
                }
            })
            .expect("failed to spawn search thread");

        Self {
            requests: request_tx,
            responses: response_rx,
            worker: Some(worker),
        }
    }

    /// Pick an action for the snapshot's side to move. Blocks for at most
    /// the search budget plus a grace period.
    pub fn choose(&self, state: GameState, config: SearchConfig) -> EngineResult<SearchOutcome> {
        let budget = config.budget;
        self.requests
            .send(Request { state, config })
            .map_err(|_| EngineError::SearchUnavailable("search thread is gone"))?;

        match self.responses.recv_timeout(budget + RESPONSE_GRACE) {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("search thread failed to answer within its budget");
                Err(EngineError::SearchUnavailable("no answer within budget"))
            }
        }
    }
}

impl Drop for SearchService {
    fn drop(&mut self) {
        // Closing the request channel lets the worker loop end.
        let (dead_tx, _) = bounded::<Request>(0);
        let _ = std::mem::replace(&mut self.requests, dead_tx);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
