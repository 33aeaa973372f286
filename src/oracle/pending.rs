use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use super::contract::MoveOracle;
use crate::error::OracleError;

/// Shared flag telling an oracle worker its answer is no longer wanted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One outstanding oracle request, running on its own worker thread.
///
/// The answer comes back over a channel owned by this handle, so dropping
/// the handle (on reset, or when automation is switched off) both cancels
/// the worker and guarantees its late answer can never be delivered.
pub struct PendingSuggestion {
    ply: usize,
    cancel: CancelToken,
    rx: Receiver<Result<String, OracleError>>,
}

impl PendingSuggestion {
    /// Start asking `oracle` for the move at `ply` (the history length when
    /// the request was made).
    pub fn spawn(oracle: Arc<dyn MoveOracle>, history: String, depth: u32, ply: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = CancelToken::new();

        let worker_tx = tx.clone();
        let worker_cancel = cancel.clone();
        let spawned = thread::Builder::new()
            .name("move-oracle".into())
            .spawn(move || {
                let result = oracle.suggest(&history, depth);
                if !worker_cancel.is_cancelled() {
                    let _ = worker_tx.send(result);
                }
            });

        if let Err(e) = spawned {
            let _ = tx.send(Err(OracleError::Unavailable(format!(
                "failed to start oracle worker: {e}"
            ))));
        }

        PendingSuggestion { ply, cancel, rx }
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Non-blocking check for the answer. `None` while the worker is still
    /// waiting on the oracle.
    pub fn try_take(&self) -> Option<Result<String, OracleError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(OracleError::Unavailable(
                "oracle worker stopped without answering".into(),
            ))),
        }
    }
}

impl Drop for PendingSuggestion {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct Fixed(&'static str);

    impl MoveOracle for Fixed {
        fn suggest(&self, _history: &str, _depth: u32) -> Result<String, OracleError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct Panicking;

    impl MoveOracle for Panicking {
        fn suggest(&self, _history: &str, _depth: u32) -> Result<String, OracleError> {
            panic!("solver crashed");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn wait_for(pending: &PendingSuggestion) -> Result<String, OracleError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(result) = pending.try_take() {
                return result;
            }
            assert!(Instant::now() < deadline, "oracle never answered");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_answer_arrives_through_handle() {
        let pending = PendingSuggestion::spawn(Arc::new(Fixed("3\n")), "33".into(), 10, 2);
        assert_eq!(pending.ply(), 2);
        assert_eq!(wait_for(&pending), Ok("3\n".to_string()));
    }

    #[test]
    fn test_worker_panic_reports_unavailable() {
        let pending = PendingSuggestion::spawn(Arc::new(Panicking), String::new(), 10, 0);
        assert!(matches!(wait_for(&pending), Err(OracleError::Unavailable(_))));
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }
}
