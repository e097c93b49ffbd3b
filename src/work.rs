use std::sync::{Arc, Mutex};

use log::{debug, error};
use tokio::task::JoinHandle;

/// Tracks background work that is allowed to outlive a request's response.
///
/// The context builder hands this to capability objects (e.g. analytics
/// flushes) so they can register work instead of firing and forgetting.
/// The hosting process calls [`DeferredWork::settle`] before recycling so
/// everything registered either completes or is abandoned knowingly.
#[derive(Clone, Default)]
pub struct DeferredWork {
    handles: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl DeferredWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a piece of background work. The future starts running
    /// immediately; the response does not wait for it.
    pub fn defer<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(fut);
        self.handles
            .lock()
            .expect("deferred work registry poisoned")
            .push(handle);
    }

    /// How many registered tasks have not been settled yet.
    pub fn pending(&self) -> usize {
        self.handles
            .lock()
            .expect("deferred work registry poisoned")
            .len()
    }

    /// Waits for every registered task. Panicked tasks are logged and
    /// abandoned rather than taking the process down.
    pub async fn settle(&self) {
        let drained: Vec<JoinHandle<()>> = {
            let mut handles = self
                .handles
                .lock()
                .expect("deferred work registry poisoned");
            handles.drain(..).collect()
        };

        if drained.is_empty() {
            return;
        }

        debug!("Settling {} deferred task(s)...", drained.len());
        for handle in drained {
            if let Err(e) = handle.await {
                error!("Deferred task failed to settle: {}", e);
            }
        }
    }
}

/* -------------------------------------------------------------------------- */
/*                                    Tests                                   */
/* -------------------------------------------------------------------------- */
