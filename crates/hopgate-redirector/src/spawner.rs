use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Work that runs after the response has been handed back.
pub type BackgroundTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Runs background work on behalf of the dispatcher.
///
/// The hosting environment decides how long the work may outlive the
/// request. Implementations must not block the caller.
pub trait Spawner: Send + Sync + 'static {
    fn spawn_background(&self, task: BackgroundTask);
}

impl<P: Spawner + ?Sized> Spawner for Arc<P> {
    fn spawn_background(&self, task: BackgroundTask) {
        (**self).spawn_background(task)
    }
}

/// Spawns onto the current tokio runtime and keeps track of the tasks so
/// they can be drained on shutdown.
#[derive(Debug, Clone, Default)]
pub struct TokioSpawner {
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl TokioSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks spawned and not yet reaped.
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Waits for every task spawned so far.
    pub async fn drain(&self) {
        let mut tasks = std::mem::take(&mut *self.tasks.lock());
        debug!(pending = tasks.len(), "draining background tasks");
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "background task failed");
            }
        }
    }
}

impl Spawner for TokioSpawner {
    fn spawn_background(&self, task: BackgroundTask) {
        let mut tasks = self.tasks.lock();
        while let Some(joined) = tasks.try_join_next() {
            if let Err(e) = joined {
                warn!(error = %e, "background task failed");
            }
        }
        tasks.spawn(task);
    }
}
