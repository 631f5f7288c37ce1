use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::core::error::NetworkResult;
use crate::core::types::ProbeOutcome;

/// Runs one probe per target with at most `max_concurrent` in flight and
/// returns after every probe has reported.
pub struct ProbeCoordinator {
    max_concurrent: usize,
}

impl ProbeCoordinator {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Outcomes come back in completion order, one per target. Each task hands
    /// its outcome back through its join handle; nothing is shared between
    /// tasks apart from the permit pool.
    pub async fn run<T, F, Fut>(
        &self,
        targets: Vec<T>,
        probe: F,
    ) -> NetworkResult<Vec<ProbeOutcome<T>>>
    where
        T: Clone + Send + 'static,
        F: Fn(T) -> Fut + Send,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let mut probe_tasks = Vec::with_capacity(targets.len());
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));

        for target in targets {
            let permit = semaphore.clone().acquire_owned().await?;
            let pending = probe(target.clone());

            let task = tokio::spawn(async move {
                let reachable = pending.await;
                drop(permit);
                ProbeOutcome::new(target, reachable)
            });

            probe_tasks.push(task);
        }

        let mut outcomes = Vec::with_capacity(probe_tasks.len());
        for joined in futures::future::join_all(probe_tasks).await {
            outcomes.push(joined?);
        }
        Ok(outcomes)
    }
}
