//! # Fan-out
//!
//! Scatter-gather over a bounded number of in-flight tasks.
//!
//! Each task is tagged with its source index so the gather step can
//! re-assemble results in source order regardless of completion order.
//! A `Semaphore` caps how many tasks hold a permit (and therefore a
//! network call) at once.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::catalog::{CatalogError, CatalogResult};

/// Bounded fan-out executor
#[derive(Debug, Clone, Copy)]
pub struct FanOut {
    limit: usize,
}

impl FanOut {
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn scatter<T, R, F, Fut>(&self, items: Vec<T>, task: F) -> JoinSet<(usize, CatalogResult<R>)>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = CatalogResult<R>> + Send + 'static,
        R: Send + 'static,
    {
        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut join_set = JoinSet::new();

        for (index, item) in items.into_iter().enumerate() {
            let semaphore = Arc::clone(&semaphore);
            let pending = task(item);
            join_set.spawn(async move {
                // Hold the permit until the task completes
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => return (index, Err(CatalogError::transport("fan-out", e))),
                };
                (index, pending.await)
            });
        }

        join_set
    }

    /// Every task must succeed
    ///
    /// The first failure to complete aborts the outstanding tasks and is
    /// returned; no partial result is produced.
    pub async fn all_or_nothing<T, R, F, Fut>(&self, items: Vec<T>, task: F) -> CatalogResult<Vec<R>>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = CatalogResult<R>> + Send + 'static,
        R: Send + 'static,
    {
        let total = items.len();
        let mut join_set = self.scatter(items, task);
        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(value))) => slots[index] = Some(value),
                Ok((index, Err(e))) => {
                    join_set.abort_all();
                    tracing::debug!(index, error = %e, "Fan-out aborted");
                    return Err(e);
                }
                Err(e) => {
                    join_set.abort_all();
                    return Err(task_failed(e));
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }

    /// Failed tasks are dropped; survivors keep source order
    pub async fn tolerant<T, R, F, Fut>(&self, items: Vec<T>, task: F) -> Vec<R>
    where
        F: Fn(T) -> Fut,
        Fut: Future<Output = CatalogResult<R>> + Send + 'static,
        R: Send + 'static,
    {
        let total = items.len();
        let mut join_set = self.scatter(items, task);
        let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, Ok(value))) => slots[index] = Some(value),
                Ok((index, Err(e))) => {
                    tracing::warn!(index, error = %e, "Dropping failed item");
                }
                Err(e) => tracing::warn!("Fan-out task failed: {}", e),
            }
        }

        slots.into_iter().flatten().collect()
    }
}

fn task_failed(e: JoinError) -> CatalogError {
    CatalogError::transport("fan-out", format!("task failed: {}", e))
}
