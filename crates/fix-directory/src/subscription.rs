//! Push-updated views over the incident set.
//!
//! A [`Subscription`] owns a task that recomputes its value once on open and
//! again after every change on the repository feed. The task stops when the
//! subscription is closed or dropped.

use std::future::Future;

use fix_core::repository::IncidentChange;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::error::DirectoryError;

/// One recomputation: the value, or the user message of the failure.
pub type Snapshot<T> = Result<T, String>;

pub struct Subscription<T> {
    latest: watch::Receiver<Option<Snapshot<T>>>,
    task: JoinHandle<()>,
}

impl<T> Subscription<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start recomputing `compute` on every change from `feed`.
    ///
    /// `feed` must be subscribed before the call so no change between the
    /// first computation and the first `recv` is missed.
    pub(crate) fn spawn<F, Fut>(mut feed: broadcast::Receiver<IncidentChange>, compute: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, DirectoryError>> + Send,
    {
        let (tx, latest) = watch::channel(None);
        let task = tokio::spawn(async move {
            loop {
                let snapshot = compute().await.map_err(|error| {
                    tracing::warn!(%error, "aggregate recompute failed");
                    error.user_message()
                });
                if tx.send(Some(snapshot)).is_err() {
                    break;
                }

                match feed.recv().await {
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "change feed lagged, recomputing");
                    }
                    Err(RecvError::Closed) => break,
                }
                // One recompute covers every change already queued.
                loop {
                    match feed.try_recv() {
                        Ok(_) | Err(TryRecvError::Lagged(_)) => {}
                        Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                    }
                }
            }
        });
        Self { latest, task }
    }

    /// Wait for the next snapshot. The first call yields the initial value.
    ///
    /// Returns `None` once the subscription can produce nothing more.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        self.latest.changed().await.ok()?;
        self.latest.borrow_and_update().clone()
    }

    /// Most recent snapshot without waiting.
    #[must_use]
    pub fn current(&self) -> Option<Snapshot<T>> {
        self.latest.borrow().clone()
    }

    /// Stop pushing updates.
    pub fn close(self) {
        drop(self);
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use fix_core::errors::CoreError;

    use super::*;

    fn counting(calls: &Arc<AtomicU32>) -> impl Fn() -> std::future::Ready<Result<u32, DirectoryError>> + Send + 'static {
        let calls = Arc::clone(calls);
        move || std::future::ready(Ok(calls.fetch_add(1, Ordering::SeqCst) + 1))
    }

    #[tokio::test]
    async fn initial_value_then_one_per_change() {
        let (feed, rx) = broadcast::channel(8);
        let calls = Arc::new(AtomicU32::new(0));
        let mut sub = Subscription::spawn(rx, counting(&calls));

        assert_eq!(sub.next().await, Some(Ok(1)));
        feed.send(IncidentChange::External).unwrap();
        assert_eq!(sub.next().await, Some(Ok(2)));
    }

    #[tokio::test]
    async fn lagged_feed_still_recomputes() {
        let (feed, rx) = broadcast::channel(1);
        let calls = Arc::new(AtomicU32::new(0));
        let mut sub = Subscription::spawn(rx, counting(&calls));
        assert_eq!(sub.next().await, Some(Ok(1)));

        for _ in 0..5 {
            feed.send(IncidentChange::External).unwrap();
        }
        let next = tokio::time::timeout(Duration::from_secs(1), sub.next())
            .await
            .unwrap();
        assert!(matches!(next, Some(Ok(n)) if n >= 2));
    }

    #[tokio::test]
    async fn failed_recompute_pushes_message_and_stays_open() {
        let (feed, rx) = broadcast::channel(8);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut sub = Subscription::spawn(rx, move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            std::future::ready(if n == 0 {
                Err(DirectoryError::from(CoreError::Backend("offline".into())))
            } else {
                Ok(n)
            })
        });

        let first = sub.next().await.unwrap();
        assert!(first.unwrap_err().contains("offline"));
        feed.send(IncidentChange::External).unwrap();
        assert_eq!(sub.next().await, Some(Ok(1)));
    }

    #[tokio::test]
    async fn close_stops_the_task() {
        let (feed, rx) = broadcast::channel(8);
        let calls = Arc::new(AtomicU32::new(0));
        let mut sub = Subscription::spawn(rx, counting(&calls));
        sub.next().await;
        sub.close();

        tokio::time::sleep(Duration::from_millis(20)).await;
        // Aborted task dropped its receiver.
        assert_eq!(feed.receiver_count(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
