use dnsprobe_application::ports::PersistenceQueue;
use futures::future::BoxFuture;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Runs appended tasks one at a time, in submission order, on a single worker.
pub struct SerialWorkQueue {
    tx: mpsc::UnboundedSender<BoxFuture<'static, ()>>,
}

impl SerialWorkQueue {
    pub fn start(shutdown: CancellationToken) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<BoxFuture<'static, ()>>();

        tokio::spawn(async move {
            let mut completed: u64 = 0;
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown.cancelled() => {
                        info!(completed, "Work queue shutting down");
                        break;
                    }
                    task = rx.recv() => match task {
                        Some(task) => {
                            task.await;
                            completed += 1;
                        }
                        None => break,
                    },
                }
            }
        });

        Self { tx }
    }

    /// Resolves once every task appended before this call has run.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        self.append(Box::pin(async move {
            let _ = done_tx.send(());
        }));
        let _ = done_rx.await;
    }
}

impl PersistenceQueue for SerialWorkQueue {
    fn append(&self, task: BoxFuture<'static, ()>) {
        if self.tx.send(task).is_err() {
            debug!("Work queue stopped, task dropped");
        }
    }
}
