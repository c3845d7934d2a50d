use crate::ports::{DiscoverySession, EventDispatcher, ResolverPool};
use crate::use_cases::query::QueryEngine;
use dnsprobe_domain::RecordType;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify, OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Per-request collaborators carried by every guess.
#[derive(Clone)]
pub struct RequestContext {
    pub session: Arc<dyn DiscoverySession>,
    pub dispatcher: Arc<dyn EventDispatcher>,
}

impl RequestContext {
    pub fn new(session: Arc<dyn DiscoverySession>, dispatcher: Arc<dyn EventDispatcher>) -> Self {
        Self {
            session,
            dispatcher,
        }
    }
}

#[derive(Default)]
struct PendingJobs {
    count: AtomicUsize,
    idle: Notify,
}

struct PendingGuard(Arc<PendingJobs>);

impl PendingGuard {
    fn new(pending: &Arc<PendingJobs>) -> Self {
        pending.count.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(pending))
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

struct GuessJob {
    request: RequestContext,
    name: String,
    _pending: PendingGuard,
}

/// Speculative resolution of candidate names through the untrusted pool.
///
/// A single dispatch task pulls jobs off an unbounded queue and spawns each
/// one once a permit is free; the semaphore is sized to the untrusted pool.
pub struct GuessPipeline {
    tx: mpsc::UnboundedSender<GuessJob>,
    pending: Arc<PendingJobs>,
    capacity: usize,
}

impl GuessPipeline {
    pub fn start(
        engine: Arc<QueryEngine>,
        pool: Arc<dyn ResolverPool>,
        shutdown: CancellationToken,
    ) -> Self {
        let capacity = pool.len().max(1);
        let (tx, rx) = mpsc::unbounded_channel();
        let semaphore = Arc::new(Semaphore::new(capacity));
        let worker = Arc::new(GuessWorker { engine, pool });

        tokio::spawn(dispatch_loop(rx, semaphore, worker, shutdown));

        info!(concurrency = capacity, "Guess pipeline started");

        Self {
            tx,
            pending: Arc::new(PendingJobs::default()),
            capacity,
        }
    }

    /// Maximum number of guesses resolving at the same time.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queues `name` for guessing. Never blocks.
    pub fn submit(&self, request: RequestContext, name: &str) {
        let name = name.trim().trim_end_matches('.').to_lowercase();
        if name.is_empty() {
            return;
        }

        let job = GuessJob {
            request,
            name,
            _pending: PendingGuard::new(&self.pending),
        };

        if let Err(rejected) = self.tx.send(job) {
            debug!(name = %rejected.0.name, "Guess pipeline stopped, job dropped");
        }
    }

    /// Jobs queued or running.
    pub fn pending(&self) -> usize {
        self.pending.count.load(Ordering::Acquire)
    }

    /// Resolves once every submitted job has finished or been dropped.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.pending.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.pending() == 0 {
                return;
            }
            notified.await;
        }
    }
}

async fn dispatch_loop(
    mut rx: mpsc::UnboundedReceiver<GuessJob>,
    semaphore: Arc<Semaphore>,
    worker: Arc<GuessWorker>,
    shutdown: CancellationToken,
) {
    loop {
        let job = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => job,
                None => break,
            },
        };

        let permit = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        let worker = Arc::clone(&worker);
        tokio::spawn(async move { worker.run(job, permit).await });
    }

    rx.close();
    let dropped = std::iter::from_fn(|| rx.try_recv().ok()).count();
    info!(dropped, "Guess pipeline stopped");
}

struct GuessWorker {
    engine: Arc<QueryEngine>,
    pool: Arc<dyn ResolverPool>,
}

impl GuessWorker {
    async fn run(&self, job: GuessJob, _permit: OwnedSemaphorePermit) {
        let session = &job.request.session;

        if session.is_done() {
            return;
        }
        if session.cache().contains_fqdn(&job.name) {
            debug!(name = %job.name, session = session.id(), "Guess already known");
            return;
        }

        for record_type in RecordType::guess_order() {
            if session.is_done() {
                return;
            }

            match self.engine.query(self.pool.as_ref(), &job.name, record_type).await {
                Ok(answers) if !answers.is_empty() => {
                    debug!(
                        name = %job.name,
                        record_type = %record_type,
                        answers = answers.len(),
                        "Guess resolved"
                    );
                    schedule_persist(&job);
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(name = %job.name, record_type = %record_type, error = %e, "Guess did not resolve");
                }
            }
        }
    }
}

fn schedule_persist(job: &GuessJob) {
    let name = job.name.clone();
    let session = Arc::clone(&job.request.session);
    let dispatcher = Arc::clone(&job.request.dispatcher);

    session.queue().append(Box::pin(async move {
        let asset = match session.store().upsert_fqdn(&name).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(name = %name, session = session.id(), error = %e, "Failed to persist guessed name");
                return;
            }
        };

        if let Err(e) = dispatcher.dispatch(&name, asset, Arc::clone(&session)).await {
            warn!(name = %name, session = session.id(), error = %e, "Failed to dispatch guessed name");
        }
    }));
}
