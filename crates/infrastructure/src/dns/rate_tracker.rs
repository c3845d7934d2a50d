use dashmap::DashMap;
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

const WINDOW: Duration = Duration::from_secs(1);

struct Window {
    qps: u32,
    sent: VecDeque<Instant>,
}

impl Window {
    fn new(qps: u32) -> Self {
        Self {
            qps,
            sent: VecDeque::with_capacity(qps as usize),
        }
    }

    fn prune(&mut self, now: Instant) {
        while let Some(front) = self.sent.front() {
            if now.duration_since(*front) >= WINDOW {
                self.sent.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Per-endpoint sliding one-second window of sent queries.
///
/// One instance is shared by every pool, so an endpoint that appears in
/// several pools is still held to a single allowance.
#[derive(Default)]
pub struct RateTracker {
    windows: DashMap<SocketAddr, Window>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `addr` with `qps` queries per second. Registering an
    /// endpoint again keeps the smaller allowance.
    pub fn register(&self, addr: SocketAddr, qps: u32) {
        let qps = qps.max(1);
        self.windows
            .entry(addr)
            .and_modify(|w| w.qps = w.qps.min(qps))
            .or_insert_with(|| Window::new(qps));
    }

    pub fn allowance(&self, addr: &SocketAddr) -> Option<u32> {
        self.windows.get(addr).map(|w| w.qps)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Waits until `addr` may take another query and records it.
    /// Unregistered endpoints are not limited.
    pub async fn acquire(&self, addr: SocketAddr) {
        loop {
            let wait = {
                let Some(mut window) = self.windows.get_mut(&addr) else {
                    return;
                };
                let now = Instant::now();
                window.prune(now);

                if (window.sent.len() as u32) < window.qps {
                    window.sent.push_back(now);
                    return;
                }
                match window.sent.front() {
                    Some(oldest) => WINDOW.saturating_sub(now.duration_since(*oldest)),
                    None => return,
                }
            };

            trace!(server = %addr, wait_ms = wait.as_millis() as u64, "Rate limit reached");
            tokio::time::sleep(wait).await;
        }
    }
}
