#![allow(dead_code)]

use async_trait::async_trait;
use dnsprobe_application::ports::{
    AssetStore, DiscoveryCache, DiscoverySession, EventDispatcher, PersistenceQueue,
    ResolverPool,
};
use dnsprobe_domain::{
    DnsQuestion, DomainError, ExtractedAnswer, FqdnAsset, QueryResponse, RecordType,
    ResponseCode,
};
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

pub fn answer(name: &str, record_type: RecordType, data: &str) -> ExtractedAnswer {
    ExtractedAnswer::new(name, record_type, data)
}

pub fn noerror(name: &str, answers: Vec<ExtractedAnswer>) -> QueryResponse {
    QueryResponse::new(name, ResponseCode::NoError, answers)
}

pub fn timeout() -> DomainError {
    DomainError::TransportTimeout {
        server: "192.0.2.1:53".parse().unwrap(),
    }
}

// ============================================================================
// Mock ResolverPool
// ============================================================================

/// Scripted results are consumed first; afterwards the pool answers from the
/// per-question table, falling back to NXDOMAIN.
pub struct MockResolverPool {
    name: String,
    size: usize,
    delay: Duration,
    script: Mutex<VecDeque<Result<QueryResponse, DomainError>>>,
    answers: RwLock<HashMap<(String, RecordType), Vec<ExtractedAnswer>>>,
    wildcard_domains: RwLock<HashSet<String>>,
    exchanges: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    questions: Mutex<Vec<DnsQuestion>>,
}

impl MockResolverPool {
    pub fn new(name: &str, size: usize) -> Self {
        Self {
            name: name.to_string(),
            size,
            delay: Duration::ZERO,
            script: Mutex::new(VecDeque::new()),
            answers: RwLock::new(HashMap::new()),
            wildcard_domains: RwLock::new(HashSet::new()),
            exchanges: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Every exchange sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn push_result(&self, result: Result<QueryResponse, DomainError>) {
        self.script.lock().unwrap().push_back(result);
    }

    pub fn push_results(&self, result: Result<QueryResponse, DomainError>, times: usize) {
        let mut script = self.script.lock().unwrap();
        for _ in 0..times {
            script.push_back(result.clone());
        }
    }

    pub async fn set_answer(&self, name: &str, record_type: RecordType, data: &str) {
        self.answers
            .write()
            .await
            .entry((name.to_string(), record_type))
            .or_default()
            .push(answer(name, record_type, data));
    }

    pub async fn add_wildcard_domain(&self, domain: &str) {
        self.wildcard_domains.write().await.insert(domain.to_string());
    }

    pub fn exchanges(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn questions(&self) -> Vec<DnsQuestion> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResolverPool for MockResolverPool {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> usize {
        self.size
    }

    async fn exchange(&self, question: &DnsQuestion) -> Result<QueryResponse, DomainError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        self.questions.lock().unwrap().push(question.clone());

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self.script.lock().unwrap().pop_front();
        if let Some(result) = scripted {
            return result;
        }

        let key = (question.name.to_string(), question.record_type);
        match self.answers.read().await.get(&key) {
            Some(answers) => Ok(noerror(&question.name, answers.clone())),
            None => Ok(QueryResponse::new(
                question.name.clone(),
                ResponseCode::NXDomain,
                vec![],
            )),
        }
    }

    async fn wildcard_detected(&self, _response: &QueryResponse, domain: &str) -> bool {
        self.wildcard_domains.read().await.contains(domain)
    }
}

// ============================================================================
// Mock DiscoveryCache
// ============================================================================

#[derive(Default)]
pub struct MockDiscoveryCache {
    names: Mutex<HashSet<String>>,
}

impl MockDiscoveryCache {
    pub fn insert(&self, name: &str) {
        self.names.lock().unwrap().insert(name.to_string());
    }
}

impl DiscoveryCache for MockDiscoveryCache {
    fn contains_fqdn(&self, name: &str) -> bool {
        self.names.lock().unwrap().contains(name)
    }
}

// ============================================================================
// Mock AssetStore
// ============================================================================

#[derive(Default)]
pub struct MockAssetStore {
    upserts: RwLock<Vec<String>>,
    should_fail: AtomicBool,
}

impl MockAssetStore {
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub async fn upserts(&self) -> Vec<String> {
        self.upserts.read().await.clone()
    }
}

#[async_trait]
impl AssetStore for MockAssetStore {
    async fn upsert_fqdn(&self, name: &str) -> Result<FqdnAsset, DomainError> {
        let mut upserts = self.upserts.write().await;
        upserts.push(name.to_string());

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("mock store failed".to_string()));
        }
        Ok(FqdnAsset::new(format!("asset-{}", upserts.len()), name))
    }
}

// ============================================================================
// Mock PersistenceQueue
// ============================================================================

/// Runs each task on its own tokio task and keeps the handle for `wait_all`.
#[derive(Default)]
pub struct MockPersistenceQueue {
    handles: Mutex<Vec<JoinHandle<()>>>,
    appended: AtomicUsize,
}

impl MockPersistenceQueue {
    pub fn appended(&self) -> usize {
        self.appended.load(Ordering::SeqCst)
    }

    pub async fn wait_all(&self) {
        let handles: Vec<_> = self.handles.lock().unwrap().drain(..).collect();
        for handle in handles {
            handle.await.unwrap();
        }
    }
}

impl PersistenceQueue for MockPersistenceQueue {
    fn append(&self, task: BoxFuture<'static, ()>) {
        self.appended.fetch_add(1, Ordering::SeqCst);
        self.handles.lock().unwrap().push(tokio::spawn(task));
    }
}

// ============================================================================
// Mock EventDispatcher
// ============================================================================

#[derive(Default)]
pub struct MockDispatcher {
    events: RwLock<Vec<(String, FqdnAsset)>>,
    should_fail: AtomicBool,
}

impl MockDispatcher {
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub async fn events(&self) -> Vec<(String, FqdnAsset)> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl EventDispatcher for MockDispatcher {
    async fn dispatch(
        &self,
        event_name: &str,
        asset: FqdnAsset,
        _session: Arc<dyn DiscoverySession>,
    ) -> Result<(), DomainError> {
        self.events
            .write()
            .await
            .push((event_name.to_string(), asset));

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Dispatch("mock dispatcher failed".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// Mock DiscoverySession
// ============================================================================

pub struct MockSession {
    done: AtomicBool,
    pub cache: MockDiscoveryCache,
    pub store: Arc<MockAssetStore>,
    pub queue: Arc<MockPersistenceQueue>,
}

impl MockSession {
    pub fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
            cache: MockDiscoveryCache::default(),
            store: Arc::new(MockAssetStore::default()),
            queue: Arc::new(MockPersistenceQueue::default()),
        }
    }

    pub fn cancel(&self) {
        self.done.store(true, Ordering::SeqCst);
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoverySession for MockSession {
    fn id(&self) -> &str {
        "mock-session"
    }

    fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    fn cache(&self) -> &dyn DiscoveryCache {
        &self.cache
    }

    fn store(&self) -> Arc<dyn AssetStore> {
        self.store.clone()
    }

    fn queue(&self) -> Arc<dyn PersistenceQueue> {
        self.queue.clone()
    }
}
