#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use sheetlink_client::{ApiClient, ClientConfig, StateSink, StateStore, Transport, TransportProvider};
use sheetlink_contract::{AnalysisData, SheetData, TransportError, UiState, UserProfile};
use sheetlink_protocol::{RequestEnvelope, ResponseBody, SuccessBody};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// Scripted transport
// ============================================================================

/// How a scripted transport answers one envelope.
pub struct Reply {
    pub delay: Duration,
    pub result: Result<ResponseBody, TransportError>,
}

/// Answer immediately.
pub fn reply(result: Result<ResponseBody, TransportError>) -> Reply {
    Reply {
        delay: Duration::ZERO,
        result,
    }
}

/// Answer after a simulated delay.
pub fn delayed(delay: Duration, result: Result<ResponseBody, TransportError>) -> Reply {
    Reply { delay, result }
}

/// A success response echoing the envelope's id, with no state slices.
pub fn success(envelope: &RequestEnvelope, result: Value) -> Result<ResponseBody, TransportError> {
    Ok(ResponseBody::Success {
        id: envelope.id.clone(),
        body: SuccessBody {
            result,
            ..Default::default()
        },
    })
}

/// A success response echoing the envelope's id with an explicit body.
pub fn success_with(
    envelope: &RequestEnvelope,
    body: SuccessBody,
) -> Result<ResponseBody, TransportError> {
    Ok(ResponseBody::Success {
        id: envelope.id.clone(),
        body,
    })
}

type Responder = Box<dyn Fn(&RequestEnvelope) -> Reply + Send + Sync>;

/// In-process transport that records every envelope and answers from a
/// scripted responder.
pub struct ScriptedTransport {
    sent: Mutex<Vec<RequestEnvelope>>,
    responder: Responder,
}

impl ScriptedTransport {
    pub fn new(
        responder: impl Fn(&RequestEnvelope) -> Reply + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        })
    }

    /// Every envelope delivered so far, in send order.
    pub fn sent(&self) -> Vec<RequestEnvelope> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, envelope: &RequestEnvelope) -> Result<ResponseBody, TransportError> {
        self.sent.lock().unwrap().push(envelope.clone());
        let reply = (self.responder)(envelope);
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

// Providers
// ============================================================================

/// Provider that hands out a fixed transport (or nothing) and counts
/// acquisitions.
pub struct StaticProvider {
    transport: Option<Arc<dyn Transport>>,
    pub acquisitions: AtomicUsize,
}

impl StaticProvider {
    pub fn some(transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self {
            transport: Some(transport),
            acquisitions: AtomicUsize::new(0),
        })
    }

    pub fn none() -> Arc<Self> {
        Arc::new(Self {
            transport: None,
            acquisitions: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TransportProvider for StaticProvider {
    async fn acquire(&self) -> Option<Arc<dyn Transport>> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        self.transport.clone()
    }
}

/// Provider whose first `failures` acquisitions yield nothing.
pub struct FlakyProvider {
    transport: Arc<dyn Transport>,
    failures_left: AtomicUsize,
    pub acquisitions: AtomicUsize,
}

impl FlakyProvider {
    pub fn new(transport: Arc<dyn Transport>, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            transport,
            failures_left: AtomicUsize::new(failures),
            acquisitions: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TransportProvider for FlakyProvider {
    async fn acquire(&self) -> Option<Arc<dyn Transport>> {
        self.acquisitions.fetch_add(1, Ordering::SeqCst);
        let failures = self.failures_left.load(Ordering::SeqCst);
        if failures > 0 {
            self.failures_left.store(failures - 1, Ordering::SeqCst);
            return None;
        }
        Some(Arc::clone(&self.transport))
    }
}

// Counting sink
// ============================================================================

/// State sink that counts per-slice replacements and tracks the largest
/// loading list ever observed.
#[derive(Default)]
pub struct CountingSink {
    pub store: StateStore,
    pub sheet_updates: AtomicUsize,
    pub analysis_updates: AtomicUsize,
    pub profile_updates: AtomicUsize,
    pub loading_high_water: AtomicUsize,
}

impl CountingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn ui_state(&self) -> UiState {
        self.store.ui_state()
    }
}

impl StateSink for CountingSink {
    fn replace_sheet_data(&self, sheets: Vec<SheetData>) {
        self.sheet_updates.fetch_add(1, Ordering::SeqCst);
        self.store.replace_sheet_data(sheets);
    }

    fn replace_analysis_data(&self, analysis: AnalysisData) {
        self.analysis_updates.fetch_add(1, Ordering::SeqCst);
        self.store.replace_analysis_data(analysis);
    }

    fn replace_user_profile(&self, profile: UserProfile) {
        self.profile_updates.fetch_add(1, Ordering::SeqCst);
        self.store.replace_user_profile(profile);
    }

    fn update_ui(&self, apply: &mut dyn FnMut(&mut UiState)) {
        self.store.update_ui(apply);
        let len = self.store.ui_state().loading.len();
        self.loading_high_water.fetch_max(len, Ordering::SeqCst);
    }
}

// Client wiring
// ============================================================================

pub fn client(transport: Arc<ScriptedTransport>, sink: Arc<CountingSink>) -> ApiClient {
    ApiClient::new(StaticProvider::some(transport), sink)
}

pub fn client_with_config(
    transport: Arc<ScriptedTransport>,
    sink: Arc<CountingSink>,
    config: ClientConfig,
) -> ApiClient {
    ApiClient::with_config(StaticProvider::some(transport), sink, config)
}
