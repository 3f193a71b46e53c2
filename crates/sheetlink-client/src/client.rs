use crate::config::ClientConfig;
use crate::store::StateSink;
use crate::transport::{Transport, TransportProvider};
use serde_json::Value;
use sheetlink_contract::{ApiError, ErrorDescriptor, LoadingEntry, RequestId, TransportError};
use sheetlink_protocol::{RequestBody, ResponseBody};
use std::sync::{Arc, Mutex};

/// Where one call stands relative to its grace window.
///
/// The timer task and the response path race for this cell; whichever
/// runs second sees what the first did. `Cancelled` and the post-clear
/// state are absorbing.
enum GracePeriod {
    /// The timer is pending; no loading entry exists yet.
    Armed,
    /// The response won the race; the timer must not register.
    Cancelled,
    /// The timer fired and a loading entry is registered.
    Registered,
}

struct ClientInner {
    provider: Arc<dyn TransportProvider>,
    transport: tokio::sync::Mutex<Option<Arc<dyn Transport>>>,
    sink: Arc<dyn StateSink>,
    config: ClientConfig,
}

/// The API client: correlator, loading tracker, and reconciler in one
/// handle.
///
/// Cheap to clone; all clones share the memoized transport and the state
/// sink. The typed operation façade lives in inherent methods spread
/// across the `api` module, all funneling through [`ApiClient::send`].
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    /// Create a client with default configuration.
    pub fn new(provider: Arc<dyn TransportProvider>, sink: Arc<dyn StateSink>) -> Self {
        Self::with_config(provider, sink, ClientConfig::default())
    }

    /// Create a client with explicit configuration.
    pub fn with_config(
        provider: Arc<dyn TransportProvider>,
        sink: Arc<dyn StateSink>,
        config: ClientConfig,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                provider,
                transport: tokio::sync::Mutex::new(None),
                sink,
                config,
            }),
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Obtain the transport, memoizing the first success.
    ///
    /// A failed acquisition is not cached, so the next call retries.
    async fn acquire_transport(&self) -> Option<Arc<dyn Transport>> {
        let mut cached = self.inner.transport.lock().await;
        if let Some(transport) = cached.as_ref() {
            return Some(Arc::clone(transport));
        }
        let transport = self.inner.provider.acquire().await?;
        *cached = Some(Arc::clone(&transport));
        Some(transport)
    }

    /// Send one correlated request and reconcile its response.
    ///
    /// The full lifecycle of a call:
    ///
    /// 1. Mint a fresh correlation id and build the envelope.
    /// 2. Obtain the transport; if none can be established, resolve
    ///    immediately with the connection-error descriptor — nothing was
    ///    sent, so no loading entry is created and no state is touched.
    /// 3. Arm the grace timer. If the response arrives first, the timer
    ///    is cancelled and no loading entry ever exists; otherwise the
    ///    entry appears at the window boundary and is removed in the same
    ///    step that processes the response.
    /// 4. Deliver the envelope and await exactly one resolution. There is
    ///    no retry and no call timeout here.
    /// 5. Reconcile: replace whichever shared-state slices the response
    ///    carries, or route the failure (modal or in-place), before
    ///    control returns to the caller.
    pub async fn send(&self, body: RequestBody) -> Result<Value, ApiError> {
        let Some(transport) = self.acquire_transport().await else {
            return Err(ApiError::Backend(ErrorDescriptor::connection()));
        };

        let envelope = body.into_envelope(RequestId::generate());

        let grace = Arc::new(Mutex::new(GracePeriod::Armed));
        let timer = {
            let grace = Arc::clone(&grace);
            let sink = Arc::clone(&self.inner.sink);
            let window = self.inner.config.grace_window;
            let entry = LoadingEntry {
                id: envelope.id.clone(),
                step_id: envelope.step_id.clone(),
                operation: envelope.operation.clone(),
            };
            tokio::spawn(async move {
                tokio::time::sleep(window).await;
                let mut state = grace.lock().unwrap();
                if matches!(*state, GracePeriod::Armed) {
                    sink.update_ui(&mut |ui| ui.register_loading(entry.clone()));
                    *state = GracePeriod::Registered;
                }
            })
        };

        let outcome = transport.send(&envelope).await;

        // Release the grace timer on every path, including transport
        // failure, so no loading entry outlives its request.
        timer.abort();
        self.release_grace(&grace, &envelope.id);

        let response = outcome.map_err(ApiError::Transport)?;

        if let Some(answered) = response.id() {
            if answered != &envelope.id {
                return Err(TransportError::protocol(format!(
                    "response for request {answered} arrived on call {}",
                    envelope.id
                ))
                .into());
            }
        }

        self.reconcile(response)
    }

    /// Cancel a pending grace timer, or clear the loading entry it
    /// already registered.
    fn release_grace(&self, grace: &Mutex<GracePeriod>, id: &RequestId) {
        let mut state = grace.lock().unwrap();
        if matches!(*state, GracePeriod::Registered) {
            self.inner.sink.update_ui(&mut |ui| ui.clear_loading(id));
        }
        *state = GracePeriod::Cancelled;
    }

    /// Apply a resolved response to shared state and unwrap the result.
    ///
    /// Success replaces each state slice the response carries — and only
    /// those — wholesale. Errors never touch the slices; a modal-worthy
    /// error swaps the UI modal slot (last write wins) and is still
    /// returned to the caller for local cleanup.
    fn reconcile(&self, response: ResponseBody) -> Result<Value, ApiError> {
        match response {
            ResponseBody::Success { body, .. } => {
                if let Some(sheets) = body.sheet_data_array {
                    self.inner.sink.replace_sheet_data(sheets);
                }
                if let Some(analysis) = body.analysis_data {
                    self.inner.sink.replace_analysis_data(analysis);
                }
                if let Some(profile) = body.user_profile {
                    self.inner.sink.replace_user_profile(profile);
                }
                Ok(body.result)
            }
            ResponseBody::Error { descriptor, .. } => {
                if descriptor.show_error_modal {
                    let modal = descriptor.clone();
                    self.inner
                        .sink
                        .update_ui(&mut |ui| ui.open_error_modal(modal.clone()));
                }
                Err(ApiError::Backend(descriptor))
            }
        }
    }
}
