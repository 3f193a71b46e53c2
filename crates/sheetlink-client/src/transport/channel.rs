use super::Transport;
use async_trait::async_trait;
use serde_json::Value;
use sheetlink_contract::{RequestId, TransportError};
use sheetlink_protocol::{decode_wire_response, RequestEnvelope, ResponseBody, WireResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

type PendingMap = HashMap<RequestId, oneshot::Sender<Result<ResponseBody, TransportError>>>;

/// Adapts a duplex message channel into a [`Transport`].
///
/// Outgoing envelopes go down the `outbound` sender; raw incoming frames
/// arrive on the `inbound` receiver in whatever order the backend produces
/// them. A reader task decodes each frame and routes it to the caller
/// whose request id it echoes. Frames that fail to decode are logged and
/// skipped; frames answering an unknown id are dropped.
pub struct ChannelTransport {
    outbound: mpsc::Sender<RequestEnvelope>,
    pending: Arc<Mutex<PendingMap>>,
    alive: Arc<AtomicBool>,
}

impl ChannelTransport {
    /// Wire a transport over the two channel halves and start its reader
    /// task.
    pub fn new(
        outbound: mpsc::Sender<RequestEnvelope>,
        mut inbound: mpsc::UnboundedReceiver<Value>,
    ) -> Self {
        let pending: Arc<Mutex<PendingMap>> = Arc::new(Mutex::new(HashMap::new()));
        let alive = Arc::new(AtomicBool::new(true));

        let pending_reader = Arc::clone(&pending);
        let alive_reader = Arc::clone(&alive);
        tokio::spawn(async move {
            while let Some(frame) = inbound.recv().await {
                let message = match serde_json::from_value::<WireResponse>(frame) {
                    Ok(message) => message,
                    Err(err) => {
                        warn!(error = %err, "skipping undecodable frame");
                        continue;
                    }
                };

                let id = message.id().clone();
                let result = decode_wire_response(message);
                let tx = pending_reader.lock().unwrap().remove(&id);
                match tx {
                    Some(tx) => {
                        let _ = tx.send(result);
                    }
                    None => warn!(%id, "dropping response with unknown id"),
                }
            }

            // Channel closed: fail everything still pending.
            alive_reader.store(false, Ordering::SeqCst);
            pending_reader.lock().unwrap().clear();
        });

        Self {
            outbound,
            pending,
            alive,
        }
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn send(&self, envelope: &RequestEnvelope) -> Result<ResponseBody, TransportError> {
        if !self.alive.load(Ordering::SeqCst) {
            return Err(TransportError::ConnectionClosed);
        }

        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .unwrap()
            .insert(envelope.id.clone(), tx);

        if self.outbound.send(envelope.clone()).await.is_err() {
            self.pending.lock().unwrap().remove(&envelope.id);
            return Err(TransportError::ConnectionClosed);
        }

        // No per-call timeout: a peer that never answers hangs the caller,
        // by contract.
        match rx.await {
            Ok(result) => result,
            Err(_) => {
                self.pending.lock().unwrap().remove(&envelope.id);
                Err(TransportError::ConnectionClosed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sheetlink_protocol::RequestBody;

    fn envelope(id: &str) -> RequestEnvelope {
        RequestBody::api_call("get_render_count", json!({})).into_envelope(RequestId::new(id))
    }

    fn success_frame(id: &str, result: Value) -> Value {
        json!({"event": "response", "id": id, "data": result})
    }

    #[tokio::test]
    async fn routes_out_of_order_responses_by_id() {
        let (out_tx, mut out_rx) = mpsc::channel(8);
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport::new(out_tx, in_rx));

        let transport_a = Arc::clone(&transport);
        let call_a = tokio::spawn(async move { transport_a.send(&envelope("req_a")).await });
        let transport_b = Arc::clone(&transport);
        let call_b = tokio::spawn(async move { transport_b.send(&envelope("req_b")).await });

        // Both envelopes leave before either response arrives.
        let first = out_rx.recv().await.expect("first envelope");
        let second = out_rx.recv().await.expect("second envelope");
        let mut sent: Vec<String> = vec![first.id.to_string(), second.id.to_string()];
        sent.sort();
        assert_eq!(sent, vec!["req_a", "req_b"]);

        // Answer b first, then a.
        in_tx.send(success_frame("req_b", json!(2))).unwrap();
        in_tx.send(success_frame("req_a", json!(1))).unwrap();

        let response_a = call_a.await.unwrap().unwrap();
        let response_b = call_b.await.unwrap().unwrap();
        match (response_a, response_b) {
            (
                ResponseBody::Success { body: a, .. },
                ResponseBody::Success { body: b, .. },
            ) => {
                assert_eq!(a.result, json!(1));
                assert_eq!(b.result, json!(2));
            }
            _ => panic!("expected two successes"),
        }
    }

    #[tokio::test]
    async fn unknown_id_frames_are_dropped() {
        let (out_tx, _out_rx) = mpsc::channel(8);
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport::new(out_tx, in_rx));

        in_tx.send(success_frame("nobody_waiting", json!(0))).unwrap();

        // The stray frame must not break routing for a real call.
        let transport_call = Arc::clone(&transport);
        let call = tokio::spawn(async move { transport_call.send(&envelope("req_1")).await });
        in_tx.send(success_frame("req_1", json!("ok"))).unwrap();

        let response = call.await.unwrap().unwrap();
        assert_eq!(response.id(), Some(&RequestId::new("req_1")));
    }

    #[tokio::test]
    async fn undecodable_frames_are_skipped() {
        let (out_tx, _out_rx) = mpsc::channel(8);
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport::new(out_tx, in_rx));

        in_tx.send(json!({"event": "unknown_event"})).unwrap();
        in_tx.send(json!("not even an object")).unwrap();

        let transport_call = Arc::clone(&transport);
        let call = tokio::spawn(async move { transport_call.send(&envelope("req_1")).await });
        in_tx.send(success_frame("req_1", json!("still fine"))).unwrap();

        assert!(call.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn closed_inbound_fails_pending_and_later_calls() {
        let (out_tx, _out_rx) = mpsc::channel(8);
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport::new(out_tx, in_rx));

        let transport_call = Arc::clone(&transport);
        let call = tokio::spawn(async move { transport_call.send(&envelope("req_1")).await });

        // Give the call time to register before the channel dies.
        tokio::task::yield_now().await;
        drop(in_tx);

        let err = call.await.unwrap().err().expect("pending call fails");
        assert!(matches!(err, TransportError::ConnectionClosed));

        // Wait for the reader task to observe the closure.
        tokio::task::yield_now().await;
        let err = transport.send(&envelope("req_2")).await.err().expect("dead");
        assert!(matches!(err, TransportError::ConnectionClosed));
    }

    #[tokio::test]
    async fn malformed_slice_surfaces_as_protocol_error_to_the_caller() {
        let (out_tx, _out_rx) = mpsc::channel(8);
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let transport = Arc::new(ChannelTransport::new(out_tx, in_rx));

        let transport_call = Arc::clone(&transport);
        let call = tokio::spawn(async move { transport_call.send(&envelope("req_1")).await });
        in_tx
            .send(json!({
                "event": "response",
                "id": "req_1",
                "shared_variables": {"sheet_data_json": "not json"},
                "data": {}
            }))
            .unwrap();

        let err = call.await.unwrap().err().expect("protocol error");
        assert!(matches!(err, TransportError::Protocol(_)));
    }
}
