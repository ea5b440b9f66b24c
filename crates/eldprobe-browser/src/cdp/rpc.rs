//! Request/response correlation over one shared WebSocket.
//!
//! The browser-level client and every attached page session send on the
//! same socket. Replies are matched back to callers by request id through a
//! pending table filled here and drained by the client's receive loop.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::SinkExt;
use futures::stream::SplitSink;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{Mutex as AsyncMutex, oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};
use tracing::trace;

use super::error::CdpError;
use super::protocol::{CdpRequest, CdpResponse};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSink = SplitSink<WsStream, Message>;

pub(crate) type PendingMap = HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>;

/// Default per-command timeout.
pub(crate) const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloneable handle for sending commands and awaiting replies.
#[derive(Clone)]
pub(crate) struct RpcChannel {
    ws_tx: Arc<AsyncMutex<WsSink>>,
    pending: Arc<Mutex<PendingMap>>,
    request_id: Arc<AtomicU64>,
}

impl RpcChannel {
    pub(crate) fn new(ws_tx: WsSink) -> Self {
        Self {
            ws_tx: Arc::new(AsyncMutex::new(ws_tx)),
            pending: Arc::new(Mutex::new(HashMap::new())),
            request_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub(crate) fn pending(&self) -> Arc<Mutex<PendingMap>> {
        self.pending.clone()
    }

    /// Send a command and wait up to [`COMMAND_TIMEOUT`] for its reply.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        self.call_with_timeout(method, params, session_id, COMMAND_TIMEOUT)
            .await
    }

    /// Send a command and wait up to `timeout` for its reply.
    pub(crate) async fn call_with_timeout(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
        timeout: Duration,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(String::from),
        };
        let payload = serde_json::to_string(&request)?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        trace!("CDP -> {}", payload);
        let sent = {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(payload.into())).await
        };
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        await_reply(&self.pending, id, rx, method, timeout).await
    }

    /// Close the underlying socket.
    pub(crate) async fn close(&self) {
        let mut ws = self.ws_tx.lock().await;
        let _ = ws.close().await;
    }
}

/// Wait for the reply to request `id`, dropping it from the pending table
/// when `timeout` passes first.
pub(crate) async fn await_reply(
    pending: &Mutex<PendingMap>,
    id: u64,
    rx: oneshot::Receiver<Result<Value, CdpError>>,
    method: &str,
    timeout: Duration,
) -> Result<Value, CdpError> {
    match tokio::time::timeout(timeout, rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(CdpError::SessionClosed),
        Err(_) => {
            pending.lock().remove(&id);
            Err(CdpError::Timeout(format!("{} (request {})", method, id)))
        }
    }
}

/// Resolve a pending request from a reply message. Returns `false` when no
/// caller was waiting on the id.
pub(crate) fn resolve_reply(pending: &Mutex<PendingMap>, response: CdpResponse) -> bool {
    let Some(id) = response.id else {
        return false;
    };
    let Some(tx) = pending.lock().remove(&id) else {
        return false;
    };

    let result = match response.error {
        Some(err) => Err(CdpError::Protocol {
            code: err.code,
            message: err.message,
        }),
        None => Ok(response.result.unwrap_or(Value::Null)),
    };
    let _ = tx.send(result);
    true
}

/// Fail every outstanding request, used when the socket goes away.
pub(crate) fn fail_all(pending: &Mutex<PendingMap>) {
    for (_, tx) in pending.lock().drain() {
        let _ = tx.send(Err(CdpError::SessionClosed));
    }
}
