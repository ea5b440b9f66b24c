//! CDP WebSocket client.

use std::collections::HashMap;
use std::sync::Arc;

use futures::StreamExt;
use futures::stream::SplitStream;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::{RwLock, mpsc};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, CdpResponse};
use super::rpc::{self, PendingMap, RpcChannel, WsStream};
use super::session::PageSession;

type WsSource = SplitStream<WsStream>;
type EventRoutes = Arc<RwLock<HashMap<String, mpsc::UnboundedSender<CdpResponse>>>>;

/// Browser-level CDP connection.
///
/// Owns the WebSocket to Chrome's browser endpoint. Pages are created as
/// targets and attached in flat mode, so all sessions share this socket.
pub struct CdpClient {
    browser_ws_url: String,
    rpc: RpcChannel,
    event_routes: EventRoutes,
    recv_task: tokio::task::JoinHandle<()>,
}

impl CdpClient {
    /// Connect to Chrome at the given HTTP debugging endpoint
    /// (e.g. `http://127.0.0.1:9222`).
    pub async fn connect(endpoint: &str) -> Result<Self, CdpError> {
        let version = Self::version(endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let browser_ws_url = version.web_socket_debugger_url;
        let (ws_stream, _) = tokio_tungstenite::connect_async(&browser_ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let rpc = RpcChannel::new(ws_sink);
        let event_routes: EventRoutes = Arc::new(RwLock::new(HashMap::new()));

        let recv_task = {
            let pending = rpc.pending();
            let event_routes = event_routes.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending, event_routes).await;
            })
        };

        debug!("CDP client connected to {}", browser_ws_url);

        Ok(Self {
            browser_ws_url,
            rpc,
            event_routes,
            recv_task,
        })
    }

    /// Fetch `/json/version` from the debugging endpoint.
    pub async fn version(endpoint: &str) -> Result<BrowserVersion, CdpError> {
        let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
        debug!("Fetching browser version from {}", version_url);

        reqwest::get(&version_url)
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e)))
    }

    async fn receive_loop(mut ws_source: WsSource, pending: Arc<Mutex<PendingMap>>, routes: EventRoutes) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP <- {}", text);
                    let response = match serde_json::from_str::<CdpResponse>(&text) {
                        Ok(r) => r,
                        Err(e) => {
                            warn!("Unparseable CDP message: {}", e);
                            continue;
                        }
                    };

                    if response.is_event() {
                        Self::route_event(&routes, response).await;
                    } else {
                        rpc::resolve_reply(&pending, response);
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("CDP WebSocket closed by browser");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("CDP WebSocket error: {}", e);
                    break;
                }
            }
        }

        rpc::fail_all(&pending);
        routes.write().await.clear();
    }

    async fn route_event(routes: &EventRoutes, event: CdpResponse) {
        let Some(session_id) = event.session_id.clone() else {
            return;
        };
        let closed = {
            let routes = routes.read().await;
            match routes.get(&session_id) {
                Some(tx) => tx.send(event).is_err(),
                None => false,
            }
        };
        if closed {
            routes.write().await.remove(&session_id);
        }
    }

    /// Browser WebSocket URL this client is attached to.
    pub fn browser_ws_url(&self) -> &str {
        &self.browser_ws_url
    }

    /// Send a browser-level command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.rpc.call(method, params, None).await
    }

    /// Open a blank tab and attach a session to it.
    ///
    /// Navigation is left to the caller so load failures surface as errors
    /// instead of an error page.
    pub async fn new_page(&self) -> Result<PageSession, CdpError> {
        let created = self
            .call("Target.createTarget", Some(json!({ "url": "about:blank" })))
            .await?;
        let target_id = created["targetId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("createTarget: no targetId".to_string()))?
            .to_string();

        self.attach(target_id).await
    }

    async fn attach(&self, target_id: String) -> Result<PageSession, CdpError> {
        let attached = self
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target_id, "flatten": true })),
            )
            .await?;
        let session_id = attached["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("attachToTarget: no sessionId".to_string()))?
            .to_string();

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        self.event_routes
            .write()
            .await
            .insert(session_id.clone(), event_tx);

        let session = PageSession::new(target_id, session_id, self.rpc.clone(), event_rx);
        session.enable_domains().await?;
        Ok(session)
    }

    /// Close a tab and drop its event route.
    pub async fn close_page(&self, session: &PageSession) -> Result<(), CdpError> {
        self.event_routes.write().await.remove(session.session_id());
        self.call(
            "Target.closeTarget",
            Some(json!({ "targetId": session.target_id() })),
        )
        .await?;
        Ok(())
    }

    /// Close the browser (only meaningful for a browser this process launched).
    pub async fn close_browser(&self) -> Result<(), CdpError> {
        let _ = self.call("Browser.close", None).await;
        self.rpc.close().await;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}
