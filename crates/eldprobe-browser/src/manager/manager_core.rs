//! BrowserManager core: struct definition, connect, chrome management.

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{BrowserError, BrowserManagerConfig};
use crate::cdp::CdpClient;

const LAUNCH_POLL: Duration = Duration::from_millis(200);

/// Owns the browser connection and, when it started one, the Chrome process.
pub struct BrowserManager {
    pub(super) config: BrowserManagerConfig,
    pub(super) client: RwLock<Option<Arc<CdpClient>>>,
    chrome_process: RwLock<Option<Child>>,
}

impl BrowserManager {
    /// Create a new browser manager. Nothing is launched until [`connect`].
    ///
    /// [`connect`]: BrowserManager::connect
    pub fn new(config: BrowserManagerConfig) -> Self {
        Self {
            config,
            client: RwLock::new(None),
            chrome_process: RwLock::new(None),
        }
    }

    /// Manager configuration.
    pub fn config(&self) -> &BrowserManagerConfig {
        &self.config
    }

    /// Well-known Chrome/Chromium install locations for this OS.
    pub fn candidate_paths() -> &'static [&'static str] {
        #[cfg(target_os = "macos")]
        {
            &[
                "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
                "/Applications/Chromium.app/Contents/MacOS/Chromium",
                "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
            ]
        }

        #[cfg(target_os = "linux")]
        {
            &[
                "/usr/bin/google-chrome",
                "/usr/bin/google-chrome-stable",
                "/usr/bin/chromium",
                "/usr/bin/chromium-browser",
                "/snap/bin/chromium",
            ]
        }

        #[cfg(target_os = "windows")]
        {
            &[
                r"C:\Program Files\Google\Chrome\Application\chrome.exe",
                r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
            ]
        }

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            &[]
        }
    }

    /// Resolve the Chrome executable: the configured path, else the first
    /// installed candidate.
    pub fn find_chrome(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config.chrome_path {
            return path.exists().then(|| path.clone());
        }
        Self::candidate_paths()
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    async fn is_chrome_running(&self) -> bool {
        CdpClient::version(&self.config.endpoint()).await.is_ok()
    }

    /// Command-line flags for a launched browser.
    pub(super) fn launch_args(&self) -> Vec<String> {
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port),
            format!("--user-data-dir={}", self.config.get_profile_dir().display()),
            format!(
                "--window-size={},{}",
                self.config.viewport_width, self.config.viewport_height
            ),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--metrics-recording-only".to_string(),
        ];
        if self.config.headless {
            args.push("--headless=new".to_string());
        }
        args
    }

    async fn launch_chrome(&self) -> Result<Child, BrowserError> {
        let chrome_path = self.find_chrome().ok_or(BrowserError::ChromeNotFound)?;
        let profile_dir = self.config.get_profile_dir();

        if let Err(e) = tokio::fs::create_dir_all(&profile_dir).await {
            warn!("Failed to create profile directory: {}", e);
        }

        info!(
            "Launching {} with profile at {}",
            chrome_path.display(),
            profile_dir.display()
        );

        let child = Command::new(&chrome_path)
            .args(self.launch_args())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| BrowserError::LaunchFailed(e.to_string()))?;

        info!("Chrome launched with PID: {:?}", child.id());
        Ok(child)
    }

    /// Connect to the browser, launching it if nothing listens on the port.
    pub async fn connect(&self) -> Result<(), BrowserError> {
        if self.client.read().await.is_some() {
            return Ok(());
        }

        if self.is_chrome_running().await {
            info!("Chrome already running on port {}", self.config.debug_port);
        } else {
            info!(
                "Chrome not running on port {}, launching",
                self.config.debug_port
            );
            let child = self.launch_chrome().await?;
            *self.chrome_process.write().await = Some(child);

            let start = Instant::now();
            loop {
                tokio::time::sleep(LAUNCH_POLL).await;
                if self.is_chrome_running().await {
                    break;
                }
                if start.elapsed() >= self.config.launch_timeout {
                    return Err(BrowserError::LaunchFailed(
                        "Chrome failed to open its debug port in time".to_string(),
                    ));
                }
            }
        }

        let client = CdpClient::connect(&self.config.endpoint()).await?;
        debug!("Browser websocket: {}", client.browser_ws_url());
        *self.client.write().await = Some(Arc::new(client));

        info!("Connected to Chrome at {}", self.config.endpoint());
        Ok(())
    }

    pub(super) async fn client(&self) -> Result<Arc<CdpClient>, BrowserError> {
        if self.client.read().await.is_none() {
            self.connect().await?;
        }
        self.client
            .read()
            .await
            .clone()
            .ok_or(BrowserError::NotConnected)
    }

    /// Drop the connection and stop Chrome if this manager launched it.
    pub async fn shutdown(&self) -> Result<(), BrowserError> {
        let client = self.client.write().await.take();
        let mut child = self.chrome_process.write().await.take();

        if let (Some(client), Some(_)) = (&client, &child) {
            let _ = client.close_browser().await;
        }
        if let Some(child) = child.as_mut() {
            info!("Shutting down Chrome");
            let _ = child.kill().await;
        }
        info!("Browser connection closed");
        Ok(())
    }
}
