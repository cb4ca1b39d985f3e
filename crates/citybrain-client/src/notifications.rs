// SPDX-License-Identifier: Apache-2.0

use crate::stores::ToastStore;
use citybrain_api::Notification;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;

pub const DEFAULT_NOTIFICATIONS_URL: &str = "ws://127.0.0.1:9003/ws/notifications";

#[derive(Debug)]
pub struct ListenerError(pub String);

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for ListenerError {}

/// Passive subscription to the server-push notification channel. Inbound
/// messages surface as toasts; malformed frames are logged and dropped with
/// the connection kept open. No automatic reconnect: once either side
/// closes, the handle clears and reconnection is the caller's decision.
pub struct NotificationListener {
    toasts: Arc<Mutex<ToastStore>>,
    connected: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl NotificationListener {
    #[must_use]
    pub fn new(toasts: Arc<Mutex<ToastStore>>) -> Self {
        Self {
            toasts,
            connected: Arc::new(AtomicBool::new(false)),
            reader: None,
        }
    }

    pub async fn connect(&mut self, url: &str) -> Result<(), ListenerError> {
        self.disconnect();
        let (mut stream, _) = connect_async(url)
            .await
            .map_err(|err| ListenerError(format!("notification connect failed: {err}")))?;
        self.connected.store(true, Ordering::SeqCst);

        let toasts = Arc::clone(&self.toasts);
        let connected = Arc::clone(&self.connected);
        self.reader = Some(tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                match frame {
                    Ok(Message::Text(raw)) => match serde_json::from_str::<Notification>(&raw) {
                        Ok(notification) => {
                            let mut toasts = toasts.lock().await;
                            toasts.enqueue(
                                notification.title,
                                Some(notification.message),
                                notification.variant.unwrap_or_default(),
                            );
                        }
                        Err(err) => warn!("dropping malformed notification payload: {err}"),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(err) => {
                        warn!("notification channel error: {err}");
                        break;
                    }
                }
            }
            connected.store(false, Ordering::SeqCst);
        }));
        Ok(())
    }

    pub fn disconnect(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        self.connected.store(false, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl Drop for NotificationListener {
    fn drop(&mut self) {
        self.disconnect();
    }
}
