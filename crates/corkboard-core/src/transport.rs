//! Guarded publish/subscribe transport.
//!
//! The core never assumes delivery: [`safe_publish`] sends only while the
//! connection is established and otherwise logs and drops the command. There
//! is no queueing, no retry, no deduplication; callers cannot tell a dropped
//! publish from a sent one.

use thiserror::Error;

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

/// Transport failures. Expected runtime conditions (publishing while
/// disconnected) are swallowed by [`safe_publish`]; these errors surface
/// only to callers that want to handle them explicitly.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport is not connected")]
    NotConnected,
    #[error("connection already open")]
    AlreadyConnected,
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
    #[error("connection closed")]
    Closed,
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Events surfaced by a transport, drained by the owner.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    Connected,
    Disconnected,
    /// A broadcast delivered on a subscribed destination.
    Message { destination: String, body: String },
    Error { message: String },
}

/// The publish/subscribe connection as the synchronizer sees it.
pub trait Transport {
    fn state(&self) -> ConnectionState;

    fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Send a body to a destination. Fails fast when not connected.
    fn publish(&self, destination: &str, body: &str) -> Result<(), TransportError>;

    /// Start receiving broadcasts from a destination; returns the
    /// subscription id.
    fn subscribe(&self, destination: &str) -> Result<String, TransportError>;
}

/// Publish if connected; otherwise log the dropped command and return.
///
/// Never fails and never queues. A send error after the connectivity check
/// is swallowed the same way.
pub fn safe_publish<T: Transport + ?Sized>(transport: &T, destination: &str, body: &str) {
    if !transport.is_connected() {
        log::warn!("dropping publish to {destination}: transport is not connected");
        return;
    }
    if let Err(err) = transport.publish(destination, body) {
        log::warn!("publish to {destination} failed: {err}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod ws {
    use super::*;
    use crate::protocol::{ClientFrame, ServerFrame};
    use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
    use std::thread::{self, JoinHandle};
    use std::time::Duration;
    use tungstenite::{Message, connect};
    use url::Url;
    use uuid::Uuid;

    /// Commands sent to the socket thread.
    enum WsCommand {
        Send(String),
        Close,
    }

    /// WebSocket transport for native platforms.
    ///
    /// Runs the socket on a background thread for non-blocking operation;
    /// events are drained with `poll_events()`, which also refreshes the
    /// connection state.
    pub struct WsTransport {
        state: ConnectionState,
        events: Vec<TransportEvent>,
        /// Channel to send commands to the socket thread.
        cmd_tx: Option<Sender<WsCommand>>,
        /// Channel to receive events from the socket thread.
        event_rx: Option<Receiver<TransportEvent>>,
        /// Handle to the socket thread.
        _thread: Option<JoinHandle<()>>,
    }

    impl WsTransport {
        /// Create a new disconnected transport.
        pub fn new() -> Self {
            Self {
                state: ConnectionState::Disconnected,
                events: Vec::new(),
                cmd_tx: None,
                event_rx: None,
                _thread: None,
            }
        }

        /// Connect to the server.
        pub fn connect(&mut self, url: &str) -> Result<(), TransportError> {
            if self.cmd_tx.is_some() {
                return Err(TransportError::AlreadyConnected);
            }

            let parsed = Url::parse(url).map_err(|e| TransportError::InvalidUrl(e.to_string()))?;
            if parsed.scheme() != "ws" && parsed.scheme() != "wss" {
                return Err(TransportError::InvalidUrl(format!(
                    "unsupported scheme: {}",
                    parsed.scheme()
                )));
            }

            self.state = ConnectionState::Connecting;

            let (cmd_tx, cmd_rx) = channel::<WsCommand>();
            let (event_tx, event_rx) = channel::<TransportEvent>();
            let url = url.to_string();

            let handle = thread::spawn(move || {
                log::info!("socket thread: connecting to {}", url);

                match connect(&url) {
                    Ok((mut socket, response)) => {
                        log::info!("socket connected, status: {}", response.status());
                        let _ = event_tx.send(TransportEvent::Connected);

                        // Read timeout on the underlying stream keeps the
                        // loop responsive to commands.
                        {
                            let stream = socket.get_mut();
                            match stream {
                                tungstenite::stream::MaybeTlsStream::Plain(tcp) => {
                                    let _ = tcp.set_read_timeout(Some(Duration::from_millis(50)));
                                    let _ = tcp.set_write_timeout(Some(Duration::from_secs(5)));
                                }
                                #[allow(unreachable_patterns)]
                                _ => {
                                    log::debug!("non-plain stream, relying on WouldBlock");
                                }
                            }
                        }

                        loop {
                            match cmd_rx.try_recv() {
                                Ok(WsCommand::Send(frame)) => {
                                    if let Err(e) = socket.send(Message::Text(frame)) {
                                        log::error!("socket send error: {}", e);
                                        break;
                                    }
                                }
                                Ok(WsCommand::Close) => {
                                    let _ = socket.close(None);
                                    break;
                                }
                                Err(TryRecvError::Disconnected) => break,
                                Err(TryRecvError::Empty) => {}
                            }

                            match socket.read() {
                                Ok(Message::Text(txt)) => {
                                    match serde_json::from_str::<ServerFrame>(&txt) {
                                        Ok(ServerFrame::Message { destination, body }) => {
                                            let _ = event_tx.send(TransportEvent::Message {
                                                destination,
                                                body,
                                            });
                                        }
                                        Ok(ServerFrame::Error { message }) => {
                                            let _ =
                                                event_tx.send(TransportEvent::Error { message });
                                        }
                                        Err(err) => {
                                            log::warn!("unparseable server frame: {err}");
                                        }
                                    }
                                }
                                Ok(Message::Ping(data)) => {
                                    let _ = socket.send(Message::Pong(data));
                                }
                                Ok(Message::Close(_)) => break,
                                Ok(_) => {} // Ignore binary, pong
                                Err(tungstenite::Error::Io(ref e))
                                    if e.kind() == std::io::ErrorKind::WouldBlock
                                        || e.kind() == std::io::ErrorKind::TimedOut =>
                                {
                                    continue;
                                }
                                Err(e) => {
                                    log::error!("socket read error: {}", e);
                                    break;
                                }
                            }
                        }

                        log::info!("socket thread exiting");
                        let _ = event_tx.send(TransportEvent::Disconnected);
                    }
                    Err(e) => {
                        log::error!("socket connection failed: {}", e);
                        let _ = event_tx.send(TransportEvent::Error {
                            message: format!("connection failed: {}", e),
                        });
                    }
                }
            });

            self.cmd_tx = Some(cmd_tx);
            self.event_rx = Some(event_rx);
            self._thread = Some(handle);

            Ok(())
        }

        /// Disconnect from the server.
        pub fn disconnect(&mut self) {
            if let Some(tx) = self.cmd_tx.take() {
                let _ = tx.send(WsCommand::Close);
            }
            self.event_rx = None;
            self._thread = None;
            self.state = ConnectionState::Disconnected;
        }

        /// Drain pending events (non-blocking), updating connection state.
        pub fn poll_events(&mut self) -> Vec<TransportEvent> {
            if let Some(ref rx) = self.event_rx {
                while let Ok(event) = rx.try_recv() {
                    match &event {
                        TransportEvent::Connected => self.state = ConnectionState::Connected,
                        TransportEvent::Disconnected => self.state = ConnectionState::Disconnected,
                        TransportEvent::Error { .. } => self.state = ConnectionState::Error,
                        _ => {}
                    }
                    self.events.push(event);
                }
            }

            std::mem::take(&mut self.events)
        }

        fn send_frame(&self, frame: &ClientFrame) -> Result<(), TransportError> {
            let tx = self.cmd_tx.as_ref().ok_or(TransportError::NotConnected)?;
            let json = serde_json::to_string(frame)?;
            tx.send(WsCommand::Send(json))
                .map_err(|_| TransportError::Closed)
        }
    }

    impl Transport for WsTransport {
        fn state(&self) -> ConnectionState {
            self.state
        }

        fn publish(&self, destination: &str, body: &str) -> Result<(), TransportError> {
            self.send_frame(&ClientFrame::Send {
                destination: destination.to_string(),
                body: body.to_string(),
            })
        }

        fn subscribe(&self, destination: &str) -> Result<String, TransportError> {
            let id = Uuid::new_v4().to_string();
            self.send_frame(&ClientFrame::Subscribe {
                id: id.clone(),
                destination: destination.to_string(),
            })?;
            Ok(id)
        }
    }

    impl Default for WsTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Drop for WsTransport {
        fn drop(&mut self) {
            self.disconnect();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use ws::WsTransport;
