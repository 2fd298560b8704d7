use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::config::ServerConfig;
use crate::dashboard::Dashboard;
use crate::panel::Panel;
use crate::protocol::{self, ClientCommand};

/// Hands operator commands to the running session. Commands are
/// fire-and-forget: nothing is applied locally until the server's confirming
/// state message arrives, and an unacknowledged command is never resent.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::Sender<ClientCommand>,
}

impl CommandSender {
    pub async fn send(&self, command: ClientCommand) -> Result<()> {
        self.tx
            .send(command)
            .await
            .context("Command channel closed")
    }
}

/// The transport shell around the dashboard engine: connect, feed inbound
/// frames to the pipeline, push queued commands out, reconnect with a fixed
/// delay on any interruption.
pub struct DashboardClient {
    server: ServerConfig,
    dashboard: Dashboard,
    panel: Box<dyn Panel>,
    cmd_tx: mpsc::Sender<ClientCommand>,
    cmd_rx: mpsc::Receiver<ClientCommand>,
}

impl DashboardClient {
    pub fn new(server: ServerConfig, dashboard: Dashboard, panel: Box<dyn Panel>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        Self {
            server,
            dashboard,
            panel,
            cmd_tx,
            cmd_rx,
        }
    }

    pub fn command_sender(&self) -> CommandSender {
        CommandSender {
            tx: self.cmd_tx.clone(),
        }
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Connects and reconnects forever. Disconnection is a lifecycle event,
    /// not an error: after it, local state is presumed stale and the
    /// server's next full state frame replaces it wholesale.
    pub async fn run(&mut self) -> Result<()> {
        let delay = Duration::from_millis(self.server.reconnect_delay_ms);
        loop {
            match connect_async(self.server.url.as_str()).await {
                Ok((ws_stream, _)) => {
                    info!("Connected to {}", self.server.url);
                    match self.session(ws_stream).await {
                        Ok(()) => info!("Server closed the connection"),
                        Err(e) => warn!("Session ended: {e:#}"),
                    }
                }
                Err(e) => {
                    warn!("Failed to connect to {}: {e}", self.server.url);
                }
            }
            debug!("Reconnecting in {}ms", self.server.reconnect_delay_ms);
            sleep(delay).await;
        }
    }

    /// Runs one connection to completion. Returns Ok when the server closes
    /// cleanly, Err on a transport fault; either way the caller reconnects.
    pub async fn session(
        &mut self,
        mut ws_stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    ) -> Result<()> {
        // Commands are scoped to one connection. Anything queued while
        // disconnected is stale against the server's post-resync state and
        // is dropped, never replayed.
        let mut discarded = 0;
        while self.cmd_rx.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!("Discarded {discarded} commands queued while disconnected");
        }

        loop {
            tokio::select! {
                Some(command) = self.cmd_rx.recv() => {
                    let frame = protocol::encode_command(&command)?;
                    debug!("Sending command: {frame}");
                    ws_stream
                        .send(WsMessage::Text(frame.into()))
                        .await
                        .context("Failed to send command")?;
                }

                message = ws_stream.next() => {
                    match message {
                        Some(Ok(WsMessage::Text(text))) => {
                            // A malformed frame is dropped; prior state stays.
                            if let Err(e) = self.dashboard.handle_frame(&text, self.panel.as_mut()) {
                                warn!("Dropping malformed frame: {e}");
                            }
                        }
                        Some(Ok(WsMessage::Close(_))) | None => return Ok(()),
                        Some(Ok(_)) => {} // ping/pong/binary carry no state
                        Some(Err(e)) => return Err(e).context("WebSocket error"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::panel::TracePanel;
    use tokio::net::TcpListener;
    use tokio_tungstenite::accept_async;

    fn client(config: &AppConfig) -> DashboardClient {
        DashboardClient::new(
            config.server.clone(),
            Dashboard::new(config),
            Box::new(TracePanel),
        )
    }

    #[tokio::test]
    async fn test_session_mirrors_frames_and_sends_commands() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();

            ws.send(WsMessage::Text(
                r#"{"sensors": [{"label": "A", "group": 0}], "values": {"0": 7}}"#.into(),
            ))
            .await
            .unwrap();

            // Wait for the queued client command before closing.
            let echoed = loop {
                match ws.next().await.unwrap().unwrap() {
                    WsMessage::Text(text) => break text.to_string(),
                    _ => continue,
                }
            };
            ws.close(None).await.ok();
            echoed
        });

        let config = AppConfig::default();
        let mut client = client(&config);
        let sender = client.command_sender();

        let (ws_stream, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        let session = tokio::spawn(async move {
            client.session(ws_stream).await.unwrap();
            client
        });

        // Let the session reach its event loop before queueing the command.
        sleep(Duration::from_millis(100)).await;
        sender
            .send(ClientCommand::ChangeThreshold { id: 0, delta: 1 })
            .await
            .unwrap();

        let echoed = server.await.unwrap();
        assert_eq!(echoed, r#"{"changeThreshold":{"id":0,"delta":1}}"#);

        let client = session.await.unwrap();
        let sensors = client.dashboard().store().sensors();
        assert_eq!(sensors.len(), 1);
        assert_eq!(sensors[0].reading.max, 7);
    }

    #[tokio::test]
    async fn test_commands_queued_while_disconnected_are_discarded() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.close(None).await.ok();
            // Collect anything the client sent before the close completed.
            let mut texts = Vec::new();
            while let Some(Ok(message)) = ws.next().await {
                if let WsMessage::Text(text) = message {
                    texts.push(text.to_string());
                }
            }
            texts
        });

        let config = AppConfig::default();
        let mut client = client(&config);

        // Queued with no connection up: must never reach the next session.
        client
            .command_sender()
            .send(ClientCommand::ChangeThreshold { id: 0, delta: 1 })
            .await
            .unwrap();

        let (ws_stream, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        client.session(ws_stream).await.unwrap();

        assert!(server.await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_survives_malformed_frame() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(WsMessage::Text(
                r#"{"sensors": [{"label": "A", "group": 0}]}"#.into(),
            ))
            .await
            .unwrap();
            ws.send(WsMessage::Text("not json".into())).await.unwrap();
            ws.close(None).await.ok();
        });

        let config = AppConfig::default();
        let mut client = client(&config);

        let (ws_stream, _) = connect_async(format!("ws://{addr}")).await.unwrap();
        client.session(ws_stream).await.unwrap();
        server.await.unwrap();

        // The good frame applied, the bad one was dropped.
        assert_eq!(client.dashboard().store().sensors().len(), 1);
    }
}
