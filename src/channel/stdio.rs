//! Newline-delimited JSON transport.
//!
//! Connects the in-process [`BroadcastChannel`] to an interceptor living in
//! another process: inbound messages arrive one JSON object per line, and
//! replies plus `setInstrumentedURLs` updates leave the same way.

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::channel::bus::BroadcastChannel;
use crate::channel::protocol::{ChannelError, ChannelMessage};
use crate::instrumentation::{InstrumentationRegistry, InstrumentedUrls, SyncError};
use crate::lifecycle::ShutdownListener;

/// Messages for the interceptor's administrative API.
#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum AdminMessage {
    #[serde(rename = "setInstrumentedURLs")]
    SetInstrumentedUrls(InstrumentedUrls),
}

/// Cloneable handle that queues lines for a single writer task.
#[derive(Debug, Clone)]
pub struct LineWriter {
    tx: mpsc::UnboundedSender<String>,
}

impl LineWriter {
    /// Spawn a task that writes queued lines to `writer`, flushing each one.
    pub fn spawn<W>(mut writer: W) -> (Self, JoinHandle<std::io::Result<()>>)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                writer.write_all(line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok(())
        });
        (Self { tx }, handle)
    }

    pub fn send(&self, line: String) -> Result<(), ChannelError> {
        self.tx.send(line).map_err(|_| ChannelError::Closed)
    }
}

/// Registry that writes `setInstrumentedURLs` messages to the output stream.
#[derive(Debug, Clone)]
pub struct LineRegistry {
    writer: LineWriter,
}

impl LineRegistry {
    pub fn new(writer: LineWriter) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl InstrumentationRegistry for LineRegistry {
    async fn set_instrumented_urls(&self, update: InstrumentedUrls) -> Result<String, SyncError> {
        let line = serde_json::to_string(&AdminMessage::SetInstrumentedUrls(update))
            .map_err(|e| SyncError::Rejected(e.to_string()))?;
        self.writer
            .send(line)
            .map_err(|e| SyncError::Unavailable(e.to_string()))?;
        Ok("written".to_string())
    }
}

/// Post every well-formed inbound line to the channel until EOF or shutdown.
pub async fn pump_inbound<R>(
    reader: R,
    channel: BroadcastChannel,
    mut shutdown: ShutdownListener,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = shutdown.wait() => return Ok(()),
        };
        let Some(line) = line else {
            tracing::info!("Inbound stream closed");
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }
        match ChannelMessage::from_json(&line) {
            Ok(message) => {
                channel.post(message);
            }
            Err(e) => tracing::warn!(error = %e, "Skipping malformed inbound line"),
        }
    }
}

/// Forward replies posted on the channel to the output stream.
pub fn spawn_outbound(
    channel: &BroadcastChannel,
    writer: LineWriter,
    mut shutdown: ShutdownListener,
) -> JoinHandle<()> {
    let mut rx = channel.subscribe();
    tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                received = rx.recv() => received,
                _ = shutdown.wait() => break,
            };
            match message {
                Ok(message @ ChannelMessage::RequestResponse(_)) => {
                    let sent = message.to_json().and_then(|line| writer.send(line));
                    if let Err(e) = sent {
                        tracing::error!(error = %e, "Failed to forward reply");
                    }
                }
                Ok(ChannelMessage::GetInstrumentedContent(_)) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Outbound pump lagged behind channel");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
