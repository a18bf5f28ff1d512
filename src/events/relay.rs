use super::{EventError, ServerEvent, SseDecoder};
use futures::StreamExt;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::{Client, Url};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Connection state of the push channel, as seen by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportStatus {
    Connecting,
    Connected,
    Disconnected(String),
}

enum StreamEnd {
    Closed,
    ReceiverGone,
}

/// Single long-lived subscription to the server's `/events` stream.
///
/// Every decoded event is forwarded, in receipt order, into the app channel.
/// When the stream drops the relay waits (server `retry:` or the configured
/// delay), reconnects with `Last-Event-ID` and keeps forwarding.
pub struct EventRelay {
    client: Client,
    url: Url,
    reconnect_delay: Duration,
}

impl EventRelay {
    pub fn new(client: Client, url: Url, reconnect_delay: Duration) -> Self {
        Self {
            client,
            url,
            reconnect_delay,
        }
    }

    /// Runs until the receiving side of `tx` is dropped.
    pub async fn run<T>(self, tx: mpsc::Sender<T>)
    where
        T: From<ServerEvent> + From<TransportStatus> + Send,
    {
        let mut decoder = SseDecoder::new();
        loop {
            if tx.send(TransportStatus::Connecting.into()).await.is_err() {
                return;
            }

            let reason = match self.stream_once(&mut decoder, &tx).await {
                Ok(StreamEnd::ReceiverGone) => return,
                Ok(StreamEnd::Closed) => "stream closed by server".to_string(),
                Err(e) => e.to_string(),
            };
            warn!(url = %self.url, "event stream lost: {reason}");

            if tx.send(TransportStatus::Disconnected(reason).into()).await.is_err() {
                return;
            }

            decoder.reset_block();
            let delay = decoder.retry().unwrap_or(self.reconnect_delay);
            tokio::time::sleep(delay).await;
        }
    }

    async fn stream_once<T>(
        &self,
        decoder: &mut SseDecoder,
        tx: &mpsc::Sender<T>,
    ) -> Result<StreamEnd, reqwest::Error>
    where
        T: From<ServerEvent> + From<TransportStatus> + Send,
    {
        let mut request = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "text/event-stream")
            .header(CACHE_CONTROL, "no-cache");
        if let Some(id) = decoder.last_event_id() {
            request = request.header("Last-Event-ID", id);
        }

        let response = request.send().await?.error_for_status()?;
        info!(url = %self.url, "event stream connected");
        if tx.send(TransportStatus::Connected.into()).await.is_err() {
            return Ok(StreamEnd::ReceiverGone);
        }

        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            for event in decode_chunk(decoder, &chunk) {
                if tx.send(event.into()).await.is_err() {
                    return Ok(StreamEnd::ReceiverGone);
                }
            }
        }
        Ok(StreamEnd::Closed)
    }
}

/// Feed one body chunk and return the events it completed, in order.
/// Unknown names and malformed payloads are logged and dropped.
pub fn decode_chunk(decoder: &mut SseDecoder, chunk: &[u8]) -> Vec<ServerEvent> {
    decoder
        .feed(chunk)
        .into_iter()
        .filter_map(|frame| match ServerEvent::decode(&frame.event, &frame.data) {
            Ok(event) => {
                debug!(event = %event.kind(), id = ?frame.id, "server event");
                Some(event)
            }
            Err(EventError::UnknownEvent(name)) => {
                debug!("ignoring unsubscribed event `{name}`");
                None
            }
            Err(e) => {
                warn!("dropping server event: {e}");
                None
            }
        })
        .collect()
}
