//! WebSocket ingestion: stream feed lines from a network source.

use futures_util::StreamExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::domain::SubjectStore;
use crate::VitalError;

use super::parser::parse_line;
use super::IngestStats;

/// Connects to a WebSocket feed and appends each received record to a
/// store until the server closes the connection.
pub struct WebSocketReader {
    url: String,
}

impl WebSocketReader {
    /// Create a reader for the given `ws://` or `wss://` URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Connect and ingest until the stream ends.
    ///
    /// Each text message is one feed line. Malformed messages are
    /// logged and discarded; the connection stays up. Returns the
    /// ingest counts once the server closes, or the transport error
    /// that ended the connection.
    pub async fn run(&self, store: &SubjectStore) -> Result<IngestStats, VitalError> {
        let (mut stream, _response) = connect_async(&self.url).await?;
        tracing::info!(url = %self.url, "connected to feed");

        let mut stats = IngestStats::default();
        while let Some(message) = stream.next().await {
            match message? {
                Message::Text(text) => match parse_line(&text) {
                    Ok(record) => {
                        store.append(record);
                        stats.accepted += 1;
                    }
                    Err(error) => {
                        tracing::warn!(%error, "discarding malformed message");
                        stats.rejected += 1;
                    }
                },
                Message::Close(_) => break,
                // Pings are answered by the library; other frames carry
                // no records.
                _ => {}
            }
        }

        tracing::info!(
            url = %self.url,
            accepted = stats.accepted,
            rejected = stats.rejected,
            "feed disconnected"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubjectId;
    use futures_util::SinkExt;
    use tokio::net::TcpListener;

    async fn serve_once(messages: Vec<&'static str>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
            for message in messages {
                ws.send(Message::Text(message.into())).await.unwrap();
            }
            ws.close(None).await.unwrap();
        });
        format!("ws://{addr}")
    }

    #[tokio::test]
    async fn ingests_messages_until_close() {
        let url = serve_once(vec![
            "1,1000,Saturation,95.0%",
            "garbage",
            "1,2000,Saturation,89.0%",
        ])
        .await;

        let store = SubjectStore::new();
        let stats = WebSocketReader::new(url).run(&store).await.unwrap();

        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(store.full_window(SubjectId::new(1)).len(), 2);
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let store = SubjectStore::new();
        let result = WebSocketReader::new("ws://127.0.0.1:1/feed")
            .run(&store)
            .await;
        assert!(result.is_err());
    }
}
