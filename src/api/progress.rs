//! Byte-level upload progress reporting.
//!
//! An upload body is streamed in chunks; after each chunk is handed to the
//! transport the percentage of bytes sent so far is published on a
//! `tokio::sync::watch` channel. The UI forwards watch updates into its
//! event loop and renders them as a 0-100 gauge.

use async_stream::stream;
use futures::Stream;
use tokio::sync::watch;

/// Chunk size for streamed upload bodies.
const CHUNK_SIZE: usize = 64 * 1024;

/// Wrap `bytes` in a stream that publishes progress on `tx` as it is drained.
///
/// The published value is always within 0..=100 and reaches exactly 100 once
/// the final chunk has been yielded. An empty body reports 100 immediately.
pub fn progress_body(
    bytes: Vec<u8>,
    tx: watch::Sender<u8>,
) -> impl Stream<Item = std::result::Result<Vec<u8>, std::io::Error>> {
    stream! {
        let total = bytes.len();
        if total == 0 {
            let _ = tx.send(100);
            return;
        }

        let mut sent = 0usize;
        for chunk in bytes.chunks(CHUNK_SIZE) {
            sent += chunk.len();
            yield Ok(chunk.to_vec());
            let percent = ((sent as f64 / total as f64) * 100.0).floor() as u8;
            let _ = tx.send(percent.min(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn progress_reaches_one_hundred() {
        let payload = vec![7u8; CHUNK_SIZE * 2 + 17];
        let (tx, rx) = watch::channel(0u8);

        let chunks: Vec<_> = progress_body(payload.clone(), tx).collect().await;
        let reassembled: Vec<u8> = chunks
            .into_iter()
            .flat_map(|c| c.unwrap())
            .collect();

        assert_eq!(reassembled, payload);
        assert_eq!(*rx.borrow(), 100);
    }

    #[tokio::test]
    async fn progress_is_monotonic_and_bounded() {
        let payload = vec![0u8; CHUNK_SIZE * 5];
        let (tx, rx) = watch::channel(0u8);

        let mut seen = vec![*rx.borrow()];
        let mut stream = std::pin::pin!(progress_body(payload, tx));
        while stream.next().await.is_some() {
            seen.push(*rx.borrow());
        }

        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen.iter().all(|p| *p <= 100));
    }

    #[tokio::test]
    async fn empty_body_reports_complete() {
        let (tx, rx) = watch::channel(0u8);
        let chunks: Vec<_> = progress_body(Vec::new(), tx).collect().await;
        assert!(chunks.is_empty());
        assert_eq!(*rx.borrow(), 100);
    }
}
