//! Streamed body relay.
//!
//! # Responsibilities
//! - Re-chunk the origin byte stream into fixed-size chunks
//! - Skip zero-length transport chunks without ending the stream
//! - Preserve byte order and total content exactly
//!
//! # Design Decisions
//! - Pull-based: nothing is read from the origin until the caller polls,
//!   so a disconnected caller stops the relay and dropping the stream
//!   releases the upstream connection
//! - Single pass, no replay

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

/// Size of the chunks handed to the caller. The final chunk may be shorter.
pub const RELAY_CHUNK_SIZE: usize = 8192;

/// Adapt an origin byte stream into a fixed-size chunked relay stream.
pub fn chunked<S, E>(upstream: S) -> impl Stream<Item = Result<Bytes, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    futures_util::stream::try_unfold(
        (upstream, BytesMut::new(), false),
        |(mut upstream, mut buffer, mut exhausted)| async move {
            loop {
                if buffer.len() >= RELAY_CHUNK_SIZE {
                    let chunk = buffer.split_to(RELAY_CHUNK_SIZE).freeze();
                    return Ok(Some((chunk, (upstream, buffer, exhausted))));
                }
                if exhausted {
                    if buffer.is_empty() {
                        return Ok(None);
                    }
                    let chunk = buffer.split().freeze();
                    return Ok(Some((chunk, (upstream, buffer, exhausted))));
                }
                match upstream.next().await {
                    Some(Ok(bytes)) => {
                        if !bytes.is_empty() {
                            buffer.extend_from_slice(&bytes);
                        }
                    }
                    Some(Err(e)) => return Err(e),
                    None => exhausted = true,
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    type NeverError = std::convert::Infallible;

    async fn collect(chunks: Vec<Bytes>) -> Vec<Bytes> {
        let upstream = stream::iter(chunks.into_iter().map(Ok::<_, NeverError>));
        chunked(upstream)
            .map(|c| c.unwrap())
            .collect::<Vec<_>>()
            .await
    }

    #[tokio::test]
    async fn test_rechunks_to_fixed_size() {
        let body: Vec<u8> = (0..(RELAY_CHUNK_SIZE * 2 + 10))
            .map(|i| (i % 251) as u8)
            .collect();
        let input: Vec<Bytes> = body.chunks(1000).map(Bytes::copy_from_slice).collect();

        let out = collect(input).await;

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].len(), RELAY_CHUNK_SIZE);
        assert_eq!(out[1].len(), RELAY_CHUNK_SIZE);
        assert_eq!(out[2].len(), 10);

        let reassembled: Vec<u8> = out.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(reassembled, body);
    }

    #[tokio::test]
    async fn test_empty_chunks_skipped() {
        let input = vec![
            Bytes::from_static(b"hello"),
            Bytes::new(),
            Bytes::from_static(b" world"),
            Bytes::new(),
        ];
        let out = collect(input).await;

        assert_eq!(out.len(), 1);
        assert_eq!(&out[0][..], b"hello world");
    }

    #[tokio::test]
    async fn test_empty_body_yields_nothing() {
        let out = collect(vec![]).await;
        assert!(out.is_empty());

        let out = collect(vec![Bytes::new(), Bytes::new()]).await;
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_exact_multiple_has_no_trailing_chunk() {
        let body = vec![7u8; RELAY_CHUNK_SIZE * 2];
        let out = collect(vec![Bytes::from(body.clone())]).await;

        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|c| c.len() == RELAY_CHUNK_SIZE));
        let reassembled: Vec<u8> = out.iter().flat_map(|c| c.iter().copied()).collect();
        assert_eq!(reassembled, body);
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let input = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err("connection reset"),
        ]);
        let mut relay = Box::pin(chunked(input));

        // The buffered bytes are flushed only on clean termination; the
        // error surfaces as soon as the upstream yields it.
        let first = relay.next().await.unwrap();
        assert_eq!(first.unwrap_err(), "connection reset");
    }
}
