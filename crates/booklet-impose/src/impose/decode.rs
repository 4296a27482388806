//! Concurrent decoding of the sources a composition needs

use crate::render::RasterImage;
use crate::source::{SourceKind, SourceStore, SourceUnit};
use crate::types::*;
use lopdf::Document;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

/// A source unit decoded once for the whole composition
#[derive(Debug)]
pub(crate) enum DecodedSource {
    Document(Document),
    Image(RasterImage),
}

/// Decode outcome per source; failures are kept as messages and turned
/// into skipped placements by the assembler.
pub(crate) type DecodedSources = HashMap<SourceId, std::result::Result<DecodedSource, String>>;

/// Decode every source referenced by `pages`, at most `max_concurrent` at a time.
///
/// Sources absent from the store are left out of the result. Only a
/// failure of the worker tasks themselves is returned as an error.
pub(crate) async fn decode_sources(
    pages: &[Page],
    sources: &SourceStore,
    max_concurrent: usize,
) -> Result<DecodedSources> {
    let mut seen = HashSet::new();
    let units: Vec<SourceUnit> = pages
        .iter()
        .filter_map(Page::source_id)
        .filter(|id| seen.insert(*id))
        .filter_map(|id| sources.get(id).cloned())
        .collect();

    log::debug!(
        "Decoding {} sources with up to {} workers",
        units.len(),
        max_concurrent
    );

    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut tasks = JoinSet::new();

    for unit in units {
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire_owned().await;
            let id = unit.id;
            let decoded = tokio::task::spawn_blocking(move || decode_unit(&unit)).await;
            (id, decoded)
        });
    }

    let mut decoded = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        // Only the wrapper task failing is fatal
        let (id, outcome) = joined?;
        decoded.insert(id, settle(id, outcome));
    }

    Ok(decoded)
}

/// Collapse a decode worker's outcome into a per-source result.
///
/// A decoder that panics on hostile bytes fails its source only.
fn settle(
    id: SourceId,
    outcome: std::result::Result<Result<DecodedSource>, JoinError>,
) -> std::result::Result<DecodedSource, String> {
    let message = match outcome {
        Ok(Ok(source)) => return Ok(source),
        Ok(Err(e)) => e.to_string(),
        Err(e) => format!("decoder panicked: {}", e),
    };
    log::warn!("Failed to decode source {}: {}", id, message);
    Err(message)
}

fn decode_unit(unit: &SourceUnit) -> Result<DecodedSource> {
    match unit.kind {
        SourceKind::Document => Ok(DecodedSource::Document(Document::load_mem(&unit.bytes)?)),
        SourceKind::Image => Ok(DecodedSource::Image(RasterImage::decode(&unit.bytes)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_panicking_decoder_fails_only_its_source() {
        let outcome = tokio::task::spawn_blocking(|| -> Result<DecodedSource> {
            panic!("malformed cross-reference table")
        })
        .await;
        assert!(outcome.is_err());

        let settled = settle(SourceId::new(), outcome);
        match settled {
            Err(message) => assert!(message.starts_with("decoder panicked")),
            Ok(_) => panic!("Expected a decode failure"),
        }
    }

    #[test]
    fn test_decode_error_becomes_message() {
        let settled = settle(SourceId::new(), Ok(Err(ImposeError::NoPages)));
        assert_eq!(settled.err(), Some("No pages to impose".to_string()));
    }

    #[tokio::test]
    async fn test_decode_sources_skips_unknown_and_keeps_failures() {
        let mut sources = SourceStore::new();
        let broken = sources.insert(SourceUnit::new(
            SourceKind::Image,
            b"\x89PNG\r\n\x1a\n truncated".to_vec(),
        ));
        let pages = vec![
            Page::image(broken, 10.0, 10.0),
            Page::image(SourceId::new(), 10.0, 10.0),
            Page::filler(),
        ];

        let decoded = decode_sources(&pages, &sources, 2).await.unwrap();
        assert_eq!(decoded.len(), 1);
        assert!(matches!(decoded.get(&broken), Some(Err(_))));
    }
}
