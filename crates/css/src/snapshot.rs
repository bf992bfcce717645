//! One pass over a style source: extraction followed by batching.

use crate::config::PipelineConfig;
use anyhow::Result;
use css_batcher::{BatchObserver, Batcher, NoopObserver as NoopBatchObserver};
use css_cloner::{Cloner, ExtractObserver, NoopObserver as NoopExtractObserver, StyleSource};
use css_fluid_model::{BatchedDocument, DocumentClone};
use log::debug;
use serde::{Deserialize, Serialize};

/// Clone tree of a style source together with its batches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub document: DocumentClone,
    pub batches: BatchedDocument,
}

/// Extract `source` and batch the result.
///
/// # Errors
/// Returns an error only when a source rule contradicts its own kind.
pub fn snapshot<S: StyleSource>(source: &S, config: &PipelineConfig) -> Result<Snapshot> {
    snapshot_observed(source, config, NoopExtractObserver, NoopBatchObserver)
}

/// Like [`snapshot`], reporting every step to the given observers.
///
/// Pass `&mut` observers to inspect them afterwards.
///
/// # Errors
/// Returns an error only when a source rule contradicts its own kind.
pub fn snapshot_observed<S, E, B>(
    source: &S,
    config: &PipelineConfig,
    extract_observer: E,
    batch_observer: B,
) -> Result<Snapshot>
where
    S: StyleSource,
    E: ExtractObserver,
    B: BatchObserver,
{
    let document =
        Cloner::with_observer(&config.registry, extract_observer).extract_document(source)?;
    let batches =
        Batcher::with_observer(config.batcher, batch_observer).parse_document(&document);
    debug!(
        "snapshot: {} stylesheets, breakpoints {:?}",
        document.style_sheets.len(),
        batches.parse_result.breakpoints
    );
    Ok(Snapshot { document, batches })
}
