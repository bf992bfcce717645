//! Hooks into each batching step.

use crate::state::BatchState;
use css_fluid_model::{BatchedDocument, DocumentBaseline, RuleBatch};

/// Receives the result of every traced batching operation.
pub trait BatchObserver {
    /// The document initialization pass finished.
    fn document_baseline(&mut self, _baseline: &DocumentBaseline) {}

    /// One stylesheet was batched.
    fn style_sheet_batches(&mut self, _batches: &[RuleBatch]) {}

    /// A style rule joined the open baseline batch.
    fn style_rule(&mut self, _state: &BatchState) {}

    /// A conditional rule was processed (possibly ignored as a baseline indicator).
    fn conditional_rule(&mut self, _state: &BatchState) {}

    /// A whole document was batched.
    fn document(&mut self, _document: &BatchedDocument) {}
}

impl<O: BatchObserver + ?Sized> BatchObserver for &mut O {
    fn document_baseline(&mut self, baseline: &DocumentBaseline) {
        (**self).document_baseline(baseline);
    }

    fn style_sheet_batches(&mut self, batches: &[RuleBatch]) {
        (**self).style_sheet_batches(batches);
    }

    fn style_rule(&mut self, state: &BatchState) {
        (**self).style_rule(state);
    }

    fn conditional_rule(&mut self, state: &BatchState) {
        (**self).conditional_rule(state);
    }

    fn document(&mut self, document: &BatchedDocument) {
        (**self).document(document);
    }
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl BatchObserver for NoopObserver {}

/// One recorded batching result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchEvent {
    DocumentBaseline(DocumentBaseline),
    StyleSheetBatches(Vec<RuleBatch>),
    StyleRule(BatchState),
    ConditionalRule(BatchState),
    Document(BatchedDocument),
}

/// Sink recording every batching result of one run, in the order produced.
#[derive(Clone, Debug, Default)]
pub struct BatchTrace {
    events: Vec<BatchEvent>,
}

impl BatchTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in order.
    pub fn events(&self) -> &[BatchEvent] {
        &self.events
    }

    /// Take the recorded events.
    pub fn into_events(self) -> Vec<BatchEvent> {
        self.events
    }
}

impl BatchObserver for BatchTrace {
    fn document_baseline(&mut self, baseline: &DocumentBaseline) {
        self.events.push(BatchEvent::DocumentBaseline(baseline.clone()));
    }

    fn style_sheet_batches(&mut self, batches: &[RuleBatch]) {
        self.events.push(BatchEvent::StyleSheetBatches(batches.to_vec()));
    }

    fn style_rule(&mut self, state: &BatchState) {
        self.events.push(BatchEvent::StyleRule(state.clone()));
    }

    fn conditional_rule(&mut self, state: &BatchState) {
        self.events.push(BatchEvent::ConditionalRule(state.clone()));
    }

    fn document(&mut self, document: &BatchedDocument) {
        self.events.push(BatchEvent::Document(document.clone()));
    }
}
