//! Accumulator threaded through one stylesheet scan.

use css_fluid_model::RuleBatch;

/// Batches produced so far plus the batch un-conditioned rules currently join.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchState {
    /// Index into `batches` of the open baseline batch.
    current: Option<usize>,
    batches: Vec<RuleBatch>,
}

impl BatchState {
    /// Start a scan with no batches.
    pub fn new() -> Self {
        Self::default()
    }

    /// The open baseline batch, if any.
    pub fn current(&self) -> Option<&RuleBatch> {
        self.current.and_then(|index| self.batches.get(index))
    }

    /// Batches in the order they were opened.
    pub fn batches(&self) -> &[RuleBatch] {
        &self.batches
    }

    /// Finish the scan.
    pub fn into_batches(self) -> Vec<RuleBatch> {
        self.batches
    }

    /// The open baseline batch, opening a new one at `width` if none is open.
    pub(crate) fn open_baseline(&mut self, width: u32) -> &mut RuleBatch {
        let index = self.current.unwrap_or_else(|| {
            self.batches.push(RuleBatch {
                rules: Vec::new(),
                width,
                is_media_query: false,
            });
            let opened = self.batches.len() - 1;
            self.current = Some(opened);
            opened
        });
        &mut self.batches[index]
    }

    /// Close the open batch and append a finished one.
    pub(crate) fn push_closed(&mut self, batch: RuleBatch) {
        self.current = None;
        self.batches.push(batch);
    }
}
