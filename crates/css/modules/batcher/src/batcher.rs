//! Document initialization pass and the per-stylesheet batching scan.

use crate::BatcherConfig;
use crate::observer::{BatchObserver, NoopObserver};
use crate::state::BatchState;
use css_fluid_model::{
    BatchedDocument, ConditionalRuleClone, DocumentBaseline, DocumentClone, ParseResult,
    RuleBatch, RuleClone, StyleRuleClone, StyleSheetBatches, StyleSheetClone,
};
use log::{debug, trace};

/// Baseline width of one stylesheet: the width of its last baseline-indicator rule,
/// or `fallback` when it has none.
pub fn style_sheet_baseline(rules: &[RuleClone], fallback: u32) -> u32 {
    rules
        .iter()
        .rev()
        .filter_map(RuleClone::as_conditional)
        .find(|rule| rule.is_baseline_indicator())
        .map_or(fallback, |rule| rule.min_width)
}

/// Turns clone trees into rule batches, reporting every step to `O`.
pub struct Batcher<O = NoopObserver> {
    config: BatcherConfig,
    observer: O,
}

impl Batcher<NoopObserver> {
    /// Create a batcher that reports to nobody.
    pub const fn new(config: BatcherConfig) -> Self {
        Self {
            config,
            observer: NoopObserver,
        }
    }
}

impl<O: BatchObserver> Batcher<O> {
    /// Create a batcher reporting every step to `observer`.
    pub const fn with_observer(config: BatcherConfig, observer: O) -> Self {
        Self { config, observer }
    }

    /// Borrow the observer.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Give back the observer, e.g. to read a trace.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Batch every stylesheet of `document`.
    pub fn parse_document(&mut self, document: &DocumentClone) -> BatchedDocument {
        let DocumentBaseline {
            breakpoints,
            global_baseline_width,
        } = self.compute_document_baseline(&document.style_sheets);
        let style_sheets = document
            .style_sheets
            .iter()
            .map(|sheet| {
                let baseline_width = style_sheet_baseline(&sheet.rules, global_baseline_width);
                StyleSheetBatches {
                    baseline_width,
                    batches: self.batch_style_sheet(&sheet.rules, global_baseline_width),
                }
            })
            .collect();
        let batched = BatchedDocument {
            parse_result: ParseResult { breakpoints },
            global_baseline_width,
            style_sheets,
        };
        self.observer.document(&batched);
        batched
    }

    /// Collect distinct conditional widths in first-encounter order and find the
    /// document baseline: the last baseline indicator anywhere, else the default.
    pub fn compute_document_baseline(&mut self, style_sheets: &[StyleSheetClone]) -> DocumentBaseline {
        let mut breakpoints = Vec::new();
        let mut global_baseline_width = self.config.default_baseline_width;
        for rule in style_sheets
            .iter()
            .flat_map(|sheet| &sheet.rules)
            .filter_map(RuleClone::as_conditional)
        {
            if !breakpoints.contains(&rule.min_width) {
                breakpoints.push(rule.min_width);
            }
            if rule.is_baseline_indicator() {
                global_baseline_width = rule.min_width;
            }
        }
        debug!("breakpoints {breakpoints:?}, global baseline {global_baseline_width}px");
        let baseline = DocumentBaseline {
            breakpoints,
            global_baseline_width,
        };
        self.observer.document_baseline(&baseline);
        baseline
    }

    /// Partition one stylesheet's rules into batches in a single left-to-right scan.
    ///
    /// Consecutive un-conditioned rules share a baseline batch; a conditional rule
    /// with children closes it and appends its own batch, so later un-conditioned
    /// rules start a fresh baseline batch. Baseline indicators are skipped.
    pub fn batch_style_sheet(&mut self, rules: &[RuleClone], fallback_baseline_width: u32) -> Vec<RuleBatch> {
        let baseline_width = style_sheet_baseline(rules, fallback_baseline_width);
        let mut state = BatchState::new();
        for rule in rules {
            self.batch_rule(&mut state, rule, baseline_width);
        }
        let batches = state.into_batches();
        self.observer.style_sheet_batches(&batches);
        batches
    }

    /// Apply one rule to the scan state.
    pub fn batch_rule(&mut self, state: &mut BatchState, rule: &RuleClone, baseline_width: u32) {
        match rule {
            RuleClone::Style(style_rule) => self.batch_style_rule(state, style_rule, baseline_width),
            RuleClone::Conditional(conditional) => self.batch_conditional_rule(state, conditional),
        }
    }

    /// Add an un-conditioned rule to the open baseline batch, opening one if needed.
    pub fn batch_style_rule(&mut self, state: &mut BatchState, rule: &StyleRuleClone, baseline_width: u32) {
        state.open_baseline(baseline_width).rules.push(rule.clone());
        self.observer.style_rule(state);
    }

    /// Close the open batch and append the conditional rule's own batch.
    ///
    /// Baseline indicators leave the state untouched.
    pub fn batch_conditional_rule(&mut self, state: &mut BatchState, rule: &ConditionalRuleClone) {
        if rule.is_baseline_indicator() {
            trace!("baseline indicator at {}px does not affect batching", rule.min_width);
        } else {
            trace!("closing batch for (min-width: {}px)", rule.min_width);
            state.push_closed(RuleBatch {
                rules: rule.children.clone(),
                width: rule.min_width,
                is_media_query: true,
            });
        }
        self.observer.conditional_rule(state);
    }
}
