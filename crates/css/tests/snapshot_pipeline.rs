#![cfg(test)]
#![allow(
    clippy::missing_errors_doc,
    reason = "Test helpers return Result for clear propagation"
)]

use anyhow::Result;
use css::batcher::BatchTrace;
use css::cloner::ExtractTrace;
use css::{PipelineConfig, Snapshot, TextDocument, snapshot, snapshot_observed};
use serde_json::{Value, from_str, json, to_value};

const BASE: &str = r"
    @media (min-width: 375px) {}
    .hero { padding: 0 2rem; font-size: 1.5rem; color: red }
    @media (min-width: 768px) { .hero { padding: 1rem 4rem; font-size: 2.5rem } }
    .footer { margin-top: 0 }
";

const WIDE: &str = r"
    @media (min-width: 1200px) { .hero { font-size: 3rem } }
    @media print { .hero { display: none } }
";

#[test]
fn snapshot_batches_each_sheet_by_width() -> Result<()> {
    let source = TextDocument::from_css([BASE, WIDE]);
    let result = snapshot(&source, &PipelineConfig::default())?;

    assert_eq!(result.document.style_sheets.len(), 2);
    assert_eq!(result.batches.parse_result.breakpoints, [375, 768, 1200]);
    assert_eq!(result.batches.global_baseline_width, 375);

    let first: Vec<(u32, bool, usize)> = result.batches.style_sheets[0]
        .batches
        .iter()
        .map(|batch| (batch.width, batch.is_media_query, batch.rules.len()))
        .collect();
    assert_eq!(first, [(375, false, 1), (768, true, 1), (375, false, 1)]);

    let hero = &result.batches.style_sheets[0].batches[0].rules[0];
    assert_eq!(hero.selector_text, ".hero");
    assert_eq!(
        hero.declarations.get("padding-left").map(String::as_str),
        Some("2rem")
    );
    assert_eq!(
        hero.declarations.get("padding-top").map(String::as_str),
        Some("0px")
    );
    assert!(!hero.declarations.contains_key("color"));

    let second = &result.batches.style_sheets[1];
    assert_eq!(second.baseline_width, 375);
    assert_eq!(second.batches.len(), 1);
    assert_eq!(second.batches[0].width, 1200);
    Ok(())
}

#[test]
fn snapshot_serializes_with_camel_case_keys() -> Result<()> {
    let source = TextDocument::from_css([".a { width: 0 }"]);
    let value = to_value(snapshot(&source, &PipelineConfig::default())?)?;
    assert_eq!(
        value,
        json!({
            "document": {
                "styleSheets": [{
                    "rules": [{
                        "kind": "style",
                        "selectorText": ".a",
                        "declarations": { "width": "0px" }
                    }]
                }]
            },
            "batches": {
                "parseResult": { "breakpoints": [] },
                "globalBaselineWidth": 375,
                "styleSheets": [{
                    "baselineWidth": 375,
                    "batches": [{
                        "rules": [{
                            "selectorText": ".a",
                            "declarations": { "width": "0px" }
                        }],
                        "width": 375,
                        "isMediaQuery": false
                    }]
                }]
            }
        })
    );
    let restored: Snapshot = from_str(&value.to_string())?;
    assert_eq!(restored.batches.global_baseline_width, 375);
    Ok(())
}

#[test]
fn configured_baseline_applies_without_indicators() -> Result<()> {
    let source = TextDocument::from_css([".a { width: 1px }"]);
    let config = PipelineConfig::default().with_baseline_width(320);
    let result = snapshot(&source, &config)?;
    assert_eq!(result.batches.global_baseline_width, 320);
    assert_eq!(result.batches.style_sheets[0].batches[0].width, 320);
    Ok(())
}

#[test]
fn unavailable_sheets_are_skipped_in_both_stages() -> Result<()> {
    let mut source = TextDocument::from_css([BASE]);
    source.push_unavailable("https://cdn.example/remote.css", "cross-origin");
    let mut extract_trace = ExtractTrace::new();
    let mut batch_trace = BatchTrace::new();
    let result = snapshot_observed(
        &source,
        &PipelineConfig::default(),
        &mut extract_trace,
        &mut batch_trace,
    )?;

    assert_eq!(result.document.style_sheets.len(), 1);
    assert_eq!(result.batches.style_sheets.len(), 1);
    assert_eq!(extract_trace.style_rules().count(), 3);
    assert!(!batch_trace.events().is_empty());
    Ok(())
}

#[test]
fn empty_source_has_an_empty_snapshot() -> Result<()> {
    let result = snapshot(&TextDocument::new(), &PipelineConfig::default())?;
    let value: Value = to_value(&result)?;
    assert_eq!(value["document"]["styleSheets"], json!([]));
    assert_eq!(value["batches"]["globalBaselineWidth"], json!(375));
    Ok(())
}
