#![cfg(test)]

use core::error::Error;
use css_fluid_model::{
    ConditionalRuleClone, DocumentClone, RuleBatch, RuleClone, StyleRuleClone, StyleSheetClone,
};
use serde_json::{Value, from_str, json, to_string, to_value};

fn rule(selector: &str, declarations: &[(&str, &str)]) -> StyleRuleClone {
    StyleRuleClone {
        selector_text: selector.to_owned(),
        declarations: declarations
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect(),
    }
}

fn sample_document() -> DocumentClone {
    DocumentClone {
        style_sheets: vec![StyleSheetClone {
            rules: vec![
                RuleClone::Style(rule(".a", &[("padding-top", "0px")])),
                RuleClone::Conditional(ConditionalRuleClone {
                    min_width: 600,
                    children: vec![rule(".a", &[("padding-top", "2rem")])],
                }),
                RuleClone::Conditional(ConditionalRuleClone {
                    min_width: 375,
                    children: Vec::new(),
                }),
            ],
        }],
    }
}

#[test]
fn rules_are_tagged_by_kind_with_camel_case_fields() -> Result<(), Box<dyn Error>> {
    let value = to_value(sample_document())?;
    let rules = &value["styleSheets"][0]["rules"];
    assert_eq!(
        rules[0],
        json!({
            "kind": "style",
            "selectorText": ".a",
            "declarations": { "padding-top": "0px" }
        })
    );
    assert_eq!(rules[1]["kind"], Value::from("conditional"));
    assert_eq!(rules[1]["minWidth"], Value::from(600));
    assert_eq!(rules[2]["children"], json!([]));
    Ok(())
}

#[test]
fn document_round_trips_through_json() -> Result<(), Box<dyn Error>> {
    let document = sample_document();
    let text = to_string(&document)?;
    let back: DocumentClone = from_str(&text)?;
    assert_eq!(back, document);
    Ok(())
}

#[test]
fn batch_flag_serializes_as_is_media_query() -> Result<(), Box<dyn Error>> {
    let batch = RuleBatch {
        rules: vec![rule("p", &[("font-size", "1rem")])],
        width: 375,
        is_media_query: false,
    };
    let value = to_value(&batch)?;
    assert_eq!(value["isMediaQuery"], Value::from(false));
    assert_eq!(value["width"], Value::from(375));
    Ok(())
}

#[test]
fn baseline_indicator_is_a_childless_conditional() {
    let document = sample_document();
    let conditionals: Vec<bool> = document.style_sheets[0]
        .rules
        .iter()
        .filter_map(RuleClone::as_conditional)
        .map(ConditionalRuleClone::is_baseline_indicator)
        .collect();
    assert_eq!(conditionals, [false, true]);
}
