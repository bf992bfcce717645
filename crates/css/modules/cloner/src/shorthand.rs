//! Shorthand tokenization and expansion into longhands.

use crate::normalize::normalize_zero;
use crate::registry::PropertyRegistry;
use css_fluid_model::Declarations;
use log::debug;

/// Split a shorthand value on whitespace outside parentheses.
///
/// `min(1rem, 2vw) 0` yields `["min(1rem, 2vw)", "0"]`. Parentheses stay in the
/// token text and unbalanced closing parentheses never drive the depth below zero.
pub fn tokenize_shorthand(value: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth: usize = 0;
    let mut start: Option<usize> = None;
    for (pos, character) in value.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && character.is_whitespace() => {
                if let Some(token) = start.take().and_then(|token_start| value.get(token_start..pos)) {
                    tokens.push(token);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(pos);
    }
    if let Some(token) = start.and_then(|token_start| value.get(token_start..)) {
        tokens.push(token);
    }
    tokens
}

/// Expand `name: value` into the longhands its expansion table assigns.
///
/// Each token is zero-normalized before it is assigned. A token count without a
/// table entry (including an empty value) yields an empty map.
pub fn expand_shorthand(registry: &PropertyRegistry, name: &str, value: &str) -> Declarations {
    let tokens = tokenize_shorthand(value);
    let mut expanded = Declarations::new();
    let Some(positions) = registry.expansion(name, tokens.len()) else {
        debug!(
            "no expansion for '{name}' with {} tokens: {value:?}",
            tokens.len()
        );
        return expanded;
    };
    for (token, longhands) in tokens.iter().zip(positions) {
        let normalized = normalize_zero(token);
        for longhand in longhands {
            expanded.insert(longhand.clone(), normalized.clone());
        }
    }
    expanded
}
