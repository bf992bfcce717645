//! Zero and selector normalization.
//!
//! Browsers serialize unitless zero inconsistently (`0`, `0px`, `0.0`), which would
//! make otherwise identical snapshots differ. Every bare numeric zero is rewritten
//! to `0px`; selector lists are reduced to a canonical spacing.

/// Characters that make up a numeric run.
const fn is_number_char(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

/// Characters that continue an identifier (the `\w` class plus `-`).
const fn is_ident_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_' || character == '-'
}

/// Whether `run` spells zero: `0+` optionally followed by `.0+`.
fn is_zero_literal(run: &str) -> bool {
    let all_zeros = |part: &str| !part.is_empty() && part.bytes().all(|byte| byte == b'0');
    match run.split_once('.') {
        Some((whole, fraction)) => all_zeros(whole) && all_zeros(fraction),
        None => all_zeros(run),
    }
}

/// Whether a numeric run starting right after `before` is part of a larger token
/// (`#000`, `h1`, `--space-0`) rather than a standalone number.
fn continues_token(before: &[char]) -> bool {
    match before {
        [.., previous, '-'] => is_ident_char(*previous),
        [.., last] => last.is_ascii_alphabetic() || matches!(*last, '_' | '#'),
        [] => false,
    }
}

/// Whether the number is immediately followed by a unit (`px`, `rem`, `%`, `fr`, ...).
fn has_unit(after: &[char]) -> bool {
    after
        .first()
        .is_some_and(|next| next.is_ascii_alphabetic() || matches!(*next, '%' | '_'))
}

/// Rewrite every standalone unitless zero in `input` to `0px`.
///
/// A zero is any run of digits and dots matching `0+(\.0+)?`. Runs that already
/// carry a unit, or that belong to a larger token such as a hex color or an
/// identifier, are left alone. Function nesting is irrelevant:
/// `min(2rem, 0)` becomes `min(2rem, 0px)`.
pub fn normalize_zero(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);
    let mut index = 0;
    while let Some(&current) = chars.get(index) {
        if !is_number_char(current) {
            out.push(current);
            index += 1;
            continue;
        }
        let start = index;
        while chars.get(index).copied().is_some_and(is_number_char) {
            index += 1;
        }
        let run: String = chars.get(start..index).unwrap_or_default().iter().collect();
        let before = chars.get(..start).unwrap_or_default();
        let after = chars.get(index..).unwrap_or_default();
        if is_zero_literal(&run) && !continues_token(before) && !has_unit(after) {
            out.push_str("0px");
        } else {
            out.push_str(&run);
        }
    }
    out
}

/// Rewrite `*::before` / `*::after` to `::before` / `::after`.
fn strip_universal_pseudo(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut rest = selector;
    while let Some(pos) = rest.find("*::") {
        let (head, tail) = rest.split_at(pos);
        out.push_str(head);
        let pseudo = tail.get(3..).unwrap_or_default();
        let stripped = ["before", "after"].into_iter().find(|name| {
            pseudo.strip_prefix(name).is_some_and(|after| {
                !after
                    .chars()
                    .next()
                    .is_some_and(|next| next.is_ascii_alphanumeric() || next == '_')
            })
        });
        if stripped.is_some() {
            out.push_str("::");
            rest = pseudo;
        } else {
            out.push('*');
            rest = tail.get(1..).unwrap_or_default();
        }
    }
    out.push_str(rest);
    out
}

/// Canonicalize a selector list.
///
/// `*::before` and `*::after` lose the universal selector, every comma is written as
/// `", "`, other whitespace runs collapse to one space, and the ends are trimmed.
pub fn normalize_selector(selector: &str) -> String {
    let stripped = strip_universal_pseudo(selector);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_space = false;
    let mut after_comma = false;
    for character in stripped.chars() {
        if character.is_whitespace() {
            pending_space = !after_comma;
            continue;
        }
        if character == ',' {
            out.push_str(", ");
            pending_space = false;
            after_comma = true;
            continue;
        }
        if pending_space {
            out.push(' ');
        }
        out.push(character);
        pending_space = false;
        after_comma = false;
    }
    out.trim().to_owned()
}
