//! Fluid property allowlist and shorthand expansion tables.
//!
//! The allowlist and the tables are data: `FluidProperties` is what gets written to
//! and read from JSON, `PropertyRegistry` is the validated, indexed form the cloner
//! works with.

use anyhow::{Context as _, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::from_str;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Version of the built-in registry.
pub const BUILTIN_VERSION: u32 = 1;

/// Largest token count a shorthand table may describe.
const MAX_SHORTHAND_TOKENS: usize = 4;

/// Expansion table of one shorthand.
///
/// Keyed by token count. Each entry lists, per token position, the longhands that
/// receive that token's value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShorthandTable {
    pub expansions: BTreeMap<usize, Vec<Vec<String>>>,
}

/// Serializable description of which properties the cloner extracts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidProperties {
    /// Version tag so stored snapshots can say which allowlist produced them.
    pub version: u32,
    /// Allowlisted property names, in extraction order.
    pub properties: Vec<String>,
    /// Shorthand name to expansion table.
    pub shorthands: BTreeMap<String, ShorthandTable>,
}

impl Default for FluidProperties {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collect string literals into owned strings.
fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

/// Table for `top right bottom left` box shorthands such as `padding` and `margin`.
fn box_table(top: &str, right: &str, bottom: &str, left: &str) -> ShorthandTable {
    let mut expansions = BTreeMap::new();
    expansions.insert(1, vec![owned(&[top, right, bottom, left])]);
    expansions.insert(2, vec![owned(&[top, bottom]), owned(&[right, left])]);
    expansions.insert(
        3,
        vec![owned(&[top]), owned(&[right, left]), owned(&[bottom])],
    );
    expansions.insert(
        4,
        vec![owned(&[top]), owned(&[right]), owned(&[bottom]), owned(&[left])],
    );
    ShorthandTable { expansions }
}

/// Table for `border-radius`, whose positions run clockwise from the top-left corner.
fn corner_table() -> ShorthandTable {
    const TOP_LEFT: &str = "border-top-left-radius";
    const TOP_RIGHT: &str = "border-top-right-radius";
    const BOTTOM_RIGHT: &str = "border-bottom-right-radius";
    const BOTTOM_LEFT: &str = "border-bottom-left-radius";
    let mut expansions = BTreeMap::new();
    expansions.insert(
        1,
        vec![owned(&[TOP_LEFT, TOP_RIGHT, BOTTOM_RIGHT, BOTTOM_LEFT])],
    );
    expansions.insert(
        2,
        vec![owned(&[TOP_LEFT, BOTTOM_RIGHT]), owned(&[TOP_RIGHT, BOTTOM_LEFT])],
    );
    expansions.insert(
        3,
        vec![
            owned(&[TOP_LEFT]),
            owned(&[TOP_RIGHT, BOTTOM_LEFT]),
            owned(&[BOTTOM_RIGHT]),
        ],
    );
    expansions.insert(
        4,
        vec![
            owned(&[TOP_LEFT]),
            owned(&[TOP_RIGHT]),
            owned(&[BOTTOM_RIGHT]),
            owned(&[BOTTOM_LEFT]),
        ],
    );
    ShorthandTable { expansions }
}

/// Table for two-axis shorthands such as `gap`.
fn axis_table(first: &str, second: &str) -> ShorthandTable {
    let mut expansions = BTreeMap::new();
    expansions.insert(1, vec![owned(&[first, second])]);
    expansions.insert(2, vec![owned(&[first]), owned(&[second])]);
    ShorthandTable { expansions }
}

impl FluidProperties {
    /// The built-in allowlist and shorthand tables.
    pub fn builtin() -> Self {
        let properties = owned(&[
            "font-size",
            "line-height",
            "letter-spacing",
            "word-spacing",
            "text-indent",
            "width",
            "min-width",
            "max-width",
            "height",
            "min-height",
            "max-height",
            "grid-template-columns",
            "grid-template-rows",
            "background-position-x",
            "background-position-y",
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
            "margin-top",
            "margin-right",
            "margin-bottom",
            "margin-left",
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
            "column-gap",
            "row-gap",
            "--fluid-bg-size",
            "top",
            "left",
            "right",
            "bottom",
            "object-position",
        ]);
        let mut shorthands = BTreeMap::new();
        shorthands.insert(
            "padding".to_owned(),
            box_table("padding-top", "padding-right", "padding-bottom", "padding-left"),
        );
        shorthands.insert(
            "margin".to_owned(),
            box_table("margin-top", "margin-right", "margin-bottom", "margin-left"),
        );
        shorthands.insert("border-radius".to_owned(), corner_table());
        shorthands.insert("gap".to_owned(), axis_table("row-gap", "column-gap"));
        shorthands.insert(
            "background-position".to_owned(),
            axis_table("background-position-x", "background-position-y"),
        );
        Self {
            version: BUILTIN_VERSION,
            properties,
            shorthands,
        }
    }

    /// Check the tables for internal consistency.
    ///
    /// # Errors
    /// Returns an error when a property is listed twice, a token count is outside
    /// `1..=4`, a table entry does not have one position per token, a longhand is not
    /// allowlisted, or a longhand belongs to more than one shorthand.
    pub fn validate(&self) -> Result<()> {
        let mut allowlisted: HashSet<&str> = HashSet::new();
        for property in &self.properties {
            if !allowlisted.insert(property.as_str()) {
                bail!("property '{property}' is listed more than once");
            }
        }
        let mut owners: HashMap<&str, &str> = HashMap::new();
        for (shorthand, table) in &self.shorthands {
            for (count, positions) in &table.expansions {
                if !(1..=MAX_SHORTHAND_TOKENS).contains(count) {
                    bail!("shorthand '{shorthand}' has a table for {count} tokens");
                }
                if positions.len() != *count {
                    bail!(
                        "shorthand '{shorthand}' table for {count} tokens has {} positions",
                        positions.len()
                    );
                }
                for longhand in positions.iter().flatten() {
                    if !allowlisted.contains(longhand.as_str()) {
                        bail!("longhand '{longhand}' of '{shorthand}' is not allowlisted");
                    }
                    let owner = owners.entry(longhand.as_str()).or_insert(shorthand.as_str());
                    if *owner != shorthand.as_str() {
                        bail!("longhand '{longhand}' belongs to both '{owner}' and '{shorthand}'");
                    }
                }
            }
        }
        Ok(())
    }
}

/// Validated property tables plus a longhand → shorthand index.
#[derive(Clone, Debug)]
pub struct PropertyRegistry {
    properties: FluidProperties,
    shorthand_of: HashMap<String, String>,
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        let properties = FluidProperties::builtin();
        Self {
            shorthand_of: index_longhands(&properties),
            properties,
        }
    }
}

/// Map each longhand to the shorthand whose table mentions it.
fn index_longhands(properties: &FluidProperties) -> HashMap<String, String> {
    let mut index = HashMap::new();
    for (shorthand, table) in &properties.shorthands {
        for longhand in table.expansions.values().flatten().flatten() {
            index
                .entry(longhand.clone())
                .or_insert_with(|| shorthand.clone());
        }
    }
    index
}

impl PropertyRegistry {
    /// Validate and index `properties`.
    ///
    /// # Errors
    /// Returns an error when the tables are inconsistent (see [`FluidProperties::validate`]).
    pub fn new(properties: FluidProperties) -> Result<Self> {
        properties.validate()?;
        Ok(Self {
            shorthand_of: index_longhands(&properties),
            properties,
        })
    }

    /// Load a registry from its JSON form.
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed or the tables are inconsistent.
    pub fn from_json(text: &str) -> Result<Self> {
        let properties: FluidProperties =
            from_str(text).context("failed to parse fluid property tables")?;
        Self::new(properties)
    }

    /// Version of the underlying tables.
    pub fn version(&self) -> u32 {
        self.properties.version
    }

    /// Allowlisted properties in extraction order.
    pub fn properties(&self) -> &[String] {
        &self.properties.properties
    }

    /// The underlying serializable tables.
    pub fn tables(&self) -> &FluidProperties {
        &self.properties
    }

    /// The shorthand that can supply `longhand`, if any.
    pub fn shorthand_for(&self, longhand: &str) -> Option<&str> {
        self.shorthand_of.get(longhand).map(String::as_str)
    }

    /// Per-position longhand lists for `shorthand` written with `token_count` tokens.
    pub fn expansion(&self, shorthand: &str, token_count: usize) -> Option<&[Vec<String>]> {
        self.properties
            .shorthands
            .get(shorthand)?
            .expansions
            .get(&token_count)
            .map(Vec::as_slice)
    }
}
