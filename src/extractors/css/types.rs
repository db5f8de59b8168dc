// CSS rule model
//
// What the CSS walker lowers a tree-sitter stylesheet into. Values and preludes
// are kept as serialized text; the walker never interprets them.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One `property: value` pair inside a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Contents of a `{ ... }` block
///
/// Declarations and nested rules are kept apart; each list preserves document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub rules: Vec<CssRule>,
}

/// `selector { ... }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedRule {
    /// Entire serialized prelude; `h1, h2` stays one string
    pub prelude: String,
    pub block: Block,
}

/// `@name prelude { ... }` or `@name prelude;`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtRule {
    /// Lowercased at-keyword without the leading `@`
    pub name: String,
    pub prelude: String,
    pub block: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CssRule {
    Qualified(QualifiedRule),
    At(AtRule),
}

impl CssRule {
    pub fn as_qualified(&self) -> Option<&QualifiedRule> {
        match self {
            CssRule::Qualified(rule) => Some(rule),
            CssRule::At(_) => None,
        }
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match self {
            CssRule::At(rule) => Some(rule),
            CssRule::Qualified(_) => None,
        }
    }
}

/// A parsed stylesheet: top-level rules in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Top-level qualified rules only
    pub fn qualified_rules(&self) -> impl Iterator<Item = &QualifiedRule> {
        self.rules.iter().filter_map(CssRule::as_qualified)
    }

    /// Top-level at-rules only
    pub fn at_rules(&self) -> impl Iterator<Item = &AtRule> {
        self.rules.iter().filter_map(CssRule::as_at_rule)
    }
}

/// Declarations grouped by selector, keys in order of first appearance
///
/// A selector seen again appends to its existing entry. Serializes as a JSON
/// object with keys in that same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationMap {
    entries: Vec<(String, Vec<Declaration>)>,
    positions: HashMap<String, usize>,
}

impl DeclarationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the entry for `selector`, creating it at the end if new
    pub fn extend_entry(
        &mut self,
        selector: String,
        declarations: impl IntoIterator<Item = Declaration>,
    ) {
        let index = match self.positions.get(&selector) {
            Some(&index) => index,
            None => {
                self.positions.insert(selector.clone(), self.entries.len());
                self.entries.push((selector, Vec::new()));
                self.entries.len() - 1
            }
        };
        self.entries[index].1.extend(declarations);
    }

    pub fn get(&self, selector: &str) -> Option<&[Declaration]> {
        self.positions
            .get(selector)
            .map(|&index| self.entries[index].1.as_slice())
    }

    pub fn contains_key(&self, selector: &str) -> bool {
        self.positions.contains_key(selector)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(selector, _)| selector.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Declaration])> {
        self.entries
            .iter()
            .map(|(selector, declarations)| (selector.as_str(), declarations.as_slice()))
    }
}

impl Serialize for DeclarationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (selector, declarations) in &self.entries {
            map.serialize_entry(selector, declarations)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DeclarationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DeclarationMapVisitor;

        impl<'de> Visitor<'de> for DeclarationMapVisitor {
            type Value = DeclarationMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of selector to declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DeclarationMap, A::Error> {
                let mut map = DeclarationMap::new();
                while let Some((selector, declarations)) =
                    access.next_entry::<String, Vec<Declaration>>()?
                {
                    map.extend_entry(selector, declarations);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(DeclarationMapVisitor)
    }
}

/// An `@media` block: its condition and the selectors of directly nested rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaQuery {
    pub condition: String,
    pub rule_selectors: Vec<String>,
}

/// Options for `prettify_css`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrettifyOptions {
    /// Inserted before every declaration line
    pub indent: String,
}

impl Default for PrettifyOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }
}
