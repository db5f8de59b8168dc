// CSS Extractor Properties - Declaration queries over top-level rules

use super::helpers::DeclarationHelper;
use super::types::{CssRule, Declaration, DeclarationMap, Stylesheet};

pub(super) struct PropertyExtractor;

impl PropertyExtractor {
    /// `(key, declarations)` for each top-level rule that owns declarations
    ///
    /// Qualified rules are keyed by their prelude. At-rules with declarations
    /// directly in their block (`@font-face`, `@page`) are keyed `@name prelude`.
    pub(super) fn declaration_groups(stylesheet: &Stylesheet) -> Vec<(String, &[Declaration])> {
        let mut groups = Vec::new();

        for rule in &stylesheet.rules {
            match rule {
                CssRule::Qualified(qualified) => {
                    groups.push((qualified.prelude.clone(), qualified.block.declarations.as_slice()));
                }
                CssRule::At(at_rule) => {
                    let Some(block) = &at_rule.block else {
                        continue;
                    };
                    if block.declarations.is_empty() {
                        continue;
                    }
                    let key = if at_rule.prelude.is_empty() {
                        format!("@{}", at_rule.name)
                    } else {
                        format!("@{} {}", at_rule.name, at_rule.prelude)
                    };
                    groups.push((key, block.declarations.as_slice()));
                }
            }
        }

        groups
    }

    pub(super) fn extract_colors(stylesheet: &Stylesheet) -> Vec<String> {
        Self::declaration_groups(stylesheet)
            .into_iter()
            .flat_map(|(_, declarations)| declarations.iter())
            .filter(|decl| DeclarationHelper::is_color_property(&decl.property))
            .filter(|decl| !decl.value.is_empty())
            .map(|decl| decl.value.clone())
            .collect()
    }

    pub(super) fn extract_property(stylesheet: &Stylesheet, name: &str) -> Vec<(String, String)> {
        let mut results = Vec::new();
        for (selector, declarations) in Self::declaration_groups(stylesheet) {
            for decl in declarations {
                if decl.property.eq_ignore_ascii_case(name) {
                    results.push((selector.clone(), decl.value.clone()));
                }
            }
        }
        results
    }

    /// A selector seen twice keeps one key; its declarations are appended
    pub(super) fn declarations_by_selector(stylesheet: &Stylesheet) -> DeclarationMap {
        let mut result = DeclarationMap::new();
        for (selector, declarations) in Self::declaration_groups(stylesheet) {
            result.extend_entry(selector, declarations.iter().cloned());
        }
        result
    }
}
