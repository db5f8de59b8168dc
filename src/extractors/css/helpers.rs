// CSS Extractor Helpers - Declaration parsing and text utilities

use super::scanner::strip_comments;
use super::types::Declaration;
use crate::extractors::base::BaseExtractor;
use tree_sitter::Node;

/// Property-name fragments that mark a declaration as color-bearing
pub(super) const COLOR_PROPERTY_MARKERS: [&str; 5] =
    ["color", "background", "border", "fill", "stroke"];

pub(super) struct DeclarationHelper;

impl DeclarationHelper {
    /// Lower a `declaration` node
    pub(super) fn parse_declaration(base: &BaseExtractor, node: Node) -> Option<Declaration> {
        Self::parse_declaration_text(base.node_str(&node))
    }

    /// Lower `property: value[ !important][;]` text
    ///
    /// The value is everything after the first colon, comments removed, with a
    /// trailing `!important` (any case, optional space after `!`) split off.
    /// `None` when there is no colon or the property is not an identifier.
    pub(super) fn parse_declaration_text(text: &str) -> Option<Declaration> {
        let text = strip_comments(text);
        let text = text.trim();
        let text = text.strip_suffix(';').unwrap_or(text).trim_end();
        let colon = text.find(':')?;

        let property = text[..colon].trim();
        if !Self::is_property_name(property) {
            return None;
        }
        let (value, important) = Self::split_important(text[colon + 1..].trim());

        Some(Declaration {
            property: property.to_string(),
            value: value.to_string(),
            important,
        })
    }

    fn is_property_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '\\') || !c.is_ascii())
    }

    /// Split a trailing `!important` (any case, optional space after `!`) off a value
    pub(super) fn split_important(value: &str) -> (&str, bool) {
        if let Some(bang) = value.rfind('!') {
            if value[bang + 1..].trim().eq_ignore_ascii_case("important") {
                return (value[..bang].trim_end(), true);
            }
        }
        (value, false)
    }

    /// Whether a property name carries a color per the marker list
    pub(super) fn is_color_property(property: &str) -> bool {
        let lower = property.to_lowercase();
        COLOR_PROPERTY_MARKERS
            .iter()
            .any(|marker| lower.contains(marker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_important_variants() {
        assert_eq!(DeclarationHelper::split_important("red"), ("red", false));
        assert_eq!(
            DeclarationHelper::split_important("red !important"),
            ("red", true)
        );
        assert_eq!(
            DeclarationHelper::split_important("red! IMPORTANT"),
            ("red", true)
        );
        assert_eq!(
            DeclarationHelper::split_important("'a!b'"),
            ("'a!b'", false)
        );
    }

    #[test]
    fn test_declaration_text_variants() {
        let decl = DeclarationHelper::parse_declaration_text("color: RED ! Important;").unwrap();
        assert_eq!(decl.property, "color");
        assert_eq!(decl.value, "RED");
        assert!(decl.important);

        let decl = DeclarationHelper::parse_declaration_text("margin:/* gap */0").unwrap();
        assert_eq!(decl.value, "0");
        assert!(!decl.important);

        let decl = DeclarationHelper::parse_declaration_text("color:").unwrap();
        assert_eq!(decl.value, "");

        assert!(DeclarationHelper::parse_declaration_text("no colon here").is_none());
        assert!(DeclarationHelper::parse_declaration_text("a b: c").is_none());
        assert!(DeclarationHelper::parse_declaration_text(": c").is_none());
    }

    #[test]
    fn test_color_property_markers() {
        assert!(DeclarationHelper::is_color_property("background-color"));
        assert!(DeclarationHelper::is_color_property("Border-Top"));
        assert!(DeclarationHelper::is_color_property("stroke"));
        assert!(!DeclarationHelper::is_color_property("font-size"));
    }
}
