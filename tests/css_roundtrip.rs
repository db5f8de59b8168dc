//! Property-based tests for CSS re-serialization
//!
//! Minify and prettify must hand back text that parses to the same rules:
//! same selectors, same declarations, same `!important` flags, including
//! for input with empty declarations and unusual `!important` spellings.

use proptest::prelude::*;
use structlens_core::extractors::css::{
    extract_colors, extract_selectors, get_all_declarations, minify_css, parse_stylesheet, prettify_css,
    PrettifyOptions,
};

fn simple_selector() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9-]{0,8}".prop_map(|name| format!(".{name}")),
        "[a-z][a-z0-9-]{0,8}".prop_map(|name| format!("#{name}")),
        prop::sample::select(vec!["div", "p", "h1", "h2", "ul li", "a:hover", "nav > a"])
            .prop_map(str::to_string),
    ]
}

// Grouped selectors stay one prelude
fn selector() -> impl Strategy<Value = String> {
    prop::collection::vec(simple_selector(), 1..4).prop_map(|parts| parts.join(", "))
}

/// `!important` in the spellings CSS accepts
fn important_marker() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["", "", " !important", " !IMPORTANT", " ! important", "!Important"])
}

fn declaration() -> impl Strategy<Value = (String, String, &'static str)> {
    let pairs = vec![
        ("color", "red"),
        ("color", "#ff0000"),
        ("background-color", "rgba(0, 0, 0, 0.5)"),
        ("background", "#fff"),
        ("border", "1px solid #333"),
        ("margin", "0"),
        ("padding", "10px 20px"),
        ("font-size", "1.5em"),
        ("display", "flex"),
        ("width", "100%"),
        ("fill", "currentColor"),
    ];
    (prop::sample::select(pairs), important_marker()).prop_map(|((property, value), marker)| {
        (property.to_string(), value.to_string(), marker)
    })
}

fn render_rule(
    selector: &str,
    declarations: &[(String, String, &str)],
    separators: &[&str],
) -> String {
    let body: Vec<String> = declarations
        .iter()
        .zip(separators.iter().cycle())
        .map(|((property, value, marker), separator)| {
            format!("  {property}: {value}{marker}{separator}")
        })
        .collect();
    format!("{selector} {{\n{}\n}}", body.join("\n"))
}

fn rule() -> impl Strategy<Value = String> {
    (selector(), prop::collection::vec(declaration(), 1..5))
        .prop_map(|(selector, declarations)| render_rule(&selector, &declarations, &[";"]))
}

/// Rules with empty declarations: doubled `;` and an optional leading `;`
fn messy_rule() -> impl Strategy<Value = String> {
    (
        selector(),
        prop::collection::vec(declaration(), 1..5),
        prop::collection::vec(prop::sample::select(vec![";", ";;", "; ;"]), 1..4),
        any::<bool>(),
    )
        .prop_map(|(selector, declarations, separators, leading)| {
            let rendered = render_rule(&selector, &declarations, &separators);
            if leading {
                rendered.replacen("{\n", "{\n  ;", 1)
            } else {
                rendered
            }
        })
}

fn media_block() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["(max-width: 600px)", "(min-width: 768px)", "print"]),
        prop::collection::vec(rule(), 1..3),
    )
        .prop_map(|(condition, rules)| format!("@media {condition} {{\n{}\n}}", rules.join("\n")))
}

fn stylesheet() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![2 => rule(), 2 => messy_rule(), 1 => media_block()], 0..6)
        .prop_map(|items| items.join("\n\n"))
}

proptest! {
    /// Property: minify then prettify preserves the parsed rules
    #[test]
    fn prop_minify_prettify_roundtrip(css in stylesheet()) {
        let original = parse_stylesheet(&css).unwrap();
        let minified = minify_css(&css).unwrap();
        let pretty = prettify_css(&minified, &PrettifyOptions::default()).unwrap();

        prop_assert_eq!(parse_stylesheet(&minified).unwrap(), original.clone());
        prop_assert_eq!(parse_stylesheet(&pretty).unwrap(), original);
    }

    /// Property: one selector entry per top-level rule, grouped selectors unsplit
    #[test]
    fn prop_selector_per_rule(rules in prop::collection::vec(prop_oneof![rule(), messy_rule()], 0..6)) {
        let css = rules.join("\n");
        let selectors = extract_selectors(&css).unwrap();
        prop_assert_eq!(selectors.len(), rules.len());
        for (selector, rule) in selectors.iter().zip(&rules) {
            let expected_prefix = format!("{selector} {{");
            prop_assert!(rule.starts_with(&expected_prefix));
        }
    }

    /// Property: colors come from color-bearing properties only, in order
    #[test]
    fn prop_colors_follow_declaration_order(declarations in prop::collection::vec(declaration(), 1..8)) {
        let body: Vec<String> = declarations
            .iter()
            .map(|(property, value, marker)| format!("{property}: {value}{marker};;"))
            .collect();
        let css = format!(".x {{ {} }}", body.join(" "));

        let expected: Vec<String> = declarations
            .iter()
            .filter(|(property, _, _)| {
                ["color", "background", "border", "fill", "stroke"]
                    .iter()
                    .any(|marker| property.contains(marker))
            })
            .map(|(_, value, _)| value.clone())
            .collect();
        prop_assert_eq!(extract_colors(&css).unwrap(), expected);
    }

    /// Property: every generated declaration survives with its flag, whatever
    /// the marker spelling and however many empty declarations sit between
    #[test]
    fn prop_declarations_survive(
        declarations in prop::collection::vec(declaration(), 1..6),
        separators in prop::collection::vec(prop::sample::select(vec![";", ";;", " ; ;"]), 1..4),
    ) {
        let css = render_rule(".x", &declarations, &separators);
        let parsed = get_all_declarations(&css).unwrap();
        let lowered = parsed.get(".x").unwrap();

        prop_assert_eq!(lowered.len(), declarations.len());
        for (decl, (property, value, marker)) in lowered.iter().zip(&declarations) {
            prop_assert_eq!(&decl.property, property);
            prop_assert_eq!(&decl.value, value);
            prop_assert_eq!(decl.important, !marker.is_empty());
        }
    }

    /// Property: custom indentation never changes the parsed result
    #[test]
    fn prop_indent_is_cosmetic(css in stylesheet(), width in 0usize..8) {
        let options = PrettifyOptions { indent: " ".repeat(width) };
        let pretty = prettify_css(&css, &options).unwrap();
        prop_assert_eq!(parse_stylesheet(&pretty).unwrap(), parse_stylesheet(&css).unwrap());
    }
}
