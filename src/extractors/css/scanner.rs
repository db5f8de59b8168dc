// CSS block scanner - Split raw block contents into declaration and rule items
//
// Used where the grammar cannot be trusted: blocks it had to recover inside,
// and bare declaration lists such as style attributes. Strings, comments and
// bracket nesting are honored; empty items (`;;`, a leading `;`) vanish.

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BlockItem<'a> {
    /// `property: value` text, without the terminating `;`
    Declaration(&'a str),
    /// `prelude { ... }` text, braces included
    Rule(&'a str),
}

/// Byte offset of a `}` that closes nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct UnbalancedBrace(pub(super) usize);

/// Split block contents at top-level `;` and after each top-level `{ ... }`
pub(super) fn split_block_items(text: &str) -> Result<Vec<BlockItem<'_>>, UnbalancedBrace> {
    let bytes = text.as_bytes();
    let mut items = Vec::new();
    let mut start = 0;
    let mut braces = 0usize;
    let mut brackets = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            quote @ (b'"' | b'\'') => {
                i = skip_string(bytes, i, quote);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_comment(bytes, i);
                continue;
            }
            b'(' | b'[' if braces == 0 => brackets += 1,
            b')' | b']' if braces == 0 => brackets = brackets.saturating_sub(1),
            b'{' => braces += 1,
            b'}' => {
                if braces == 0 {
                    return Err(UnbalancedBrace(i));
                }
                braces -= 1;
                if braces == 0 {
                    push_item(&mut items, &text[start..=i], true);
                    start = i + 1;
                    brackets = 0;
                }
            }
            b';' if braces == 0 && brackets == 0 => {
                push_item(&mut items, &text[start..i], false);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    // An unclosed `{` leaves a rule in the tail
    push_item(&mut items, &text[start..], braces > 0);
    Ok(items)
}

fn push_item<'a>(items: &mut Vec<BlockItem<'a>>, text: &'a str, is_rule: bool) {
    if strip_comments(text).trim().is_empty() {
        return;
    }
    items.push(if is_rule {
        BlockItem::Rule(text)
    } else {
        BlockItem::Declaration(text)
    });
}

/// Comments replaced by a single space; string contents left alone
pub(super) fn strip_comments(text: &str) -> Cow<'_, str> {
    if !text.contains("/*") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            quote @ (b'"' | b'\'') => i = skip_string(bytes, i, quote),
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&text[copied..i]);
                out.push(' ');
                i = skip_comment(bytes, i);
                copied = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

/// Index just past the closing quote; an unescaped newline ends a bad string
fn skip_string(bytes: &[u8], open: usize, quote: u8) -> usize {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Index just past `*/`, or the end of input for an unterminated comment
fn skip_comment(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 2;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return i + 2;
        }
        i += 1;
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declarations(text: &str) -> Vec<&str> {
        split_block_items(text)
            .unwrap()
            .into_iter()
            .filter_map(|item| match item {
                BlockItem::Declaration(decl) => Some(decl.trim()),
                BlockItem::Rule(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_items_vanish() {
        assert_eq!(declarations("color:red;;margin:0"), vec!["color:red", "margin:0"]);
        assert_eq!(declarations(";color:red"), vec!["color:red"]);
        assert_eq!(declarations(" ; /* x */ ; "), Vec::<&str>::new());
    }

    #[test]
    fn test_semicolons_inside_strings_and_urls() {
        assert_eq!(
            declarations("content: \"a;b\"; background: url(data:x;base64,AA); top: 0"),
            vec!["content: \"a;b\"", "background: url(data:x;base64,AA)", "top: 0"]
        );
    }

    #[test]
    fn test_nested_rules_split_out() {
        let items = split_block_items("color: red; a { b: c; } d: e").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[1], BlockItem::Rule(" a { b: c; }"));
        assert_eq!(items[2], BlockItem::Declaration(" d: e"));
    }

    #[test]
    fn test_unbalanced_closing_brace() {
        assert_eq!(
            split_block_items("color: red} a{margin:0"),
            Err(UnbalancedBrace(10))
        );
        assert!(split_block_items("content: '}'").is_ok());
    }

    #[test]
    fn test_strip_comments_keeps_strings() {
        assert_eq!(strip_comments("red /* x */"), "red  ");
        assert_eq!(strip_comments("'/* kept */'"), "'/* kept */'");
    }
}
