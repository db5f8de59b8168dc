// CSS serialization - Compact and pretty printers for the rule model
//
// The compact form is a plain re-serialization of the parsed model; whitespace
// disappears only because the model does not keep it.

use super::types::{AtRule, Block, CssRule, Declaration, PrettifyOptions, QualifiedRule, Stylesheet};

pub(super) struct CssSerializer;

impl CssSerializer {
    pub(super) fn to_compact(stylesheet: &Stylesheet) -> String {
        let mut out = String::new();
        for rule in &stylesheet.rules {
            Self::write_rule(rule, &mut out);
        }
        out
    }

    /// One `"<selector> {"` header, one line per declaration, `"}\n"`; at-rules on one line.
    /// Items are joined with `\n`, leaving a blank line between rules.
    pub(super) fn to_pretty(stylesheet: &Stylesheet, options: &PrettifyOptions) -> String {
        let mut lines: Vec<String> = Vec::new();

        for rule in &stylesheet.rules {
            match rule {
                CssRule::Qualified(qualified) => {
                    lines.push(format!("{} {{", qualified.prelude));
                    for decl in &qualified.block.declarations {
                        lines.push(format!("{}{}", options.indent, Self::pretty_declaration(decl)));
                    }
                    for nested in &qualified.block.rules {
                        let mut compact = String::new();
                        Self::write_rule(nested, &mut compact);
                        lines.push(format!("{}{}", options.indent, compact));
                    }
                    lines.push("}\n".to_string());
                }
                CssRule::At(at_rule) => {
                    let mut compact = String::new();
                    Self::write_at_rule(at_rule, &mut compact);
                    compact.push('\n');
                    lines.push(compact);
                }
            }
        }

        lines.join("\n")
    }

    fn pretty_declaration(decl: &Declaration) -> String {
        let important = if decl.important { " !important" } else { "" };
        format!("{}: {}{};", decl.property, decl.value, important)
    }

    fn write_rule(rule: &CssRule, out: &mut String) {
        match rule {
            CssRule::Qualified(qualified) => Self::write_qualified_rule(qualified, out),
            CssRule::At(at_rule) => Self::write_at_rule(at_rule, out),
        }
    }

    fn write_qualified_rule(rule: &QualifiedRule, out: &mut String) {
        out.push_str(&rule.prelude);
        Self::write_block(&rule.block, out);
    }

    fn write_at_rule(rule: &AtRule, out: &mut String) {
        out.push('@');
        out.push_str(&rule.name);
        if !rule.prelude.is_empty() {
            out.push(' ');
            out.push_str(&rule.prelude);
        }
        match &rule.block {
            Some(block) => Self::write_block(block, out),
            None => out.push(';'),
        }
    }

    fn write_block(block: &Block, out: &mut String) {
        out.push('{');
        for decl in &block.declarations {
            out.push_str(&decl.property);
            out.push(':');
            out.push_str(&decl.value);
            if decl.important {
                out.push_str(" !important");
            }
            out.push(';');
        }
        for nested in &block.rules {
            Self::write_rule(nested, out);
        }
        out.push('}');
    }
}
