//! Result records produced by the JavaScript walkers
//!
//! Field names serialize in camelCase so reports read the same as the ESTree
//! trees they were extracted from.

use crate::extractors::base::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Declaration,
    Expression,
    Arrow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub kind: FunctionKind,
    /// Always `None` for arrows and anonymous expressions
    pub name: Option<String>,
    /// Plain identifier parameters only; patterns and rest elements are skipped
    pub params: Vec<String>,
    pub is_async: bool,
    pub is_generator: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    Const,
    Let,
    Var,
}

impl DeclKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "const" => Some(DeclKind::Const),
            "let" => Some(DeclKind::Let),
            "var" => Some(DeclKind::Var),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Const => "const",
            DeclKind::Let => "let",
            DeclKind::Var => "var",
        }
    }
}

/// One declarator of a `var` / `let` / `const` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub decl_kind: DeclKind,
    /// `None` when the declarator binds a destructuring pattern
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: Option<String>,
    /// Only set when `extends` names a bare identifier
    pub superclass_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecifierKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSpecifierInfo {
    pub kind: SpecifierKind,
    /// Exported name on the other side; only named specifiers have one
    pub imported_name: Option<String>,
    pub local_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportInfo {
    pub source: String,
    pub specifiers: Vec<ImportSpecifierInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportInfo {
    /// ESTree node type, e.g. `ExportNamedDeclaration`
    pub kind: String,
    /// Re-export source, `export ... from "source"`
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub functions: usize,
    pub variables: usize,
    pub classes: usize,
    pub lines: usize,
    pub statements: usize,
    pub loops: usize,
    pub conditionals: usize,
    pub max_depth: usize,
}

/// Module specifiers a file pulls in, duplicates kept in encounter order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySet {
    pub imports: Vec<String>,
    pub requires: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Es6,
    CommonJs,
    None,
}

impl ModuleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Es6 => "es6",
            ModuleType::CommonJs => "commonjs",
            ModuleType::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    Keyword,
    Identifier,
    Boolean,
    Null,
    Numeric,
    String,
    RegularExpression,
    Template,
    Punctuator,
    PrivateIdentifier,
    JSXText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub value: String,
    #[serde(flatten)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommentType {
    Line,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    pub comment_type: CommentType,
    /// Text without the `//` or `/* */` delimiters
    pub value: String,
    #[serde(flatten)]
    pub span: Span,
}
