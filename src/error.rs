// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use thiserror::Error;

/// Failure to compile an expression string.
///
/// These never reach the user of a form: `evaluate_expression` logs them and
/// yields no value.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ExprError {
    #[error("Unknown character {ch:?} at position {pos}")]
    UnknownCharacter { ch: char, pos: usize },

    #[error("{message}")]
    Syntax { message: String },

    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("function '{name}' expects {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },
}

/// Structural problems in a template document.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid template json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid template yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("node with label '{label}' has an empty key")]
    EmptyKey { label: String },

    #[error("duplicate node key '{key}'")]
    DuplicateKey { key: String },

    #[error("calc '{key}' uses unsupported expression language '{lang}'")]
    UnsupportedExprLang { key: String, lang: String },

    #[error("calc '{key}' has value type '{value_type}', expected number or string")]
    InvalidCalcValueType { key: String, value_type: String },

    #[error("calc '{key}' has a malformed expression: {source}")]
    BadCalcExpression {
        key: String,
        #[source]
        source: ExprError,
    },
}

/// Rejected editing-session operations.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SessionError {
    #[error("'{key}' is not an input of this template")]
    NotAnInput { key: String },

    #[error("values are invalid ({count} error(s))")]
    Invalid { count: usize },
}
