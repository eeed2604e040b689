// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use std::{collections::HashSet, fmt};

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::template::{input_nodes, TemplateNode};

/// A single input or derived value, as it appears in saved-values JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

/// Values keyed by node key, in insertion order.
pub type TemplateValues = LinkedHashMap<String, TemplateValue>;

impl TemplateValue {
    /// `null` and the empty string both mean "no value yet".
    pub fn is_empty(&self) -> bool {
        match self {
            TemplateValue::Null => true,
            TemplateValue::String(value) => value.is_empty(),
            TemplateValue::Bool(_) | TemplateValue::Number(_) => false,
        }
    }

    /// Numeric reading used when the value is referenced from an expression.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TemplateValue::Number(value) => Some(*value),
            TemplateValue::Bool(value) => Some(if *value { 1.0 } else { 0.0 }),
            // Same reading the validator accepts, minus infinities.
            TemplateValue::String(value) => parse_float_prefix(value).filter(|value| value.is_finite()),
            TemplateValue::Null => None,
        }
    }
}

impl From<f64> for TemplateValue {
    fn from(value: f64) -> Self {
        TemplateValue::Number(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Bool(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::String(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::String(value)
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TemplateValue::Null => Ok(()),
            TemplateValue::Bool(value) => write!(f, "{}", value),
            TemplateValue::Number(value) => write!(f, "{}", value),
            TemplateValue::String(value) => f.write_str(value),
        }
    }
}

/// Reads the longest numeric prefix of `text`, after leading whitespace, the
/// way lenient form inputs are read: `"12.5 g"` is 12.5, `"g"` is nothing.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse::<f64>().ok();
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// True when `key` has no usable value: absent, `null` or `""`.
pub fn is_missing(values: &TemplateValues, key: &str) -> bool {
    values.get(key).map_or(true, TemplateValue::is_empty)
}

/// Keys of every input leaf, in document order.
pub fn collect_input_keys(nodes: &[TemplateNode]) -> Vec<String> {
    input_nodes(nodes).into_iter().map(|input| input.key.clone()).collect()
}

/// The subset of `values` that belongs to inputs. This is what gets
/// persisted; calc outputs and stray keys are dropped.
pub fn filter_input_values(nodes: &[TemplateNode], values: &TemplateValues) -> TemplateValues {
    let input_keys = collect_input_keys(nodes).into_iter().collect::<HashSet<_>>();
    values
        .iter()
        .filter(|(key, _)| input_keys.contains(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Starting input values for a session: schema defaults overlaid with the
/// saved values, saved values winning.
pub fn merge_defaults(nodes: &[TemplateNode], saved: &TemplateValues) -> TemplateValues {
    let mut values = TemplateValues::new();
    for input in input_nodes(nodes) {
        if let Some(default) = &input.default {
            values.insert(input.key.clone(), default.clone());
        }
    }
    for (key, value) in saved {
        values.replace(key.clone(), value.clone());
    }
    values
}
