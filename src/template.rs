// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

//! Technique template documents.
//!
//! A template is a tree of nodes. `group` nodes nest other nodes; `procedure`,
//! `input` and `calc` nodes are leaves. Inputs and calcs share one key
//! namespace, since calc expressions refer to both by key.

pub(crate) mod loader;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{error::TemplateError, parser::ExprParser, values::TemplateValue};

pub use loader::load_template_file;

/// The only expression language calc nodes may use.
pub const EXPR_LANG: &str = "expr";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub schema_version: String,
    pub scope: TemplateScope,
    pub title: String,
    pub nodes: Vec<TemplateNode>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateScope {
    Plantilla,
    Tecnica,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateNode {
    Procedure(ProcedureNode),
    Group(GroupNode),
    Input(InputNode),
    Calc(CalcNode),
}

/// Read-only instructions. Contributes no values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcedureNode {
    pub key: String,
    pub label: String,
    pub steps: Vec<ProcedureStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcedureStep {
    pub label: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupNode {
    pub key: String,
    pub label: String,
    pub children: Vec<TemplateNode>,
}

/// An editable, persisted value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputNode {
    pub key: String,
    pub label: String,
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<TemplateValue>,
}

/// A derived value, recomputed from `expr` and never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcNode {
    pub key: String,
    pub label: String,
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub expr: CalcExpr,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalcExpr {
    pub lang: String,
    pub value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    String,
    Boolean,
    Date,
}

impl ValueType {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Number => "number",
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Date => "date",
        }
    }
}

impl TemplateNode {
    pub fn key(&self) -> &str {
        match self {
            TemplateNode::Procedure(ProcedureNode { key, .. })
            | TemplateNode::Group(GroupNode { key, .. })
            | TemplateNode::Input(InputNode { key, .. })
            | TemplateNode::Calc(CalcNode { key, .. }) => key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TemplateNode::Procedure(ProcedureNode { label, .. })
            | TemplateNode::Group(GroupNode { label, .. })
            | TemplateNode::Input(InputNode { label, .. })
            | TemplateNode::Calc(CalcNode { label, .. }) => label,
        }
    }

    pub fn unit(&self) -> Option<&str> {
        match self {
            TemplateNode::Input(InputNode { unit, .. }) | TemplateNode::Calc(CalcNode { unit, .. }) => unit.as_deref(),
            TemplateNode::Procedure(_) | TemplateNode::Group(_) => None,
        }
    }
}

/// Visits every node depth-first, parents before their children.
pub fn walk_nodes<'a>(nodes: &'a [TemplateNode], visit: &mut impl FnMut(&'a TemplateNode)) {
    for node in nodes {
        visit(node);
        if let TemplateNode::Group(group) = node {
            walk_nodes(&group.children, visit);
        }
    }
}

/// Every input leaf in the tree, in document order.
pub fn input_nodes(nodes: &[TemplateNode]) -> Vec<&InputNode> {
    let mut inputs = Vec::new();
    walk_nodes(nodes, &mut |node| {
        if let TemplateNode::Input(input) = node {
            inputs.push(input);
        }
    });
    inputs
}

/// Every calc leaf in the tree, in document order.
pub fn calc_nodes(nodes: &[TemplateNode]) -> Vec<&CalcNode> {
    let mut calcs = Vec::new();
    walk_nodes(nodes, &mut |node| {
        if let TemplateNode::Calc(calc) = node {
            calcs.push(calc);
        }
    });
    calcs
}

pub fn find_node<'a>(nodes: &'a [TemplateNode], key: &str) -> Option<&'a TemplateNode> {
    let mut found = None;
    walk_nodes(nodes, &mut |node| {
        if found.is_none() && node.key() == key {
            found = Some(node);
        }
    });
    found
}

impl Template {
    pub fn from_json_str(input: &str) -> Result<Template, TemplateError> {
        let template: Template = serde_json::from_str(input)?;
        template.check()?;
        Ok(template)
    }

    pub fn from_yaml_str(input: &str) -> Result<Template, TemplateError> {
        let template: Template = serde_yaml::from_str(input)?;
        template.check()?;
        Ok(template)
    }

    pub fn inputs(&self) -> Vec<&InputNode> {
        input_nodes(&self.nodes)
    }

    pub fn calcs(&self) -> Vec<&CalcNode> {
        calc_nodes(&self.nodes)
    }

    pub fn find(&self, key: &str) -> Option<&TemplateNode> {
        find_node(&self.nodes, key)
    }

    /// Structural checks serde cannot express: non-empty unique keys and
    /// well-formed calc declarations.
    pub fn check(&self) -> Result<(), TemplateError> {
        let mut keys = HashSet::new();
        let mut res = Ok(());
        walk_nodes(&self.nodes, &mut |node| {
            if res.is_err() {
                return;
            }
            res = check_node(node, &mut keys);
        });
        res
    }

    /// Like [`Template::check`], and also compiles every calc expression so a
    /// malformed one rejects the template.
    pub fn check_strict(&self, parser: &ExprParser) -> Result<(), TemplateError> {
        self.check()?;
        for calc in self.calcs() {
            parser
                .parse(&calc.expr.value)
                .map_err(|source| TemplateError::BadCalcExpression {
                    key: calc.key.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}

fn check_node<'a>(node: &'a TemplateNode, keys: &mut HashSet<&'a str>) -> Result<(), TemplateError> {
    let key = node.key();
    if key.is_empty() {
        return Err(TemplateError::EmptyKey {
            label: node.label().to_string(),
        });
    }
    if !keys.insert(key) {
        return Err(TemplateError::DuplicateKey { key: key.to_string() });
    }

    if let TemplateNode::Calc(calc) = node {
        if calc.expr.lang != EXPR_LANG {
            return Err(TemplateError::UnsupportedExprLang {
                key: calc.key.clone(),
                lang: calc.expr.lang.clone(),
            });
        }
        if !matches!(calc.value_type, ValueType::Number | ValueType::String) {
            return Err(TemplateError::InvalidCalcValueType {
                key: calc.key.clone(),
                value_type: calc.value_type.as_str().to_string(),
            });
        }
    }

    Ok(())
}
