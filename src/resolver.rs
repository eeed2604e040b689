// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use hashlink::LinkedHashMap;

use crate::{
    ast::Expr,
    config::DEFAULT_MAX_CALC_PASSES,
    interpreter::evaluate,
    parser::ExprParser,
    template::{calc_nodes, TemplateNode},
    values::{TemplateValue, TemplateValues},
};

/// Outcome of resolving every calc of a template.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcResolution {
    /// Resolved calcs, in document order.
    pub values: TemplateValues,
    /// Passes run, including a final pass that made no progress.
    pub passes: usize,
    /// Calcs that never produced a value, in document order.
    pub unresolved: Vec<String>,
}

struct CompiledCalc {
    key: String,
    // None when the expression does not compile; such calcs never resolve.
    expr: Option<Expr>,
    variables: Vec<String>,
}

/// Resolves calc nodes by repeated evaluation passes.
///
/// Each pass evaluates the still-unresolved calcs against the inputs plus the
/// calcs resolved in earlier passes, so a chain of calcs resolves one link per
/// pass. Resolution stops after a pass that resolves nothing or once the pass
/// budget is spent. Cycles and overlong chains stay unresolved, silently.
pub struct CalcResolver {
    calcs: Vec<CompiledCalc>,
    max_passes: usize,
}

impl CalcResolver {
    pub fn new(nodes: &[TemplateNode], max_passes: usize) -> CalcResolver {
        CalcResolver::with_parser(&ExprParser::new(), nodes, max_passes)
    }

    /// Compiles every calc expression once up front.
    pub fn with_parser(parser: &ExprParser, nodes: &[TemplateNode], max_passes: usize) -> CalcResolver {
        let calcs = calc_nodes(nodes)
            .into_iter()
            .map(|calc| {
                let expr = match parser.parse(&calc.expr.value) {
                    Ok(expr) => Some(expr),
                    Err(err) => {
                        tracing::warn!(key = %calc.key, expr = %calc.expr.value, error = %err, "calc expression does not compile");
                        None
                    }
                };
                let variables = match &expr {
                    Some(expr) => expr.variables(),
                    None => parser.extract_variables(&calc.expr.value).unwrap_or_default(),
                };
                CompiledCalc {
                    key: calc.key.clone(),
                    expr,
                    variables,
                }
            })
            .collect();

        CalcResolver { calcs, max_passes }
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Variables each calc refers to, keyed by calc key in document order.
    pub fn dependencies(&self) -> LinkedHashMap<String, Vec<String>> {
        self.calcs
            .iter()
            .map(|calc| (calc.key.clone(), calc.variables.clone()))
            .collect()
    }

    pub fn resolve(&self, values: &TemplateValues) -> CalcResolution {
        let mut calculated = TemplateValues::new();
        let mut passes = 0;

        while passes < self.max_passes {
            passes += 1;

            // Calcs resolved during this pass only become visible next pass.
            let mut all_values = values.clone();
            for (key, value) in &calculated {
                all_values.replace(key.clone(), value.clone());
            }

            let mut progress = false;
            for calc in &self.calcs {
                if calculated.contains_key(&calc.key) {
                    continue;
                }
                let Some(expr) = &calc.expr else {
                    continue;
                };

                let value = match evaluate(expr, &all_values) {
                    Ok(value) => value,
                    Err(err) => {
                        tracing::warn!(key = %calc.key, error = %err, "failed to evaluate calc");
                        None
                    }
                };
                tracing::trace!(pass = passes, key = %calc.key, ?value, "evaluated calc");

                if let Some(value) = value {
                    calculated.insert(calc.key.clone(), TemplateValue::Number(value));
                    progress = true;
                }
            }

            tracing::debug!(pass = passes, resolved = calculated.len(), total = self.calcs.len(), "calc resolution pass");
            if !progress {
                break;
            }
        }

        let mut resolved = TemplateValues::new();
        let mut unresolved = Vec::new();
        for calc in &self.calcs {
            match calculated.remove(&calc.key) {
                Some(value) => {
                    resolved.insert(calc.key.clone(), value);
                }
                None => unresolved.push(calc.key.clone()),
            }
        }

        CalcResolution {
            values: resolved,
            passes,
            unresolved,
        }
    }
}

/// Derived values for every calc that resolves within the default pass budget.
pub fn calculate_all_calcs(nodes: &[TemplateNode], values: &TemplateValues) -> TemplateValues {
    CalcResolver::new(nodes, DEFAULT_MAX_CALC_PASSES).resolve(values).values
}
