// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use crate::{
    config::EngineConfig,
    error::{SessionError, TemplateError},
    parser::ExprParser,
    resolver::{CalcResolution, CalcResolver},
    template::{Template, TemplateNode},
    validator::{validate_values, ValidationResult},
    values::{filter_input_values, merge_defaults, TemplateValue, TemplateValues},
};

/// Placeholder shown for values that are absent.
pub const BLANK: &str = "—";

/// One editing session over a template.
///
/// Input values are mutated one key at a time; derived values and the
/// validation result are recomputed from scratch after every change.
pub struct Session {
    template: Template,
    resolver: CalcResolver,
    inputs: TemplateValues,
    resolution: CalcResolution,
    validation: ValidationResult,
}

impl Session {
    /// Starts a session from the schema defaults overlaid with `saved`.
    /// Keys of `saved` that are not inputs are dropped.
    pub fn open(template: Template, saved: &TemplateValues, config: &EngineConfig) -> Result<Session, TemplateError> {
        let parser = ExprParser::new();
        if config.strict_expressions {
            template.check_strict(&parser)?;
        }

        let resolver = CalcResolver::with_parser(&parser, &template.nodes, config.max_calc_passes);
        // Only input keys survive: a calc key in saved values is stale.
        let inputs = filter_input_values(&template.nodes, &merge_defaults(&template.nodes, saved));
        let resolution = resolver.resolve(&inputs);
        let validation = validate_values(&template, &inputs);

        Ok(Session {
            template,
            resolver,
            inputs,
            resolution,
            validation,
        })
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn inputs(&self) -> &TemplateValues {
        &self.inputs
    }

    pub fn derived(&self) -> &TemplateValues {
        &self.resolution.values
    }

    pub fn resolution(&self) -> &CalcResolution {
        &self.resolution
    }

    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn set_value(&mut self, key: &str, value: TemplateValue) -> Result<(), SessionError> {
        self.expect_input(key)?;
        self.inputs.replace(key.to_string(), value);
        self.recompute();
        Ok(())
    }

    pub fn clear_value(&mut self, key: &str) -> Result<(), SessionError> {
        self.expect_input(key)?;
        self.inputs.remove(key);
        self.recompute();
        Ok(())
    }

    /// Input values to persist. Refused while validation fails.
    pub fn save_payload(&self) -> Result<TemplateValues, SessionError> {
        if !self.validation.is_valid {
            return Err(SessionError::Invalid {
                count: self.validation.errors.len(),
            });
        }
        Ok(self.save_payload_unchecked())
    }

    pub fn save_payload_unchecked(&self) -> TemplateValues {
        filter_input_values(&self.template.nodes, &self.inputs)
    }

    /// Text for one input or calc: the value plus its unit, or [`BLANK`].
    pub fn display_value(&self, key: &str) -> String {
        let value = match self.template.find(key) {
            Some(TemplateNode::Calc(_)) => self.resolution.values.get(key),
            Some(TemplateNode::Input(_)) => self.inputs.get(key),
            _ => None,
        };
        let value = match value {
            Some(value) if !value.is_empty() => value,
            _ => return BLANK.to_string(),
        };

        match self.template.find(key).and_then(TemplateNode::unit) {
            Some(unit) => format!("{} {}", value, unit),
            None => value.to_string(),
        }
    }

    fn expect_input(&self, key: &str) -> Result<(), SessionError> {
        match self.template.find(key) {
            Some(TemplateNode::Input(_)) => Ok(()),
            _ => Err(SessionError::NotAnInput { key: key.to_string() }),
        }
    }

    fn recompute(&mut self) {
        self.resolution = self.resolver.resolve(&self.inputs);
        self.validation = validate_values(&self.template, &self.inputs);
    }
}
