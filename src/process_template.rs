// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use anyhow::Error;
use clap::ValueEnum;
use hashlink::LinkedHashMap;
use serde::Serialize;

use crate::{
    config::EngineConfig,
    session::Session,
    template::Template,
    values::TemplateValues,
    yaml_utils::{json_to_yaml, yaml_emit_to_string},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Everything an editing session knows about a template and its values.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProcessReport {
    pub title: String,
    /// Input values as they would be persisted.
    pub inputs: TemplateValues,
    pub derived: TemplateValues,
    pub unresolved: Vec<String>,
    pub valid: bool,
    pub errors: LinkedHashMap<String, String>,
}

pub fn process_template_str(
    template_string: &str,
    values_string: &str,
    config: &EngineConfig,
) -> Result<ProcessReport, Error> {
    let template = Template::from_json_str(template_string)?;
    let saved = parse_values_str(values_string)?;
    process_template(template, &saved, config)
}

pub fn process_template(template: Template, saved: &TemplateValues, config: &EngineConfig) -> Result<ProcessReport, Error> {
    let session = Session::open(template, saved, config)?;

    let report = ProcessReport {
        title: session.template().title.clone(),
        inputs: session.save_payload_unchecked(),
        derived: session.derived().clone(),
        unresolved: session.resolution().unresolved.clone(),
        valid: session.validation().is_valid,
        errors: session.validation().errors.clone(),
    };
    Ok(report)
}

/// Saved values are a flat JSON object. Blank input means nothing saved yet.
pub fn parse_values_str(values_string: &str) -> Result<TemplateValues, Error> {
    if values_string.trim().is_empty() {
        return Ok(TemplateValues::new());
    }
    let values = serde_json::from_str(values_string)?;
    Ok(values)
}

pub fn render_report(report: &ProcessReport, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Json => {
            let mut out_str = serde_json::to_string_pretty(report)?;
            out_str.push('\n');
            Ok(out_str)
        }
        OutputFormat::Yaml => {
            let value = serde_json::to_value(report)?;
            let mut out_str = yaml_emit_to_string(&[json_to_yaml(&value)])?;
            out_str.push('\n');
            Ok(out_str)
        }
    }
}
