// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, path::Path};

use anyhow::{Context, Error};

use super::Template;

/// Reads a template document from disk. `.yaml` and `.yml` files are read as
/// YAML, anything else as JSON.
pub fn load_template_file(filename: &Path) -> Result<Template, Error> {
    let input = fs::read_to_string(filename).with_context(|| format!("failed to read {}", filename.display()))?;

    let template = if is_yaml_path(filename) {
        Template::from_yaml_str(&input)
    } else {
        Template::from_json_str(&input)
    };

    let template = template.with_context(|| format!("failed to load template {}", filename.display()))?;
    tracing::debug!(
        file = %filename.display(),
        title = %template.title,
        inputs = template.inputs().len(),
        calcs = template.calcs().len(),
        "loaded template"
    );
    Ok(template)
}

pub(crate) fn is_yaml_path(filename: &Path) -> bool {
    matches!(
        filename.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    )
}
