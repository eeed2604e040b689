// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::str::FromStr;

use anyhow::{anyhow, Error};

use crate::values::{TemplateValue, TemplateValues};

/// A `name=value` binding given on the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableArg {
    pub name: String,
    pub value: TemplateValue,
}

impl FromStr for VariableArg {
    type Err = Error;

    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| anyhow!("expected name=value, found '{}'", arg))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(anyhow!("variable name missing in '{}'", arg));
        }

        // Values are read the way a JSON document would type them, falling
        // back to plain text.
        let value = serde_json::from_str::<TemplateValue>(value.trim())
            .unwrap_or_else(|_| TemplateValue::String(value.to_string()));

        Ok(VariableArg {
            name: name.to_string(),
            value,
        })
    }
}

/// Later bindings of the same name win.
pub fn variables_to_values(args: &[VariableArg]) -> TemplateValues {
    let mut values = TemplateValues::new();
    for arg in args {
        values.replace(arg.name.clone(), arg.value.clone());
    }
    values
}
