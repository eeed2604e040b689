// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use anyhow::Error;
use saphyr::{Yaml, YamlEmitter};
use serde_json::Value;

/// Report documents are emitted through saphyr, so JSON values are mapped
/// onto its `Yaml` tree.
pub fn json_to_yaml(value: &Value) -> Yaml {
    match value {
        Value::Null => Yaml::Null,
        Value::Bool(value) => Yaml::Boolean(*value),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => Yaml::Integer(integer),
            None => Yaml::Real(number.to_string()),
        },
        Value::String(value) => Yaml::String(value.clone()),
        Value::Array(items) => Yaml::Array(items.iter().map(json_to_yaml).collect()),
        Value::Object(map) => {
            let mut hash = saphyr::Hash::new();
            for (key, value) in map {
                hash.insert(Yaml::String(key.clone()), json_to_yaml(value));
            }
            Yaml::Hash(hash)
        }
    }
}

pub fn yaml_emit_to_string(docs: &[Yaml]) -> Result<String, Error> {
    let mut out_str = String::new();
    let mut emitter = YamlEmitter::new(&mut out_str);
    for doc in docs {
        emitter.dump(doc)?;
    }
    Ok(out_str)
}
