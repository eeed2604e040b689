// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

//! Technique template engine.
//!
//! A template describes editable inputs and computed (calc) fields as data.
//! Calc fields hold small arithmetic expressions over other fields' keys,
//! which are compiled once and re-evaluated whenever an input changes.

pub mod ast;
pub mod config;
pub mod error;
pub mod functions;
pub mod interpreter;
pub mod parser;
pub mod process_template;
pub mod resolver;
pub mod session;
pub mod template;
pub mod validator;
pub mod values;
pub mod variable_arg;
pub mod yaml_utils;

pub use config::EngineConfig;
pub use error::{ExprError, SessionError, TemplateError};
pub use interpreter::evaluate_expression;
pub use parser::extract_variables;
pub use resolver::{calculate_all_calcs, CalcResolution, CalcResolver};
pub use session::Session;
pub use template::{Template, TemplateNode};
pub use validator::{validate_values, ValidationResult};
pub use values::{collect_input_keys, filter_input_values, merge_defaults, TemplateValue, TemplateValues};
