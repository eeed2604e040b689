// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{Context, Error};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use techtempl::{
    config::EngineConfig,
    interpreter::evaluate_expression,
    parser::extract_variables,
    process_template::{parse_values_str, process_template, render_report, OutputFormat},
    session::BLANK,
    template::load_template_file,
    variable_arg::{variables_to_values, VariableArg},
};

#[derive(Parser)]
#[command(name = "techtempl", version, about = "Evaluate technique templates and calc expressions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a single calc expression.
    Eval {
        expr: String,
        /// Variable binding, e.g. `--var masa=12.5`. May be repeated.
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<VariableArg>,
    },
    /// List the variables an expression refers to.
    Vars { expr: String },
    /// Resolve calcs and validate saved values against a template.
    Process {
        /// Template document (.json, or .yaml/.yml).
        template: PathBuf,
        /// Saved values document (flat JSON object).
        #[arg(long)]
        values: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
        /// Engine config document (.json, or .yaml/.yml).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the calc resolution pass budget.
        #[arg(long)]
        max_passes: Option<usize>,
        /// Reject templates with malformed calc expressions.
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::Eval { expr, vars } => {
            let values = variables_to_values(&vars);
            match evaluate_expression(&expr, &values) {
                Some(value) => println!("{}", value),
                None => println!("{}", BLANK),
            }
        }
        Command::Vars { expr } => {
            for name in extract_variables(&expr)? {
                println!("{}", name);
            }
        }
        Command::Process {
            template,
            values,
            format,
            config,
            max_passes,
            strict,
        } => {
            let mut engine_config = match config {
                Some(config) => EngineConfig::from_file(&config)?,
                None => EngineConfig::default(),
            };
            if let Some(max_passes) = max_passes {
                engine_config.max_calc_passes = max_passes;
            }
            if strict {
                engine_config.strict_expressions = true;
            }

            let template = load_template_file(&template)?;
            let values_string = match values {
                Some(values) => {
                    fs::read_to_string(&values).with_context(|| format!("failed to read {}", values.display()))?
                }
                None => String::new(),
            };
            let saved = parse_values_str(&values_string)?;

            let report = process_template(template, &saved, &engine_config)?;
            print!("{}", render_report(&report, format)?);
        }
    }
    Ok(())
}
