//! Explain command: describe one variable.

use anyhow::Result;
use envcraft_config::Schema;
use envcraft_config::report::explain;

use crate::error::CliError;

pub fn run(schema: &Schema, variable: &str) -> Result<()> {
    match explain(schema, variable) {
        Some(explanation) => {
            println!("{}", explanation);
            Ok(())
        }
        None => Err(CliError::VariableNotFound(variable.to_string()).into()),
    }
}
