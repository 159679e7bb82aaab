//! Untyped load pipeline shared by typed loads and schema-file callers.

use crate::loader::{ConfigError, EnvSource, LayeredLoader, VariablePool};
use crate::report::{
    SourceReport, format_unknown_variables, format_validation_error, write_example,
};
use crate::schema::{Schema, UnknownFields, Validated, validate};

use super::options::LoadOptions;

/// Outcome of loading env files and validating them against a schema.
#[derive(Debug, Clone)]
pub struct Resolved {
    pub pool: VariablePool,
    pub validated: Validated,
}

impl Resolved {
    pub fn source_report(&self) -> SourceReport {
        SourceReport::new(&self.validated, self.pool.sources())
    }
}

/// Load, export, and validate env files for `schema`.
///
/// Error reports are written to stderr before the error is returned.
/// Variables exported here stay in the process environment on every path.
pub fn resolve(schema: &Schema, options: &LoadOptions) -> Result<Resolved, ConfigError> {
    if options.auto_generate_example {
        let path = options.example_path();
        if !path.exists()
            && let Err(e) = write_example(schema, &path)
        {
            tracing::warn!(path = %path.display(), error = %e, "Failed to generate env example");
        }
    }

    let pool = LayeredLoader::new(options.base_file.clone())
        .with_dir(&options.dir)
        .with_env(options.env.clone())
        .load()?;
    pool.export();

    let policy = if options.strict {
        let mut unknown: Vec<String> = pool
            .keys()
            .filter(|key| !schema.is_known(key))
            .map(str::to_string)
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            eprint!("{}", format_unknown_variables(&unknown, schema));
            return Err(ConfigError::UnknownVariables(unknown));
        }
        UnknownFields::Forbid
    } else {
        UnknownFields::Ignore
    };

    let source = EnvSource::with_keys(pool.keys().map(str::to_string).collect());
    match validate(schema, &source, policy) {
        Ok(validated) => Ok(Resolved { pool, validated }),
        Err(err) => {
            eprint!("{}", format_validation_error(&err, schema));
            Err(err.into())
        }
    }
}
