use thiserror::Error;

use crate::constants::exit_codes;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Unknown configuration axis '{axis}'.")]
    UnknownAxis { axis: String },

    /// A required axis is unset or holds a value outside the schema.
    #[error("Invalid configuration for '{field}': {reason}.")]
    InvalidConfiguration { field: String, reason: String },

    /// A generator cannot render the given configuration subset.
    #[error("Generator '{generator}' cannot render this configuration: {reason}.")]
    UnsupportedCombination { generator: String, reason: String },

    #[error("Generation aborted in '{generator}'.")]
    GenerationAborted {
        generator: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot proceed: output directory '{output_dir}' already exists and is not empty.")]
    OutputDirectoryNotEmpty { output_dir: String },

    /// When an install or scaffolding command has executed but finished with an error.
    #[error("Command '{command}' failed with exit code {exit_code}.\n{stderr}")]
    CommandFailed { command: String, exit_code: i32, stderr: String },

    #[error("Prompt failed: {0}.")]
    PromptError(#[from] dialoguer::Error),
}

/// Convenience type alias for Results with stackforge's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message and its causes to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
    std::process::exit(exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_aborted_names_generator_and_cause() {
        let err = Error::GenerationAborted {
            generator: "backend-node".to_string(),
            source: Box::new(Error::UnsupportedCombination {
                generator: "backend-node".to_string(),
                reason: "no server template for 'python'".to_string(),
            }),
        };
        assert!(err.to_string().contains("backend-node"));
        let cause = std::error::Error::source(&err).unwrap();
        assert!(cause.to_string().contains("no server template for 'python'"));
    }

    #[test]
    fn invalid_configuration_reports_field() {
        let err = Error::InvalidConfiguration {
            field: "bundler".to_string(),
            reason: "unknown value 'gulp'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'bundler': unknown value 'gulp'."
        );
    }
}
