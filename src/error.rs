use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {message}.")]
    Environment { message: String },

    #[error("Application name {name:?} is reserved and cannot be used.")]
    ReservedName { name: String },

    #[error("Application name {name:?} is invalid: {reason}.")]
    InvalidAppName { name: String, reason: String },

    #[error("Module name {name:?} is not a valid module name.")]
    InvalidModuleName { name: String },

    #[error("Module name {name:?} is already taken. Pick another name with --module.")]
    ModuleNameTaken { name: String },

    #[error("Aborted: the directory '{path}' already exists.")]
    DirectoryExists { path: String },

    #[error("Template error: {0}.")]
    Template(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with kiln's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
