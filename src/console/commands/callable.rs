use crate::cli::error::CliError;

/// A parsed command line, ready to run.
pub trait CallableTrait {
    fn call(&self) -> Result<(), CliError>;
}
