//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map LoaderError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-6 are reserved for specific error categories.

use layerconf_loader::LoaderError;

/// Structured exit codes for layerconf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - the document was loaded and printed.
    #[allow(dead_code)]
    Success = 0,

    /// General error - bad arguments, missing path, output failure.
    GeneralError = 1,

    /// No extension loader is registered for the file's extension.
    UnregisteredExtension = 2,

    /// A file could not be read or parsed.
    LoadFailed = 3,

    /// A placeholder could not be resolved.
    ReferenceFailed = 4,

    /// The import graph contains a cycle or an import entry is not a path.
    ImportFailed = 5,

    /// Environment or `.env` configuration is invalid.
    ConfigError = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&LoaderError> for ExitCode {
    fn from(err: &LoaderError) -> Self {
        match err {
            LoaderError::UnregisteredExtension { .. } => ExitCode::UnregisteredExtension,
            LoaderError::Load { .. } => ExitCode::LoadFailed,
            LoaderError::Reference { .. } => ExitCode::ReferenceFailed,
            LoaderError::CyclicImport { .. } | LoaderError::InvalidImport { .. } => {
                ExitCode::ImportFailed
            }
            LoaderError::InvalidValue { .. }
            | LoaderError::DotenvParse { .. }
            | LoaderError::DotenvIo { .. }
            | LoaderError::DotenvUnknown => ExitCode::ConfigError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no LoaderError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<LoaderError>())
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }
}
