use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("credential provider '{0}' is not available on this system")]
    ProviderUnavailable(String),

    #[error("unknown credential provider '{0}' (expected auto, demo or azure-cli)")]
    UnknownProvider(String),

    #[error("`{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    #[error("identity tool returned an unexpected response: {0}")]
    InvalidResponse(String),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Raised at the top level when the user presses Ctrl-C.
#[derive(Error, Debug)]
#[error("operation cancelled")]
pub struct Interrupted;
