use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlazaError {
    /// The data source could not be reached or read.
    #[error("Load error: {0}")]
    Load(String),

    /// The source responded, but the payload is not a usable dataset.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    #[error("Preference store error: {0}")]
    Prefs(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// User-correctable form input problems, joined into one message.
    #[error("Invalid registration: {0}")]
    Form(String),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PlazaError>;
