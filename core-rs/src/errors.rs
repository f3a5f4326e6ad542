//! Error types for RDFS documentation generation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error at position {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("RDFS error: {0}")]
    Rdfs(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(String),

    #[error("Render failed for class {class}: {message}")]
    Render { class: String, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Ancestor cycle at class {class}: {}", chain.join(" -> "))]
    AncestorCycle { class: String, chain: Vec<String> },

    #[error("Class not found: {0}")]
    ClassNotFound(String),
}

impl From<reqwest::Error> for DocError {
    fn from(err: reqwest::Error) -> Self {
        DocError::Http(err.to_string())
    }
}

impl From<tera::Error> for DocError {
    fn from(err: tera::Error) -> Self {
        // tera keeps the useful part (which variable, which line) in the source chain
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(inner) = source {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            source = inner.source();
        }
        DocError::Template(message)
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
