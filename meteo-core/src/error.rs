use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or persisting the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Config file {} lists '{first}' and '{second}', which differ only in case",
        path.display()
    )]
    DuplicateLocation { path: PathBuf, first: String, second: String },

    #[error("Failed to serialize configuration to JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write config file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine platform config directory")]
    NoConfigDir,
}

/// Recoverable failures of registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Bad user input, e.g. non-numeric or out-of-range coordinates.
    #[error("{0}")]
    Validation(String),

    #[error("City '{0}' not found. Please add the city first.")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures of a single weather request, classified by cause.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error occurred: status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Connection error occurred: {0}")]
    Connection(String),

    #[error("Timeout error occurred: {0}")]
    Timeout(String),

    #[error("An error occurred: {0}")]
    Request(String),
}

impl FetchError {
    /// Classify a transport-level `reqwest` failure.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http { status: status.as_u16(), body: err.to_string() }
        } else {
            FetchError::Request(err.to_string())
        }
    }

    /// Short machine-friendly name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http { .. } => "http",
            FetchError::Connection(_) => "connection",
            FetchError::Timeout(_) => "timeout",
            FetchError::Request(_) => "request",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages_are_distinct_per_kind() {
        let errors = [
            FetchError::Http { status: 500, body: "boom".into() },
            FetchError::Connection("refused".into()),
            FetchError::Timeout("slow".into()),
            FetchError::Request("bad".into()),
        ];

        let prefixes: Vec<String> = errors
            .iter()
            .map(|e| e.to_string().split(':').next().unwrap_or_default().to_string())
            .collect();

        for (i, a) in prefixes.iter().enumerate() {
            for b in prefixes.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn http_error_mentions_status() {
        let err = FetchError::Http { status: 404, body: "missing".into() };
        assert!(err.to_string().contains("404"));
        assert_eq!(err.kind(), "http");
    }

    #[test]
    fn not_found_mentions_city() {
        let err = RegistryError::NotFound("Atlantis".into());
        assert!(err.to_string().contains("Atlantis"));
    }
}
