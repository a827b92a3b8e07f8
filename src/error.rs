use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid stack name {name}\n{reason}")]
    InvalidStackName { name: String, reason: &'static str },

    #[error("Invalid construct id '{0}'. Ids must be non-empty and cannot contain '/'")]
    InvalidId(String),

    #[error("Duplicate logical id '{0}'. Every resource in a stack needs a unique logical id")]
    DuplicateLogicalId(String),

    #[error("Duplicate output '{0}'. Every output in a stack needs a unique name")]
    DuplicateOutput(String),

    #[error("Duplicate cloudfront function name '{0}'. Function names must be unique within an account")]
    DuplicateFunctionName(String),

    #[error("'{logical_id}' references '{target}', which is not a resource in this stack")]
    UnresolvedReference { logical_id: String, target: String },

    #[error("Validation failed on resource '{logical_id}'\n{reason}")]
    Validation { logical_id: String, reason: String },

    #[error("Invalid duration '{0}'. Expected a number followed by one of s, m, h, d")]
    InvalidDuration(String),

    #[error("Duration {0} cannot be converted into a whole number of days")]
    FractionalDays(String),

    #[error("Invalid domain name '{name}'. {reason}")]
    InvalidDomainName { name: String, reason: &'static str },

    #[error("Invalid certificate ARN '{0}'. Must not be empty")]
    InvalidCertificateArn(String),

    #[error("Invalid edge handler: {0}")]
    InvalidEdgeHandler(String),

    #[error("Failed to read config file {path:?}\n{source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
