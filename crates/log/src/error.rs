use crate::signature::ParamKind;
use thiserror::Error;

pub type TraceResult<A> = Result<A, TraceError>;

pub type ConfigResult<A> = Result<A, ConfigError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error(transparent)]
    InvalidSignature(#[from] SignatureError),

    #[error("failed to render the arguments of function {function}")]
    Render { function: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("function name must not be empty")]
    EmptyFunctionName,

    #[error("function {function} declares a parameter with an empty name")]
    EmptyParameterName { function: String },

    #[error("function {function} declares parameter {param} more than once")]
    DuplicateParameter { function: String, param: String },

    #[error("function {function} declares {kind:?} parameter {param} after a {previous:?} parameter")]
    MisorderedParameter {
        function: String,
        param: String,
        kind: ParamKind,
        previous: ParamKind,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can't read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad format: {0}")]
    BadFormat(#[from] serde_yaml::Error),
}
