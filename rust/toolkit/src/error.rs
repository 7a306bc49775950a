#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolkitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("division by zero: reserve_in and amount_in are both zero")]
    DivisionByZero,
    #[error("insufficient liquidity: amount_out must be below reserve_out")]
    InsufficientLiquidity,
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("artifact error: {0}")]
    Artifact(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("serde error: {0}")]
    Serde(String),
}

impl From<serde_json::Error> for ToolkitError {
    fn from(err: serde_json::Error) -> Self {
        ToolkitError::Serde(err.to_string())
    }
}

impl From<toml::de::Error> for ToolkitError {
    fn from(err: toml::de::Error) -> Self {
        ToolkitError::Config(err.to_string())
    }
}

impl From<std::io::Error> for ToolkitError {
    fn from(err: std::io::Error) -> Self {
        ToolkitError::Io(err.to_string())
    }
}
