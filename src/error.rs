use thiserror::Error;

/// All error types this library may produce.
#[derive(Error, Debug)]
pub enum HueError {
    /// The HTTP transport failed (DNS, connection refused, timeout, ...).
    #[error("transport error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// A response body could not be decoded as the expected JSON shape.
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The bridge answered a state change with a non-success HTTP status.
    #[error("bridge answered with status {code}")]
    BridgeStatus { code: u16 },

    /// The bridge returned one of its structured v1 error objects.
    #[error("bridge error {code}: {msg}")]
    BridgeError { code: usize, msg: String },

    /// No light with the given name is known to the bridge.
    #[error("light not found: {name}")]
    LightNotFound { name: String },

    #[error("protocol error: {msg}")]
    ProtocolError { msg: String },
}

impl HueError {
    pub fn protocol_err(msg: impl Into<String>) -> HueError {
        HueError::ProtocolError { msg: msg.into() }
    }
}

pub type Result<T> = std::result::Result<T, HueError>;
