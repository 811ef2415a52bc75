use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub(crate) enum ApiError {
    /// The request never produced a response (backend down, CORS, aborted).
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with `success: false` or a non-2xx status.
    /// `message` is the server's text, passed through unmodified.
    #[error("{message}")]
    Application { status: u16, message: String },

    /// A 2xx response whose body is not a valid envelope.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn transport(e: impl std::fmt::Display) -> Self {
        Self::Transport(e.to_string())
    }

    pub(crate) fn status_only(status: u16) -> Self {
        Self::Application {
            status,
            message: format!("请求失败 ({status})"),
        }
    }

    /// Server text for application failures, `None` for transport/decode.
    pub(crate) fn server_message(&self) -> Option<&str> {
        match self {
            Self::Application { message, .. } => Some(message),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Uniform `{success, message, data}` wrapper of every JSON endpoint.
#[derive(Deserialize, Debug)]
pub(crate) struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub(crate) fn into_result(self, status: u16) -> ApiResult<Option<T>> {
        if self.success && is_success(status) {
            return Ok(self.data);
        }
        match self.message {
            Some(message) if !message.is_empty() => Err(ApiError::Application { status, message }),
            _ => Err(ApiError::status_only(status)),
        }
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Turns a raw status + body into the envelope's payload.
///
/// A non-2xx body that is not an envelope still counts as an application
/// failure; only 2xx garbage is a decode error.
pub(crate) fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<Option<T>> {
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => envelope.into_result(status),
        Err(_) if !is_success(status) => Err(ApiError::status_only(status)),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}
