use super::{Command, Outcome};
use std::{error, fmt};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    Transport,
    Status(u16),
    Decode,
    Disconnected,
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            NetworkError::Status(status.as_u16())
        } else if err.is_decode() {
            NetworkError::Decode
        } else {
            NetworkError::Transport
        }
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(_err: serde_json::Error) -> Self {
        NetworkError::Decode
    }
}

impl From<image::ImageError> for NetworkError {
    fn from(_err: image::ImageError) -> Self {
        NetworkError::Decode
    }
}

impl From<mpsc::error::SendError<Outcome>> for NetworkError {
    fn from(_err: mpsc::error::SendError<Outcome>) -> Self {
        NetworkError::Disconnected
    }
}

impl From<mpsc::error::TrySendError<Command>> for NetworkError {
    fn from(_err: mpsc::error::TrySendError<Command>) -> Self {
        NetworkError::Disconnected
    }
}

impl error::Error for NetworkError {}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        use NetworkError::*;
        match self {
            Transport => write!(f, "Network error"),
            Status(code) => write!(f, "Server responded with status {code}"),
            Decode => write!(f, "Malformed server response"),
            Disconnected => write!(f, "Disconnected"),
        }
    }
}
