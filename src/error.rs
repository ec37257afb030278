use crate::net::NetworkError;
use std::{error, fmt, io};
use toml::de;

#[derive(Debug)]
pub enum ClientError {
    WindowError,
    IOError,
    ConfigError,
    NetworkError(NetworkError),
    Quit,
}

impl From<minifb::Error> for ClientError {
    fn from(_value: minifb::Error) -> Self {
        Self::WindowError
    }
}

impl From<io::Error> for ClientError {
    fn from(_value: io::Error) -> Self {
        Self::IOError
    }
}

impl From<de::Error> for ClientError {
    fn from(_value: de::Error) -> Self {
        Self::ConfigError
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(_value: toml::ser::Error) -> Self {
        Self::ConfigError
    }
}

impl From<NetworkError> for ClientError {
    fn from(value: NetworkError) -> Self {
        Self::NetworkError(value)
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::WindowError => write!(f, "Window error"),
            ClientError::IOError => write!(f, "I/O error"),
            ClientError::ConfigError => write!(f, "Invalid configuration"),
            ClientError::NetworkError(err) => write!(f, "{err}"),
            ClientError::Quit => write!(f, "Quit"),
        }
    }
}

impl error::Error for ClientError {}
