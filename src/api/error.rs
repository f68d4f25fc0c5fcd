#[derive(Debug)]
pub enum ApiError {
    InvalidOrigin(String),
    Transport(reqwest::Error),
    Decode(serde_json::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOrigin(msg) => write!(f, "Invalid node origin: {}", msg),
            Self::Transport(err) => write!(f, "Node request failed: {}", err),
            Self::Decode(err) => write!(f, "Invalid node response body: {}", err),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidOrigin(_) => None,
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err)
    }
}
