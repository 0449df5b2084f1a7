use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("dns failure: {0}")]
    Dns(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("too many redirects")]
    RedirectLoop,

    #[error("http error {status}")]
    Http { status: reqwest::StatusCode },

    #[error("io error: {0}")]
    Io(String),

    #[error("failed to build http client: {0}")]
    ClientBuild(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl FetchError {
    /// Status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened below HTTP (no usable response).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Dns(_)
                | Self::Connect(_)
                | Self::ConnectTimeout
                | Self::RequestTimeout
                | Self::RedirectLoop
                | Self::Io(_)
                | Self::Unknown(_)
        )
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if err.is_redirect() {
            Self::RedirectLoop
        } else if let Some(status) = err.status() {
            Self::Http { status }
        } else if err.is_connect() {
            // reqwest folds resolver failures into connect errors
            let message = error_chain(&err);
            if message.contains("dns") || message.contains("resolve") {
                Self::Dns(message)
            } else {
                Self::Connect(message)
            }
        } else if err.is_body() || err.is_decode() {
            Self::Io(err.to_string())
        } else if err.is_request() {
            Self::Connect(error_chain(&err))
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
