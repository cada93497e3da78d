use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum ScrapeError {
    Network(String),
    Status(u16, String),
    HtmlParse(String),
    JsonParse(String),
    UnexpectedShape(String),
    Config(String),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(msg) => write!(f, "Network error: {msg}"),
            ScrapeError::Status(code, url) => write!(f, "HTTP {code} from {url}"),
            ScrapeError::HtmlParse(msg) => write!(f, "HTML parse error: {msg}"),
            ScrapeError::JsonParse(msg) => write!(f, "JSON parse error: {msg}"),
            ScrapeError::UnexpectedShape(msg) => write!(f, "Unexpected data shape: {msg}"),
            ScrapeError::Config(msg) => write!(f, "Config error: {msg}"),
        }
    }
}

impl Error for ScrapeError {}
