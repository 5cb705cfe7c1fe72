use thiserror::Error;

/// Everything the poll loop can observe going wrong in one cycle.
///
/// Delivery failures are not here: the Telegram boundary swallows them and
/// the loop only sees a delivered/not-delivered bool.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("endpoint {url} is unavailable, response code {status}")]
    EndpointUnavailable { url: String, status: u16 },

    #[error("request to the homework API failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("the API returned an empty response")]
    EmptyResponse,

    #[error("the API response has an unexpected shape: {what}")]
    Malformed { what: &'static str },

    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),
}
