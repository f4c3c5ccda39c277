use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("error while sending request: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Api { status: StatusCode, body: Box<str> },
}
