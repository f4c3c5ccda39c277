use serde::Serializer;
use std::fmt::Debug;
use warp::reject::Reject;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid ed25519 signature: {0}")]
    InvalidSignatureFormat(#[from] hex::FromHexError),

    #[error("invalid ed25519 signature: {0}")]
    InvalidSignature(#[from] ed25519_dalek::SignatureError),

    #[error("error while decoding json payload: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("error while dispatching interaction: {0}")]
    Dispatch(#[from] dispatch::DispatchError),

    #[error("unsupported interaction type")]
    UnsupportedInteraction,
}

impl Reject for Error {}

impl serde::Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}", self)[..])
    }
}
