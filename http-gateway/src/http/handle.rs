use crate::http::Server;
use crate::Error;
use ed25519_dalek::{Signature, Verifier};
use model::interaction::Interaction;
use std::sync::Arc;
use warp::hyper::body::Bytes;
use warp::{reply::Response, Rejection, Reply};

pub async fn handle(
    server: Arc<Server>,
    signature: Signature,
    timestamp: String,
    body: Bytes,
) -> Result<Response, Rejection> {
    let timestamp = timestamp.as_bytes();
    let body_slice = &body[..];

    let body_with_timestamp: Vec<u8> = timestamp
        .iter()
        .copied()
        .chain(body_slice.iter().copied())
        .collect();

    if let Err(e) = server
        .config
        .public_key
        .verify(&body_with_timestamp[..], &signature)
    {
        return Err(Error::InvalidSignature(e).into());
    }

    let interaction: Interaction = serde_json::from_slice(&body[..])
        .map_err(Error::JsonError)
        .map_err(warp::reject::custom)?;

    let response = server
        .app
        .handle(interaction)
        .await
        .map_err(Error::Dispatch)
        .map_err(warp::reject::custom)?;

    match response {
        Some(response) => Ok(warp::reply::json(&response).into_response()),
        None => Err(Error::UnsupportedInteraction.into()),
    }
}
