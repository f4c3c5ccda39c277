use crate::http::response::ErrorResponse;
use crate::{Config, Error};
use dispatch::App;
use ed25519_dalek::Signature;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Json;
use warp::{Filter, Rejection};

pub struct Server {
    pub config: Config,
    pub app: App,
}

impl Server {
    pub fn new(config: Config, app: App) -> Server {
        Server { config, app }
    }

    pub async fn start(self) -> Result<(), Error> {
        let address: SocketAddr = self.config.server_addr.clone().parse().unwrap();

        let filter = Arc::new(self).filter_handle();

        warp::serve(filter).run(address).await;

        Ok(())
    }

    fn filter_handle(
        self: Arc<Self>,
    ) -> impl Filter<Extract = impl warp::Reply, Error = Rejection> + Clone {
        warp::post()
            .and(warp::path::end())
            .and(warp::any().map(move || self.clone()))
            .and(Server::parse_signature())
            .and(warp::header("x-signature-timestamp"))
            .and(warp::body::bytes())
            .and_then(super::handle)
            .with(warp::log("warp"))
            .recover(|error: Rejection| async move {
                if let Some(err) = error.find::<Error>() {
                    let json: Json = ErrorResponse::from(err).into();

                    let status_code = match err {
                        Error::InvalidSignature(..) | Error::InvalidSignatureFormat(..) => {
                            StatusCode::UNAUTHORIZED
                        }
                        Error::JsonError(..) => StatusCode::BAD_REQUEST,
                        Error::UnsupportedInteraction => StatusCode::NOT_IMPLEMENTED,
                        _ => StatusCode::INTERNAL_SERVER_ERROR,
                    };

                    Ok(warp::reply::with_status(json, status_code))
                } else {
                    Err(error)
                }
            })
    }

    fn parse_signature() -> impl Filter<Extract = (Signature,), Error = Rejection> + Clone {
        warp::header("x-signature-ed25519").and_then(|signature: String| async move {
            let mut bytes = [0u8; 64];
            if let Err(e) = hex::decode_to_slice(signature, &mut bytes) {
                return Err(warp::reject::custom(Error::InvalidSignatureFormat(e)));
            }

            Ok(Signature::new(bytes.into()))
        })
    }
}
