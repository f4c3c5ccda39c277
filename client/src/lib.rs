mod error;
pub use error::ClientError;

mod rest;
pub use rest::RestClient;
