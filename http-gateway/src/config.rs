use ed25519_dalek::PublicKey;
use model::Snowflake;
use std::env;

pub struct Config {
    pub server_addr: Box<str>,
    pub application_id: Snowflake,
    pub bot_token: Option<Box<str>>,
    pub public_key: PublicKey,
}

impl Config {
    pub fn from_envvar() -> Config {
        Config {
            server_addr: Config::get_envvar("SERVER_ADDR").into_boxed_str(),
            application_id: Snowflake(Config::get_envvar("APPLICATION_ID").parse().unwrap()),
            bot_token: Config::get_envvar_or_none("BOT_TOKEN").map(String::into_boxed_str),
            public_key: Config::read_public_key(),
        }
    }

    pub fn get_envvar(name: &str) -> String {
        let var = env::var(name).expect(&format!("envvar {} was missing!", name)[..]);

        match var.strip_suffix("\r") {
            Some(s) => s.to_owned(),
            None => var,
        }
    }

    pub fn get_envvar_or_none(name: &str) -> Option<String> {
        let var = match env::var(name) {
            Ok(var) => var,
            Err(_) => return None,
        };

        let var = match var.strip_suffix("\r") {
            Some(s) => s.to_owned(),
            None => var,
        };

        Some(var)
    }

    fn read_public_key() -> PublicKey {
        let key = Config::get_envvar("PUBLIC_KEY");

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(key, &mut bytes).unwrap();

        PublicKey::from_bytes(&bytes).unwrap()
    }
}
