mod snowflake;
pub use snowflake::Snowflake;

mod user;
pub use user::User;

mod member;
pub use member::Member;

mod role;
pub use role::Role;

mod channel;
pub use channel::{Channel, ChannelType};

mod message;
pub use message::Message;

pub mod interaction;

mod util;
