//! Declarative option/command mapping: describe a command's option shape once
//! as a static schema, export the wire schema from it for publishing, and bind
//! live payloads against it into a plain resolved-value view.

mod schema;
pub use schema::{CommandSchema, FieldSpec};

mod bind;
pub use bind::{bind, BoundCommand};
