pub mod body_definition;
pub mod rigid_body;

pub use body_definition::BodyDefinition;
pub use rigid_body::{Body, BodyHandle, BodyType};
