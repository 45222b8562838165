pub mod engine;
pub mod physics_world;

pub use engine::{Engine, EngineConfig};
pub use physics_world::World;
