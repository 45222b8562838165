pub mod circle;
pub mod polygon;

// Re-export the specific shape types
pub use circle::Circle;
pub use polygon::Polygon;
