pub mod angle;
pub mod distance;
pub mod intersect;
pub mod polygon;

/// 2D point type, in project length units (millimetres).
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Threshold on the normalized cross magnitude for parallel and collinear
/// direction tests.
pub const DIRECTION_EPS: f64 = 0.01;
