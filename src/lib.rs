pub mod document;
pub mod error;
pub mod join;
pub mod math;
pub mod model;
pub mod rooms;

pub use error::{MuralisError, Result};
