mod driver;

pub use driver::{AnimationDriver, DEFAULT_MAX_EXTRUSION, DEFAULT_MIN_EXTRUSION};
