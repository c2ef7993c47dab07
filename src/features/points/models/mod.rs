pub mod point;

pub use point::{NewPoint, PointOfInterest, PointUpdate};
