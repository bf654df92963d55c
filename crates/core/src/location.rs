use serde::{Deserialize, Serialize};

/// A geographic position taken from a provider row. `x` is longitude and `y`
/// is latitude; no range checking is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y }
    }
}
