use fti_core::Coordinate;
use serde_json::Value;

/// Reads a `[longitude, latitude]` pair.
///
/// Anything but a two-element array of numbers yields `None`; the values
/// themselves are not range checked.
pub fn parse_location(value: &Value) -> Option<Coordinate> {
    match value.as_array()?.as_slice() {
        [x, y] => Some(Coordinate::new(x.as_f64()?, y.as_f64()?)),
        _ => None,
    }
}
