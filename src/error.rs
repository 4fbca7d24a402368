use thiserror::Error;

/// Errors raised while constructing an index or a query rectangle.
///
/// All variants indicate a caller contract violation detected synchronously
/// at construction; searching a validly built tree cannot fail.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Error {
    /// A rectangle was requested with min above max on some axis
    #[error("invalid rectangle bounds: ({xmin}, {ymin}) to ({xmax}, {ymax})")]
    InvalidBounds {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },
    /// An input point carried a NaN or infinite coordinate
    #[error("input point {index} has a non-finite coordinate ({x}, {y})")]
    InvalidInput { index: usize, x: f64, y: f64 },
}
