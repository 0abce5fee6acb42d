// Rendering of quantities with their units through printf-style templates

pub mod error;
pub mod formatter;
pub mod numeric;
pub mod quantity;
pub mod render;
pub mod template;

#[cfg(test)]
mod tests;

pub use error::FormattingError;
pub use formatter::to_string;
pub use numeric::{Numeric, NumericArg};
pub use quantity::{Quantity, Unit, DEFAULT_FORMAT};
pub use template::{Conversion, ConversionSpec, Flags, Length, Segment, Template};
