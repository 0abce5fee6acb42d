pub mod catalog;
pub mod units;

pub use units::{to_string, FormattingError, Numeric, Quantity, Template, Unit};
