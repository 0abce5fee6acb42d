use crate::units::error::FormattingError;
use crate::units::numeric::{Numeric, NumericArg};
use crate::units::template::Template;
use std::fmt;

/// Sink that stores nothing and only counts the bytes written to it
#[derive(Debug, Default)]
struct ByteCounter {
    len: usize,
}

impl fmt::Write for ByteCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.len += s.len();
        Ok(())
    }
}

/// Format a quantity and its unit label with a printf-style template
/// (e.g. `to_string(3.5, "m", "%.2f %s")` gives `"3.50 m"`).
///
/// The template must contain exactly two conversions: a numeric one for the
/// quantity followed by `%s` for the unit.
pub fn to_string<T: Numeric>(
    quantity: T,
    unit: &str,
    format: &str,
) -> Result<String, FormattingError> {
    let template = Template::parse(format)?;
    render(&template, quantity.to_arg(), unit)
}

/// Dry run: the exact byte length the template produces for these arguments
pub fn measure(
    template: &Template,
    quantity: NumericArg,
    unit: &str,
) -> Result<usize, FormattingError> {
    let mut counter = ByteCounter::default();
    template.write_to(&mut counter, quantity, unit)?;
    Ok(counter.len)
}

/// Size the output with a dry run, reserve exactly that much, then render
pub fn render(
    template: &Template,
    quantity: NumericArg,
    unit: &str,
) -> Result<String, FormattingError> {
    let expected = measure(template, quantity, unit)?;
    log::trace!(
        "Dry run of {:?} with {:?} measured {} bytes",
        template.source(),
        unit,
        expected
    );

    let mut buf = String::new();
    buf.try_reserve_exact(expected)
        .map_err(|e| FormattingError::Allocation(e.to_string()))?;
    template.write_to(&mut buf, quantity, unit)?;

    if buf.len() != expected {
        return Err(FormattingError::LengthMismatch {
            expected,
            actual: buf.len(),
        });
    }
    Ok(buf)
}
