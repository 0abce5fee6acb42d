use crate::units::error::FormattingError;
use crate::units::formatter;
use crate::units::numeric::{Numeric, NumericArg};
use crate::units::render;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;

lazy_static! {
    /// One printf conversion: %[flags][width][.precision][length]conversion
    /// The conversion character is optional so a dangling '%' is reported instead of skipped
    static ref SPEC_PATTERN: Regex = Regex::new(
        r"%(?P<flags>[-+ #0]*)(?P<width>\*|[0-9]+)?(?:\.(?P<precision>\*|[0-9]*))?(?P<length>hh|ll|[hlLjzt])?(?P<conv>(?s:.))?"
    ).unwrap();
}

/// Widths and precisions are bounded like printf's int-sized output count
pub const MAX_FIELD: usize = i32::MAX as usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub left: bool,
    pub plus: bool,
    pub space: bool,
    pub alt: bool,
    pub zero: bool,
}

impl Flags {
    fn parse(text: &str) -> Self {
        let mut flags = Flags::default();
        for c in text.chars() {
            match c {
                '-' => flags.left = true,
                '+' => flags.plus = true,
                ' ' => flags.space = true,
                '#' => flags.alt = true,
                '0' => flags.zero = true,
                _ => {}
            }
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Char,
    Short,
    Long,
    LongLong,
    LongDouble,
    IntMax,
    Size,
    PtrDiff,
}

impl Length {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "hh" => Some(Length::Char),
            "h" => Some(Length::Short),
            "l" => Some(Length::Long),
            "ll" => Some(Length::LongLong),
            "L" => Some(Length::LongDouble),
            "j" => Some(Length::IntMax),
            "z" => Some(Length::Size),
            "t" => Some(Length::PtrDiff),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// %d, %i
    Signed,
    /// %u
    Unsigned,
    /// %o
    Octal,
    /// %x, %X
    Hex { upper: bool },
    /// %f, %F
    Fixed { upper: bool },
    /// %e, %E
    Exponent { upper: bool },
    /// %g, %G
    General { upper: bool },
    /// %s
    Str,
}

impl Conversion {
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            Conversion::Signed | Conversion::Unsigned | Conversion::Octal | Conversion::Hex { .. }
        )
    }

    pub fn is_floating(&self) -> bool {
        matches!(
            self,
            Conversion::Fixed { .. } | Conversion::Exponent { .. } | Conversion::General { .. }
        )
    }

    fn accepts_length(&self, length: Length) -> bool {
        if self.is_integral() {
            length != Length::LongDouble
        } else if self.is_floating() {
            matches!(length, Length::Long | Length::LongDouble)
        } else {
            false
        }
    }
}

/// A single parsed conversion specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSpec {
    pub flags: Flags,
    pub width: Option<usize>,
    pub precision: Option<usize>,
    pub length: Option<Length>,
    pub conversion: Conversion,
    /// The specification as written, e.g. "%-8.2f"
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Quantity(ConversionSpec),
    Unit(ConversionSpec),
}

enum Piece {
    Literal(String),
    Spec(ConversionSpec),
}

/// A validated quantity template: literal text plus exactly one numeric
/// conversion followed by one string conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(format: &str) -> Result<Self, FormattingError> {
        let result = parse_pieces(format).and_then(|pieces| Self::validate(format, pieces));
        if let Err(ref e) = result {
            log::debug!("Rejected template {:?}: {}", format, e);
        }
        result
    }

    fn validate(format: &str, pieces: Vec<Piece>) -> Result<Self, FormattingError> {
        let found = pieces
            .iter()
            .filter(|p| matches!(p, Piece::Spec(_)))
            .count();
        if found != 2 {
            return Err(FormattingError::SpecifierCount { found });
        }

        let mut segments = Vec::with_capacity(pieces.len());
        let mut seen = 0;
        for piece in pieces {
            match piece {
                Piece::Literal(text) => segments.push(Segment::Literal(text)),
                Piece::Spec(spec) => {
                    if let Some(length) = spec.length {
                        if !spec.conversion.accepts_length(length) {
                            return Err(FormattingError::ArgumentMismatch(format!(
                                "length modifier in '{}' does not fit its conversion",
                                spec.text
                            )));
                        }
                    }
                    if seen == 0 {
                        if spec.conversion == Conversion::Str {
                            return Err(FormattingError::ArgumentMismatch(format!(
                                "first conversion '{}' must be numeric",
                                spec.text
                            )));
                        }
                        segments.push(Segment::Quantity(spec));
                    } else {
                        if spec.conversion != Conversion::Str {
                            return Err(FormattingError::ArgumentMismatch(format!(
                                "second conversion '{}' must be %s for the unit",
                                spec.text
                            )));
                        }
                        segments.push(Segment::Unit(spec));
                    }
                    seen += 1;
                }
            }
        }

        Ok(Self {
            source: format.to_string(),
            segments,
        })
    }

    /// The template text this was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn quantity_spec(&self) -> Option<&ConversionSpec> {
        self.segments.iter().find_map(|s| match s {
            Segment::Quantity(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn unit_spec(&self) -> Option<&ConversionSpec> {
        self.segments.iter().find_map(|s| match s {
            Segment::Unit(spec) => Some(spec),
            _ => None,
        })
    }

    /// True when the quantity conversion expects an integer (%d, %u, %x, ...)
    pub fn expects_integer(&self) -> bool {
        self.quantity_spec()
            .map(|spec| spec.conversion.is_integral())
            .unwrap_or(false)
    }

    /// Render into any sink. Fails without a usable result if the quantity
    /// kind does not match the numeric conversion.
    pub fn write_to<W: fmt::Write>(
        &self,
        out: &mut W,
        quantity: NumericArg,
        unit: &str,
    ) -> Result<(), FormattingError> {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out
                    .write_str(text)
                    .map_err(|e| FormattingError::Render(e.to_string()))?,
                Segment::Quantity(spec) => render::write_quantity(out, spec, quantity)?,
                Segment::Unit(spec) => render::write_unit(out, spec, unit)
                    .map_err(|e| FormattingError::Render(e.to_string()))?,
            }
        }
        Ok(())
    }

    /// Exact number of bytes `render` would produce
    pub fn measure<T: Numeric>(&self, quantity: T, unit: &str) -> Result<usize, FormattingError> {
        formatter::measure(self, quantity.to_arg(), unit)
    }

    pub fn render<T: Numeric>(&self, quantity: T, unit: &str) -> Result<String, FormattingError> {
        formatter::render(self, quantity.to_arg(), unit)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_pieces(format: &str) -> Result<Vec<Piece>, FormattingError> {
    let mut pieces = Vec::new();
    let mut literal = String::new();
    let mut last = 0;

    for caps in SPEC_PATTERN.captures_iter(format) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        literal.push_str(&format[last..whole.start()]);
        last = whole.end();

        match parse_spec(&caps, whole.as_str())? {
            Some(spec) => {
                if !literal.is_empty() {
                    pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                }
                pieces.push(Piece::Spec(spec));
            }
            // %% and friends
            None => literal.push('%'),
        }
    }

    literal.push_str(&format[last..]);
    if !literal.is_empty() {
        pieces.push(Piece::Literal(literal));
    }
    Ok(pieces)
}

/// Returns None for a literal percent sign
fn parse_spec(caps: &Captures<'_>, text: &str) -> Result<Option<ConversionSpec>, FormattingError> {
    let conv = match caps.name("conv").and_then(|m| m.as_str().chars().next()) {
        Some(c) => c,
        None => {
            return Err(FormattingError::InvalidTemplate(format!(
                "incomplete conversion '{}' at end of template",
                text
            )))
        }
    };

    let conversion = match conv {
        '%' => return Ok(None),
        'd' | 'i' => Conversion::Signed,
        'u' => Conversion::Unsigned,
        'o' => Conversion::Octal,
        'x' => Conversion::Hex { upper: false },
        'X' => Conversion::Hex { upper: true },
        'f' => Conversion::Fixed { upper: false },
        'F' => Conversion::Fixed { upper: true },
        'e' => Conversion::Exponent { upper: false },
        'E' => Conversion::Exponent { upper: true },
        'g' => Conversion::General { upper: false },
        'G' => Conversion::General { upper: true },
        's' => Conversion::Str,
        'a' | 'A' | 'c' | 'n' | 'p' => {
            return Err(FormattingError::InvalidTemplate(format!(
                "conversion '{}' is not supported",
                text
            )))
        }
        other => {
            return Err(FormattingError::InvalidTemplate(format!(
                "unknown conversion character {:?} in '{}'",
                other, text
            )))
        }
    };

    let width = parse_count(caps.name("width").map(|m| m.as_str()), text)?;
    let precision = match caps.name("precision") {
        // "%.f": the dot alone means zero
        Some(m) if m.as_str().is_empty() => Some(0),
        Some(m) => parse_count(Some(m.as_str()), text)?,
        None => None,
    };

    Ok(Some(ConversionSpec {
        flags: Flags::parse(caps.name("flags").map(|m| m.as_str()).unwrap_or("")),
        width,
        precision,
        length: caps.name("length").and_then(|m| Length::parse(m.as_str())),
        conversion,
        text: text.to_string(),
    }))
}

fn parse_count(value: Option<&str>, text: &str) -> Result<Option<usize>, FormattingError> {
    match value {
        None => Ok(None),
        Some("*") => Err(FormattingError::InvalidTemplate(format!(
            "'*' in '{}' would consume an extra argument",
            text
        ))),
        Some(digits) => match digits.parse::<usize>() {
            Ok(count) if count <= MAX_FIELD => Ok(Some(count)),
            Ok(_) => Err(FormattingError::InvalidTemplate(format!(
                "width or precision in '{}' exceeds {}",
                text, MAX_FIELD
            ))),
            Err(e) => Err(FormattingError::InvalidTemplate(format!(
                "bad number in '{}': {}",
                text, e
            ))),
        },
    }
}
