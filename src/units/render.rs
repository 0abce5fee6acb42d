// printf conversion semantics for the two arguments of a quantity template

use crate::units::error::FormattingError;
use crate::units::numeric::NumericArg;
use crate::units::template::{Conversion, ConversionSpec, Length};
use std::fmt::{self, Write};

const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Largest precision `format!` accepts
const MAX_FMT_PRECISION: usize = u16::MAX as usize;

/// Render the quantity through its numeric conversion
pub fn write_quantity<W: Write>(
    out: &mut W,
    spec: &ConversionSpec,
    arg: NumericArg,
) -> Result<(), FormattingError> {
    let (prefix, body, zero_fill) = match (spec.conversion, arg) {
        (conversion, NumericArg::Float(value)) if conversion.is_floating() => {
            let (sign, body) = float_body(spec, value);
            (sign.to_string(), body, spec.flags.zero && value.is_finite())
        }
        (conversion, NumericArg::Signed(_) | NumericArg::Unsigned(_))
            if conversion.is_integral() =>
        {
            let (prefix, body) = integer_body(spec, arg);
            let zero_fill = spec.flags.zero && spec.precision.is_none();
            (prefix, body, zero_fill)
        }
        _ => {
            return Err(FormattingError::ArgumentMismatch(format!(
                "'{}' cannot format a {} quantity",
                spec.text,
                arg.kind_name()
            )))
        }
    };

    pad(out, spec, &prefix, &body, zero_fill)
        .map_err(|e| FormattingError::Render(e.to_string()))
}

/// Render the unit label through a %s conversion
pub fn write_unit<W: Write>(out: &mut W, spec: &ConversionSpec, unit: &str) -> fmt::Result {
    let text = match spec.precision {
        Some(max) if max < unit.len() => {
            let mut end = max;
            while !unit.is_char_boundary(end) {
                end -= 1;
            }
            &unit[..end]
        }
        _ => unit,
    };
    pad(out, spec, "", text, false)
}

fn pad<W: Write>(
    out: &mut W,
    spec: &ConversionSpec,
    prefix: &str,
    body: &str,
    zero_fill: bool,
) -> fmt::Result {
    let fill = spec
        .width
        .unwrap_or(0)
        .saturating_sub(prefix.len() + body.len());

    if spec.flags.left {
        out.write_str(prefix)?;
        out.write_str(body)?;
        repeat(out, ' ', fill)
    } else if zero_fill {
        out.write_str(prefix)?;
        repeat(out, '0', fill)?;
        out.write_str(body)
    } else {
        repeat(out, ' ', fill)?;
        out.write_str(prefix)?;
        out.write_str(body)
    }
}

fn repeat<W: Write>(out: &mut W, c: char, count: usize) -> fmt::Result {
    for _ in 0..count {
        out.write_char(c)?;
    }
    Ok(())
}

fn sign(spec: &ConversionSpec, negative: bool) -> &'static str {
    if negative {
        "-"
    } else if spec.flags.plus {
        "+"
    } else if spec.flags.space {
        " "
    } else {
        ""
    }
}

fn integer_body(spec: &ConversionSpec, arg: NumericArg) -> (String, String) {
    let bits = match arg {
        NumericArg::Signed(v) => v as u64,
        NumericArg::Unsigned(u) => u,
        NumericArg::Float(_) => 0,
    };

    let (prefix, digits) = match spec.conversion {
        Conversion::Signed => {
            let value = match spec.length {
                Some(Length::Char) => bits as i8 as i64,
                Some(Length::Short) => bits as i16 as i64,
                _ => bits as i64,
            };
            let digits = value.unsigned_abs().to_string();
            (sign(spec, value < 0).to_string(), digits)
        }
        conversion => {
            let value = match spec.length {
                Some(Length::Char) => bits as u8 as u64,
                Some(Length::Short) => bits as u16 as u64,
                _ => bits,
            };
            match conversion {
                Conversion::Octal => (String::new(), format!("{:o}", value)),
                Conversion::Hex { upper } => {
                    let prefix = match (spec.flags.alt && value != 0, upper) {
                        (true, true) => "0X",
                        (true, false) => "0x",
                        (false, _) => "",
                    };
                    let digits = if upper {
                        format!("{:X}", value)
                    } else {
                        format!("{:x}", value)
                    };
                    (prefix.to_string(), digits)
                }
                _ => (String::new(), value.to_string()),
            }
        }
    };

    let mut digits = match spec.precision {
        Some(0) if digits == "0" => String::new(),
        Some(min) if min > digits.len() => {
            let mut padded = "0".repeat(min - digits.len());
            padded.push_str(&digits);
            padded
        }
        _ => digits,
    };

    if spec.conversion == Conversion::Octal && spec.flags.alt && !digits.starts_with('0') {
        digits.insert(0, '0');
    }

    (prefix, digits)
}

fn float_body(spec: &ConversionSpec, value: f64) -> (&'static str, String) {
    let sign = sign(spec, value.is_sign_negative());
    let abs = value.abs();
    let alt = spec.flags.alt;

    let (body, upper) = match spec.conversion {
        Conversion::Fixed { upper } if abs.is_finite() => {
            let precision = spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
            (fixed(abs, precision, alt), upper)
        }
        Conversion::Exponent { upper } if abs.is_finite() => {
            let precision = spec.precision.unwrap_or(DEFAULT_FLOAT_PRECISION);
            (exponent(abs, precision, alt, upper), upper)
        }
        Conversion::General { upper } if abs.is_finite() => (general(spec, abs, upper), upper),
        Conversion::Fixed { upper }
        | Conversion::Exponent { upper }
        | Conversion::General { upper } => {
            let text = if abs.is_nan() { "nan" } else { "inf" };
            (text.to_string(), upper)
        }
        _ => (String::new(), false),
    };

    if upper {
        (sign, body.to_uppercase())
    } else {
        (sign, body)
    }
}

fn fixed(abs: f64, precision: usize, alt: bool) -> String {
    let mut body = format!("{:.*}", precision.min(MAX_FMT_PRECISION), abs);
    extend_zeros(&mut body, precision);
    if alt && precision == 0 {
        body.push('.');
    }
    body
}

/// Mantissa digits and decimal exponent for `abs` at the given precision
fn exponent_parts(abs: f64, precision: usize) -> (String, i32) {
    let text = format!("{:.*e}", precision.min(MAX_FMT_PRECISION), abs);
    let (mantissa, exp) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let mut mantissa = mantissa.to_string();
    extend_zeros(&mut mantissa, precision);
    (mantissa, exp.parse().unwrap_or(0))
}

/// Pad digits past the `format!` precision limit. An f64 has no non-zero
/// decimal digit that far out, so the padding is exact.
fn extend_zeros(digits: &mut String, precision: usize) {
    if precision > MAX_FMT_PRECISION {
        let extra = precision - MAX_FMT_PRECISION;
        digits.extend(std::iter::repeat('0').take(extra));
    }
}

fn exponent(abs: f64, precision: usize, alt: bool, upper: bool) -> String {
    let (mut mantissa, exp) = exponent_parts(abs, precision);
    if alt && precision == 0 {
        mantissa.push('.');
    }
    join_exponent(&mantissa, exp, upper)
}

fn join_exponent(mantissa: &str, exp: i32, upper: bool) -> String {
    let marker = if upper { 'E' } else { 'e' };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}{}{:02}", mantissa, marker, exp_sign, exp.unsigned_abs())
}

fn general(spec: &ConversionSpec, abs: f64, upper: bool) -> String {
    let precision = match spec.precision {
        None => DEFAULT_FLOAT_PRECISION,
        Some(0) => 1,
        Some(p) => p,
    };
    let alt = spec.flags.alt;

    let exp = if abs == 0.0 {
        0
    } else {
        exponent_parts(abs, precision - 1).1
    };

    let exp = i64::from(exp);
    let limit = i64::try_from(precision).unwrap_or(i64::MAX);
    if exp >= -4 && exp < limit {
        // 0 <= decimals <= precision + 3
        let decimals = (limit - 1 - exp) as usize;
        let mut body = fixed(abs, decimals, false);
        if alt {
            if !body.contains('.') {
                body.push('.');
            }
        } else {
            body = strip_zeros(&body);
        }
        body
    } else {
        let (mantissa, exp) = exponent_parts(abs, precision - 1);
        let mantissa = if alt {
            if mantissa.contains('.') {
                mantissa
            } else {
                format!("{}.", mantissa)
            }
        } else {
            strip_zeros(&mantissa)
        };
        join_exponent(&mantissa, exp, upper)
    }
}

fn strip_zeros(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::units::template::Template;

    fn render_f(format: &str, value: f64) -> String {
        Template::parse(format).unwrap().render(value, "").unwrap()
    }

    fn render_i(format: &str, value: i64) -> String {
        Template::parse(format).unwrap().render(value, "").unwrap()
    }

    #[test]
    fn test_fixed() {
        assert_eq!(render_f("%f%s", 3.5), "3.500000");
        assert_eq!(render_f("%.0f%s", 7.0), "7");
        assert_eq!(render_f("%#.0f%s", 7.0), "7.");
        assert_eq!(render_f("%.3f%s", -0.0), "-0.000");
        assert_eq!(render_f("%+.1f%s", 2.0), "+2.0");
        assert_eq!(render_f("% .1f%s", 2.0), " 2.0");
        assert_eq!(render_f("%+ .1f%s", 2.0), "+2.0");
    }

    #[test]
    fn test_exponent() {
        assert_eq!(render_f("%e%s", 1234.5), "1.234500e+03");
        assert_eq!(render_f("%.2E%s", 0.00025), "2.50E-04");
        assert_eq!(render_f("%.0e%s", 5.0), "5e+00");
        assert_eq!(render_f("%#.0e%s", 5.0), "5.e+00");
        assert_eq!(render_f("%.1e%s", 1.0e150), "1.0e+150");
        assert_eq!(render_f("%e%s", 0.0), "0.000000e+00");
    }

    #[test]
    fn test_general() {
        assert_eq!(render_f("%g%s", 100000.0), "100000");
        assert_eq!(render_f("%g%s", 1000000.0), "1e+06");
        assert_eq!(render_f("%g%s", 0.0001), "0.0001");
        assert_eq!(render_f("%g%s", 0.00001), "1e-05");
        assert_eq!(render_f("%g%s", 3.5), "3.5");
        assert_eq!(render_f("%g%s", 0.0), "0");
        assert_eq!(render_f("%.3G%s", 1234567.0), "1.23E+06");
        assert_eq!(render_f("%#g%s", 3.5), "3.50000");
        assert_eq!(render_f("%.0g%s", 42.0), "4e+01");
    }

    #[test]
    fn test_precision_beyond_format_limit() {
        let text = render_f("%.65536f%s", 1.0);
        assert_eq!(text.len(), 2 + 65536);
        assert!(text.starts_with("1.000"));
        assert!(text.bytes().skip(2).all(|b| b == b'0'));

        let text = render_f("%.70000f%s", 0.1);
        assert_eq!(text.len(), 2 + 70000);
        assert!(text.starts_with("0.1000000000000000055511151231257827"));
        assert!(text.ends_with("000"));

        let text = render_f("%.65536e%s", 1.0);
        assert_eq!(text.len(), 2 + 65536 + 4);
        assert!(text.ends_with("0e+00"));

        assert_eq!(render_f("%.65537g%s", 1.0), "1");
        assert_eq!(render_f("%#.65537g%s", 1.0).len(), 2 + 65536);
        assert_eq!(render_f("%.65537g%s", 1.0e300).len(), 301);
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(render_f("%f%s", f64::INFINITY), "inf");
        assert_eq!(render_f("%F%s", f64::NEG_INFINITY), "-INF");
        assert_eq!(render_f("%e%s", f64::NAN), "nan");
        assert_eq!(render_f("%06f%s", f64::INFINITY), "   inf");
    }

    #[test]
    fn test_width_and_padding() {
        assert_eq!(render_f("%8.2f%s", 3.14159), "    3.14");
        assert_eq!(render_f("%-8.2f|%s", 3.14159), "3.14    |");
        assert_eq!(render_f("%08.2f%s", -3.14159), "-0003.14");
        assert_eq!(render_f("%-08.2f|%s", 3.14159), "3.14    |");
        assert_eq!(render_i("%05d%s", -42), "-0042");
        assert_eq!(render_i("%05.3d%s", 42), "  042");
        assert_eq!(render_i("%3d%s", 12345), "12345");
    }

    #[test]
    fn test_integers() {
        assert_eq!(render_i("%d%s", -17), "-17");
        assert_eq!(render_i("%+i%s", 17), "+17");
        assert_eq!(render_i("%.0d%s", 0), "");
        assert_eq!(render_i("%.4d%s", -7), "-0007");
        assert_eq!(render_i("%u%s", -1), "18446744073709551615");
        assert_eq!(render_i("%hhu%s", -1), "255");
        assert_eq!(render_i("%hd%s", 70000), "4464");
        assert_eq!(render_i("%hhd%s", 300), "44");
    }

    #[test]
    fn test_octal_and_hex() {
        assert_eq!(render_i("%o%s", 8), "10");
        assert_eq!(render_i("%#o%s", 8), "010");
        assert_eq!(render_i("%#o%s", 0), "0");
        assert_eq!(render_i("%x%s", 255), "ff");
        assert_eq!(render_i("%#X%s", 255), "0XFF");
        assert_eq!(render_i("%#x%s", 0), "0");
        assert_eq!(render_i("%#06x%s", 255), "0x00ff");
    }

    #[test]
    fn test_unit_conversion() {
        let render = |format: &str, unit: &str| {
            Template::parse(format).unwrap().render(1, unit).unwrap()
        };
        assert_eq!(render("%d|%5s|", "kg"), "1|   kg|");
        assert_eq!(render("%d|%-5s|", "kg"), "1|kg   |");
        assert_eq!(render("%d|%.2s|", "mmHg"), "1|mm|");
        assert_eq!(render("%d|%.1s|", "°C"), "1||");
        assert_eq!(render("%d|%.2s|", "°C"), "1|°|");
    }
}
