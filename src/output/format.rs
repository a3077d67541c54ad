// format.rs - printf-style number formatting for matrix text output

use crate::error::{CoevolError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// A single printf conversion such as `%12g`, `%.4f` or `%-10.3e`,
/// optionally surrounded by literal text.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormat {
    spec: String,
    prefix: String,
    suffix: String,
    left_align: bool,
    plus_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            spec: "%12g".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            left_align: false,
            plus_sign: false,
            space_sign: false,
            zero_pad: false,
            alternate: false,
            width: 12,
            precision: None,
            conversion: 'g',
        }
    }
}

impl FromStr for NumberFormat {
    type Err = CoevolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.spec)
    }
}

impl NumberFormat {
    pub fn parse(spec: &str) -> Result<Self> {
        let pattern = Regex::new(r"^([^%]*)%([-+ 0#]*)(\d+)?(?:\.(\d*))?([gGeEfFdi])([^%]*)$")
            .map_err(|e| CoevolError::input(format!("Invalid number format pattern: {}", e)))?;
        let caps = pattern.captures(spec).ok_or_else(|| {
            CoevolError::input(format!(
                "Invalid number format '{}'. Expected a printf conversion like %12g, %.4f or %10.3e",
                spec
            ))
        })?;

        let flags = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let width = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| CoevolError::input(format!("Invalid width in '{}'", spec)))?,
            None => 0,
        };
        let precision = match caps.get(4) {
            // A bare '.' means precision 0
            Some(m) if m.as_str().is_empty() => Some(0),
            Some(m) => Some(
                m.as_str()
                    .parse()
                    .map_err(|_| CoevolError::input(format!("Invalid precision in '{}'", spec)))?,
            ),
            None => None,
        };

        Ok(Self {
            spec: spec.to_string(),
            prefix: caps[1].to_string(),
            suffix: caps[6].to_string(),
            left_align: flags.contains('-'),
            plus_sign: flags.contains('+'),
            space_sign: flags.contains(' '),
            zero_pad: flags.contains('0'),
            alternate: flags.contains('#'),
            width,
            precision,
            conversion: caps[5].chars().next().unwrap_or('g'),
        })
    }

    /// Format one value following C printf semantics
    pub fn format(&self, value: f64) -> String {
        let negative = value.is_sign_negative() && !value.is_nan();
        let magnitude = value.abs();
        let uppercase = self.conversion.is_ascii_uppercase();

        let (body, numeric) = if value.is_nan() {
            ("nan".to_string(), false)
        } else if value.is_infinite() {
            ("inf".to_string(), false)
        } else {
            let body = match self.conversion.to_ascii_lowercase() {
                'd' | 'i' => self.format_integer(magnitude),
                'f' => self.format_fixed(magnitude, self.precision.unwrap_or(6)),
                'e' => self.format_exponent(magnitude, self.precision.unwrap_or(6)),
                _ => self.format_general(magnitude),
            };
            (body, true)
        };
        let body = if uppercase { body.to_uppercase() } else { body };

        let sign = if negative && !(numeric && is_zero_integer(self.conversion, magnitude)) {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.len();
        let padded = if len >= self.width {
            format!("{}{}", sign, body)
        } else if self.left_align {
            format!("{}{}{}", sign, body, " ".repeat(self.width - len))
        } else if self.zero_pad && numeric {
            format!("{}{}{}", sign, "0".repeat(self.width - len), body)
        } else {
            format!("{}{}{}", " ".repeat(self.width - len), sign, body)
        };

        format!("{}{}{}", self.prefix, padded, self.suffix)
    }

    fn format_integer(&self, magnitude: f64) -> String {
        let digits = format!("{}", magnitude.trunc() as u64);
        match self.precision {
            Some(p) if digits.len() < p => format!("{}{}", "0".repeat(p - digits.len()), digits),
            _ => digits,
        }
    }

    fn format_fixed(&self, magnitude: f64, precision: usize) -> String {
        let text = format!("{:.*}", precision, magnitude);
        if self.alternate && precision == 0 {
            format!("{}.", text)
        } else {
            text
        }
    }

    fn format_exponent(&self, magnitude: f64, precision: usize) -> String {
        let (mantissa, exponent) = split_exponent(magnitude, precision);
        let mantissa = if self.alternate && precision == 0 {
            format!("{}.", mantissa)
        } else {
            mantissa
        };
        format!("{}{}", mantissa, c_exponent(exponent))
    }

    fn format_general(&self, magnitude: f64) -> String {
        let precision = match self.precision {
            Some(0) => 1,
            Some(p) => p,
            None => 6,
        };
        let (_, exponent) = split_exponent(magnitude, precision - 1);

        if exponent >= -4 && exponent < precision as i32 {
            let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
            let text = format!("{:.*}", decimals, magnitude);
            if self.alternate {
                text
            } else {
                strip_trailing_zeros(&text)
            }
        } else {
            let (mantissa, exponent) = split_exponent(magnitude, precision - 1);
            let mantissa = if self.alternate {
                mantissa
            } else {
                strip_trailing_zeros(&mantissa)
            };
            format!("{}{}", mantissa, c_exponent(exponent))
        }
    }
}

/// `%d` of a value that truncates to zero prints no sign, like C's integer cast
fn is_zero_integer(conversion: char, magnitude: f64) -> bool {
    matches!(conversion, 'd' | 'i') && magnitude.trunc() == 0.0
}

/// Mantissa text and decimal exponent after rounding to `precision` digits
fn split_exponent(magnitude: f64, precision: usize) -> (String, i32) {
    let text = format!("{:.*e}", precision, magnitude);
    match text.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (text, 0),
    }
}

/// C prints at least two exponent digits with an explicit sign
fn c_exponent(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{}{:02}", sign, exponent.abs())
}

fn strip_trailing_zeros(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(spec: &str, value: f64) -> String {
        NumberFormat::parse(spec).unwrap().format(value)
    }

    #[test]
    fn test_default_general_format() {
        assert_eq!(fmt("%12g", 0.5), "         0.5");
        assert_eq!(fmt("%12g", 0.0), "           0");
        assert_eq!(fmt("%12g", 1e-5), "       1e-05");
        assert_eq!(fmt("%12g", 123456789.0), " 1.23457e+08");
        assert_eq!(fmt("%12g", -0.125), "      -0.125");
        assert_eq!(fmt("%g", 100000.0), "100000");
        assert_eq!(fmt("%g", 1000000.0), "1e+06");
        assert_eq!(fmt("%g", 0.0001), "0.0001");
        assert_eq!(NumberFormat::default().to_string(), "%12g");
    }

    #[test]
    fn test_fixed_and_exponent() {
        assert_eq!(fmt("%.3f", 1.0), "1.000");
        assert_eq!(fmt("%08.3f", -1.5), "-001.500");
        assert_eq!(fmt("%-10.2e|", 1234.5), "1.23e+03  |");
        assert_eq!(fmt("%E", 0.00012), "1.200000E-04");
        assert_eq!(fmt("%+.1f", 2.0), "+2.0");
        assert_eq!(fmt("%.f", 2.6), "3");
    }

    #[test]
    fn test_integer_conversion() {
        assert_eq!(fmt("%d", 3.7), "3");
        assert_eq!(fmt("%5d", -42.0), "  -42");
        assert_eq!(fmt("%d", -0.4), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(fmt("%6g", f64::NAN), "   nan");
        assert_eq!(fmt("%G", f64::NEG_INFINITY), "-INF");
    }

    #[test]
    fn test_literal_text_around_conversion() {
        assert_eq!(fmt("%.2f,", 0.5), "0.50,");
    }

    #[test]
    fn test_invalid_formats_rejected() {
        assert!(NumberFormat::parse("12g").is_err());
        assert!(NumberFormat::parse("%s").is_err());
        assert!(NumberFormat::parse("%g %g").is_err());
        assert!(matches!(
            "%q".parse::<NumberFormat>(),
            Err(CoevolError::Input(_))
        ));
    }
}
