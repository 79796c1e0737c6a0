//! Unit conversion utilities
//!
//! All layout math runs in decimal inches. This module converts user input in
//! either system into inches and formats inches back for display, including
//! shop-style fractional inches (`1-1/2`, `3/4`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Default fractional precision (sixteenths of an inch)
pub const DEFAULT_FRACTION_PRECISION: u32 = 16;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl Default for MeasurementSystem {
    fn default() -> Self {
        Self::Imperial
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format a length in inches for display in the given system
pub fn format_length(inches: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3}", inches * MM_PER_INCH),
        MeasurementSystem::Imperial => format!("{:.3}", inches),
    }
}

/// Parse a length string into inches
///
/// Metric input is read as millimeters. Imperial input accepts decimals and
/// fractions, with the whole part separated by a space or a hyphen
/// (`1 1/2`, `1-1/2`, `5/8`).
pub fn parse_length(input: &str, system: MeasurementSystem) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match system {
        MeasurementSystem::Metric => input
            .parse::<f64>()
            .map(|mm| mm / MM_PER_INCH)
            .map_err(|e| e.to_string()),
        MeasurementSystem::Imperial => parse_inches(input),
    }
}

fn parse_inches(input: &str) -> Result<f64, String> {
    if !input.contains('/') {
        return input.parse::<f64>().map_err(|e| e.to_string());
    }

    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, input),
    };

    // "1-1/2" uses a hyphen between whole and fraction
    let body = body.replacen('-', " ", 1);

    let mut total_inches = 0.0;
    for part in body.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err("Invalid fraction format".to_string());
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| "Invalid numerator")?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| "Invalid denominator")?;
            if den == 0.0 {
                return Err("Division by zero".to_string());
            }
            total_inches += num / den;
        } else {
            total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
        }
    }

    Ok(if negative { -total_inches } else { total_inches })
}

/// Format decimal inches as a shop fraction (`1-1/2`, `3/4`, `12`)
///
/// The fractional part is rounded to the nearest `1/precision` and reduced.
pub fn to_fraction(inches: f64, precision: u32) -> String {
    let precision = precision.max(1);
    let sign = if inches < 0.0 { "-" } else { "" };
    let value = inches.abs();

    let mut whole = value.floor() as u64;
    let mut numerator = ((value - value.floor()) * precision as f64).round() as u64;
    let mut denominator = precision as u64;

    if numerator == denominator {
        whole += 1;
        numerator = 0;
    }

    if numerator == 0 {
        return format!("{}{}", if whole == 0 { "" } else { sign }, whole);
    }

    let divisor = gcd(numerator, denominator);
    numerator /= divisor;
    denominator /= divisor;

    if whole > 0 {
        format!("{}{}-{}/{}", sign, whole, numerator, denominator)
    } else {
        format!("{}{}/{}", sign, numerator, denominator)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Get the unit label for the given system ("mm" or "in")
pub fn get_unit_label(system: MeasurementSystem) -> &'static str {
    match system {
        MeasurementSystem::Metric => "mm",
        MeasurementSystem::Imperial => "in",
    }
}
