//! Resistor color-code decoding
//!
//! The ten digit colors follow the standard table (black = 0 ... white = 9).
//! A color is used as a significant digit, or as a power-of-ten exponent when
//! it sits in the multiplier position.

use crate::error::{CalcError, Result};
use crate::units::Ohms;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Digit color of a resistor band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Grey,
    White,
}

impl ColorBand {
    /// Lookup table, indexed by digit
    pub const ALL: [ColorBand; 10] = [
        ColorBand::Black,
        ColorBand::Brown,
        ColorBand::Red,
        ColorBand::Orange,
        ColorBand::Yellow,
        ColorBand::Green,
        ColorBand::Blue,
        ColorBand::Violet,
        ColorBand::Grey,
        ColorBand::White,
    ];

    pub fn digit(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorBand::Black => "black",
            ColorBand::Brown => "brown",
            ColorBand::Red => "red",
            ColorBand::Orange => "orange",
            ColorBand::Yellow => "yellow",
            ColorBand::Green => "green",
            ColorBand::Blue => "blue",
            ColorBand::Violet => "violet",
            ColorBand::Grey => "grey",
            ColorBand::White => "white",
        }
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorBand {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase();
        if name == "gray" {
            return Ok(ColorBand::Grey);
        }
        ColorBand::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| CalcError::invalid_input(format!("unknown band color '{}'", s.trim())))
    }
}

/// Tolerance band color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tolerance {
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Grey,
    Gold,
    Silver,
}

impl Tolerance {
    /// Tolerance as ± percent
    pub fn percent(self) -> f64 {
        match self {
            Tolerance::Brown => 1.0,
            Tolerance::Red => 2.0,
            Tolerance::Orange => 0.05,
            Tolerance::Yellow => 0.02,
            Tolerance::Green => 0.5,
            Tolerance::Blue => 0.25,
            Tolerance::Violet => 0.1,
            Tolerance::Grey => 0.05,
            Tolerance::Gold => 5.0,
            Tolerance::Silver => 10.0,
        }
    }
}

impl FromStr for Tolerance {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "brown" => Ok(Tolerance::Brown),
            "red" => Ok(Tolerance::Red),
            "orange" => Ok(Tolerance::Orange),
            "yellow" => Ok(Tolerance::Yellow),
            "green" => Ok(Tolerance::Green),
            "blue" => Ok(Tolerance::Blue),
            "violet" => Ok(Tolerance::Violet),
            "grey" | "gray" => Ok(Tolerance::Grey),
            "gold" => Ok(Tolerance::Gold),
            "silver" => Ok(Tolerance::Silver),
            _ => Err(CalcError::invalid_input(format!(
                "'{}' is not a tolerance band color",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "±{}%", self.percent())
    }
}

fn significant(digits: &[ColorBand]) -> f64 {
    digits
        .iter()
        .fold(0.0, |acc, band| acc * 10.0 + f64::from(band.digit()))
}

fn apply_multiplier(digits: &[ColorBand], multiplier: ColorBand) -> Ohms {
    Ohms(significant(digits) * 10f64.powi(i32::from(multiplier.digit())))
}

/// Value of a 4-band resistor: two digits and a multiplier
pub fn decode_4_band(bands: [ColorBand; 3]) -> Ohms {
    let [d1, d2, m] = bands;
    let value = apply_multiplier(&[d1, d2], m);
    debug!(bands = ?bands, ohms = value.value(), "decode_4_band");
    value
}

/// Value of a 5-band resistor: three digits and a multiplier
pub fn decode_5_band(bands: [ColorBand; 4]) -> Ohms {
    let [d1, d2, d3, m] = bands;
    let value = apply_multiplier(&[d1, d2, d3], m);
    debug!(bands = ?bands, ohms = value.value(), "decode_5_band");
    value
}

/// Parse every color name, failing on the first unknown one
pub fn parse_bands<S: AsRef<str>>(colors: &[S]) -> Result<Vec<ColorBand>> {
    colors.iter().map(|c| c.as_ref().parse()).collect()
}

/// Decode color names: 3 colors as a 4-band code, 4 colors as a 5-band code
pub fn decode_colors<S: AsRef<str>>(colors: &[S]) -> Result<Ohms> {
    let bands = parse_bands(colors)?;
    match bands.as_slice() {
        &[a, b, c] => Ok(decode_4_band([a, b, c])),
        &[a, b, c, d] => Ok(decode_5_band([a, b, c, d])),
        _ => Err(CalcError::invalid_input(format!(
            "expected 3 or 4 band colors, got {}",
            bands.len()
        ))),
    }
}

/// Physical band layout of a resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BandLayout {
    FourBand,
    FiveBand,
}

impl BandLayout {
    /// Colors needed for the value, tolerance band excluded
    pub fn value_bands(self) -> usize {
        match self {
            BandLayout::FourBand => 3,
            BandLayout::FiveBand => 4,
        }
    }
}

impl fmt::Display for BandLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandLayout::FourBand => f.write_str("4-band"),
            BandLayout::FiveBand => f.write_str("5-band"),
        }
    }
}

impl FromStr for BandLayout {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "4" | "4-band" | "four" | "four-band" => Ok(BandLayout::FourBand),
            "5" | "5-band" | "five" | "five-band" => Ok(BandLayout::FiveBand),
            other => Err(CalcError::invalid_input(format!(
                "unknown band layout '{}' (expected 4-band or 5-band)",
                other
            ))),
        }
    }
}

/// Decoded resistor with its optional tolerance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistorReading {
    pub layout: BandLayout,
    pub resistance: Ohms,
    pub tolerance: Option<Tolerance>,
}

impl ResistorReading {
    /// Lowest and highest resistance allowed by the tolerance band
    pub fn range(&self) -> Option<(Ohms, Ohms)> {
        self.tolerance.map(|t| {
            let delta = self.resistance.value() * t.percent() / 100.0;
            (
                Ohms(self.resistance.value() - delta),
                Ohms(self.resistance.value() + delta),
            )
        })
    }
}

/// Read a resistor as printed, with or without its trailing tolerance band
pub fn read_resistor<S: AsRef<str>>(layout: BandLayout, colors: &[S]) -> Result<ResistorReading> {
    let needed = layout.value_bands();
    let (value_colors, tolerance) = if colors.len() == needed {
        (colors, None)
    } else if colors.len() == needed + 1 {
        let tolerance = colors[needed].as_ref().parse::<Tolerance>()?;
        (&colors[..needed], Some(tolerance))
    } else {
        return Err(CalcError::invalid_input(format!(
            "{} resistor needs {} or {} colors, got {}",
            layout,
            needed,
            needed + 1,
            colors.len()
        )));
    };

    let bands = parse_bands(value_colors)?;
    let resistance = match (layout, bands.as_slice()) {
        (BandLayout::FourBand, &[a, b, c]) => decode_4_band([a, b, c]),
        (BandLayout::FiveBand, &[a, b, c, d]) => decode_5_band([a, b, c, d]),
        _ => {
            return Err(CalcError::invalid_input(format!(
                "{} resistor needs {} value colors",
                layout, needed
            )))
        },
    };

    Ok(ResistorReading {
        layout,
        resistance,
        tolerance,
    })
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_digit_table() {
        for (digit, band) in ColorBand::ALL.iter().enumerate() {
            assert_eq!(usize::from(band.digit()), digit);
            assert_eq!(band.name().parse::<ColorBand>().unwrap(), *band);
        }
        assert_eq!(" Gray ".parse::<ColorBand>().unwrap(), ColorBand::Grey);
        assert_eq!("VIOLET".parse::<ColorBand>().unwrap(), ColorBand::Violet);
    }

    #[test]
    fn test_decode_4_band() {
        let value = decode_4_band([ColorBand::Red, ColorBand::Violet, ColorBand::Orange]);
        assert_eq!(value, Ohms(27_000.0));

        let value = decode_4_band([ColorBand::Brown, ColorBand::Black, ColorBand::Black]);
        assert_eq!(value, Ohms(10.0));
    }

    #[test]
    fn test_decode_5_band() {
        let value = decode_5_band([
            ColorBand::Brown,
            ColorBand::Black,
            ColorBand::Black,
            ColorBand::Red,
        ]);
        assert_eq!(value, Ohms(10_000.0));
    }

    #[test]
    fn test_decode_colors_dispatch() {
        assert_eq!(decode_colors(&["red", "violet", "orange"]).unwrap(), Ohms(27_000.0));
        assert_eq!(
            decode_colors(&["brown", "black", "black", "red"]).unwrap(),
            Ohms(10_000.0)
        );
        assert_eq!(
            decode_colors(&["red", "red"]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        let empty: [&str; 0] = [];
        assert!(decode_colors(&empty).is_err());
    }

    #[test]
    fn test_unknown_color_rejected() {
        assert_eq!(
            decode_colors(&["magenta", "violet", "orange"]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            decode_colors(&["brown", "black", "magenta", "red"]).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        // gold is a tolerance color, not a digit
        assert!(decode_colors(&["gold", "black", "red"]).is_err());
    }

    #[test]
    fn test_read_resistor_with_tolerance() {
        let reading =
            read_resistor(BandLayout::FourBand, &["brown", "black", "red", "gold"]).unwrap();
        assert_eq!(reading.resistance, Ohms(1_000.0));
        assert_eq!(reading.tolerance, Some(Tolerance::Gold));
        let (lo, hi) = reading.range().unwrap();
        assert_eq!(lo, Ohms(950.0));
        assert_eq!(hi, Ohms(1_050.0));
    }

    #[test]
    fn test_read_resistor_without_tolerance() {
        let reading =
            read_resistor(BandLayout::FiveBand, &["brown", "black", "black", "red"]).unwrap();
        assert_eq!(reading.resistance, Ohms(10_000.0));
        assert!(reading.tolerance.is_none());
        assert!(reading.range().is_none());
    }

    #[test]
    fn test_read_resistor_errors() {
        let err = read_resistor(BandLayout::FourBand, &["red", "red"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        // white has no tolerance meaning
        let err =
            read_resistor(BandLayout::FourBand, &["red", "red", "red", "white"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_read_resistor_precision_tolerances() {
        let reading =
            read_resistor(BandLayout::FourBand, &["red", "red", "red", "orange"]).unwrap();
        assert_eq!(reading.resistance, Ohms(2_200.0));
        assert_eq!(reading.tolerance, Some(Tolerance::Orange));
        assert_eq!(Tolerance::Orange.percent(), 0.05);

        let reading =
            read_resistor(BandLayout::FiveBand, &["brown", "black", "black", "red", "Yellow"])
                .unwrap();
        assert_eq!(reading.tolerance.map(|t| t.percent()), Some(0.02));
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("4-Band".parse::<BandLayout>().unwrap(), BandLayout::FourBand);
        assert_eq!("5".parse::<BandLayout>().unwrap(), BandLayout::FiveBand);
        assert!("6-band".parse::<BandLayout>().is_err());
        assert_eq!(Tolerance::Silver.to_string(), "±10%");
    }
}
