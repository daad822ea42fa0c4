//! Text rendering of calculation results

use elec_calc::{
    CalcError, CurrentSplit, ErrorKind, OhmsLawSolution, ResistorReading, RlcImpedance,
};

/// Format a number with `precision` decimals, then drop trailing zeros
///
/// `-0` is shown as `0`.
pub fn number(value: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Number followed by its unit symbol
pub fn quantity(value: f64, symbol: &str, precision: usize) -> String {
    format!("{} {}", number(value, precision), symbol)
}

pub fn ohms_law(s: &OhmsLawSolution, p: usize) -> String {
    format!(
        "Voltage = {}, Current = {}, Resistance = {}",
        quantity(s.voltage.value(), "V", p),
        quantity(s.current.value(), "A", p),
        quantity(s.resistance.value(), "Ω", p)
    )
}

pub fn current_split(split: &CurrentSplit, p: usize) -> String {
    format!(
        "Current through R1: {}, Current through R2: {}",
        quantity(split.through_r1.value(), "A", p),
        quantity(split.through_r2.value(), "A", p)
    )
}

pub fn rlc_detailed(z: &RlcImpedance, p: usize) -> String {
    [
        format!("ω     = {} rad/s", number(z.angular_frequency, p)),
        format!("Xl    = {}", quantity(z.inductive_reactance.value(), "Ω", p)),
        format!("Xc    = {}", quantity(z.capacitive_reactance.value(), "Ω", p)),
        format!("X     = {}", quantity(z.net_reactance.value(), "Ω", p)),
        format!("|Z|   = {}", quantity(z.magnitude.value(), "Ω", p)),
        format!("phase = {}°", number(z.phase_degrees, p)),
    ]
    .join("\n")
}

pub fn resistor(reading: &ResistorReading, p: usize) -> String {
    let value = quantity(reading.resistance.value(), "Ω", p);
    match (reading.tolerance, reading.range()) {
        (Some(tolerance), Some((lo, hi))) => format!(
            "{} resistor value: {} {} ({} to {})",
            reading.layout,
            value,
            tolerance,
            quantity(lo.value(), "Ω", p),
            quantity(hi.value(), "Ω", p)
        ),
        _ => format!("{} resistor value: {}", reading.layout, value),
    }
}

/// One-line message for a failed calculation
pub fn error(err: &CalcError) -> String {
    let hint = match err.kind() {
        ErrorKind::InvalidInput => "check the values entered",
        ErrorKind::DivisionByZero => "a denominator is zero",
        ErrorKind::InsufficientInput => "enter more known values",
    };
    format!("{} ({})", err, hint)
}
