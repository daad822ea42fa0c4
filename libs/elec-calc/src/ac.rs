//! AC calculations: RMS conversion, RLC impedance and three-phase power

use crate::error::{ensure_finite, ensure_finite_result, ensure_non_negative, CalcError, Result};
use crate::units::{Amps, Farads, Henries, Hertz, Ohms, Volts, Watts};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

// ============================================================================
// RMS
// ============================================================================

/// Periodic waveform shapes with a known peak-to-RMS ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
    HalfWaveRectified,
    FullWaveRectified,
}

impl Waveform {
    pub const ALL: [Waveform; 6] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::HalfWaveRectified,
        Waveform::FullWaveRectified,
    ];

    /// Ratio RMS / peak
    pub fn rms_factor(self) -> f64 {
        match self {
            Waveform::Sine | Waveform::FullWaveRectified => FRAC_1_SQRT_2,
            Waveform::Square => 1.0,
            Waveform::Triangle => 1.0 / 3f64.sqrt(),
            Waveform::Sawtooth | Waveform::HalfWaveRectified => 0.5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::HalfWaveRectified => "half-wave rectified",
            Waveform::FullWaveRectified => "full-wave rectified",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = CalcError;

    /// Case-insensitive; spaces, hyphens and underscores are interchangeable
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '_' { '-' } else { c })
            .collect();

        match normalized.as_str() {
            "sine" | "sin" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "triangle" | "triangular" => Ok(Waveform::Triangle),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "half-wave-rectified" | "half-wave" => Ok(Waveform::HalfWaveRectified),
            "full-wave-rectified" | "full-wave" => Ok(Waveform::FullWaveRectified),
            _ => Err(CalcError::invalid_input(format!(
                "unknown waveform '{}' (expected sine, square, triangle, sawtooth, \
                 half-wave rectified or full-wave rectified)",
                s.trim()
            ))),
        }
    }
}

/// RMS value of a waveform with the given peak voltage
pub fn rms_voltage(peak: Volts, waveform: Waveform) -> Result<Volts> {
    ensure_finite("peak voltage", peak.value())?;
    let rms = peak.value() * waveform.rms_factor();

    debug!(peak = peak.value(), waveform = %waveform, rms = rms, "rms_voltage");
    Ok(Volts(rms))
}

// ============================================================================
// RLC impedance
// ============================================================================

/// Full breakdown of a series RLC impedance at one frequency
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RlcImpedance {
    /// ω = 2πf in rad/s
    pub angular_frequency: f64,
    pub inductive_reactance: Ohms,
    pub capacitive_reactance: Ohms,
    /// Xl - Xc; negative when the circuit is capacitive
    pub net_reactance: Ohms,
    pub magnitude: Ohms,
    /// Phase of the impedance in degrees, in [-90, 90]
    pub phase_degrees: f64,
}

/// Analyse a series RLC circuit
///
/// # Errors
/// * `InvalidInput` - any input negative or non-finite
/// * `DivisionByZero` - frequency or capacitance is zero (Xc undefined)
pub fn rlc_analysis(
    resistance: Ohms,
    inductance: Henries,
    capacitance: Farads,
    frequency: Hertz,
) -> Result<RlcImpedance> {
    let r = ensure_non_negative("resistance", resistance.value())?;
    let l = ensure_non_negative("inductance", inductance.value())?;
    let c = ensure_non_negative("capacitance", capacitance.value())?;
    let f = ensure_non_negative("frequency", frequency.value())?;

    if f == 0.0 {
        return Err(CalcError::division_by_zero(
            "frequency is zero, capacitive reactance is undefined",
        ));
    }
    if c == 0.0 {
        return Err(CalcError::division_by_zero(
            "capacitance is zero, capacitive reactance is undefined",
        ));
    }

    let omega = ensure_finite_result("angular frequency", 2.0 * PI * f)?;
    let xl = ensure_finite_result("inductive reactance", omega * l)?;
    let xc = ensure_finite_result("capacitive reactance", 1.0 / (omega * c))?;
    let net = xl - xc;
    let magnitude = ensure_finite_result("impedance", r.hypot(net))?;
    let phase_degrees = net.atan2(r).to_degrees();

    debug!(
        r = r,
        l = l,
        c = c,
        f = f,
        xl = xl,
        xc = xc,
        z = magnitude,
        "rlc_impedance"
    );

    Ok(RlcImpedance {
        angular_frequency: omega,
        inductive_reactance: Ohms(xl),
        capacitive_reactance: Ohms(xc),
        net_reactance: Ohms(net),
        magnitude: Ohms(magnitude),
        phase_degrees,
    })
}

/// Impedance magnitude |Z| = √(R² + (Xl − Xc)²) of a series RLC circuit
pub fn rlc_impedance(
    resistance: Ohms,
    inductance: Henries,
    capacitance: Farads,
    frequency: Hertz,
) -> Result<Ohms> {
    Ok(rlc_analysis(resistance, inductance, capacitance, frequency)?.magnitude)
}

/// Resonant frequency f0 = 1 / (2π√(LC))
pub fn resonant_frequency(inductance: Henries, capacitance: Farads) -> Result<Hertz> {
    let l = ensure_non_negative("inductance", inductance.value())?;
    let c = ensure_non_negative("capacitance", capacitance.value())?;
    if l == 0.0 || c == 0.0 {
        return Err(CalcError::division_by_zero(
            "resonance needs non-zero inductance and capacitance",
        ));
    }

    let f0 = ensure_finite_result("resonant frequency", 1.0 / (2.0 * PI * (l * c).sqrt()))?;
    debug!(l = l, c = c, f0 = f0, "resonant_frequency");
    Ok(Hertz(f0))
}

// ============================================================================
// Three-phase power
// ============================================================================

/// Three-phase connection topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connection {
    Wye,
    Delta,
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connection::Wye => f.write_str("wye"),
            Connection::Delta => f.write_str("delta"),
        }
    }
}

impl FromStr for Connection {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "wye" | "y" | "star" => Ok(Connection::Wye),
            "delta" | "d" => Ok(Connection::Delta),
            other => Err(CalcError::invalid_input(format!(
                "unknown connection '{}' (expected wye or delta)",
                other
            ))),
        }
    }
}

/// Power factor, always within [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PowerFactor(f64);

impl PowerFactor {
    pub const UNITY: PowerFactor = PowerFactor(1.0);

    /// Accept a power factor, rejecting anything outside [0, 1]
    pub fn new(value: f64) -> Result<Self> {
        let value = ensure_finite("power factor", value)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(CalcError::invalid_input(format!(
                "power factor must be between 0 and 1, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Accept a power factor, clamping it into [0, 1]
    pub fn clamped(value: f64) -> Result<Self> {
        let value = ensure_finite("power factor", value)?;
        let clamped = value.clamp(0.0, 1.0);
        if clamped != value {
            warn!(
                requested = value,
                used = clamped,
                "power factor out of range, clamped"
            );
        }
        Ok(Self(clamped))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PowerFactor {
    type Error = CalcError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PowerFactor> for f64 {
    fn from(pf: PowerFactor) -> f64 {
        pf.0
    }
}

impl fmt::Display for PowerFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Total real power of a balanced three-phase load
///
/// wye: √3 · V · I · pf, delta: 3 · V · I · pf
pub fn three_phase_power(
    voltage: Volts,
    current: Amps,
    power_factor: PowerFactor,
    connection: Connection,
) -> Result<Watts> {
    let v = ensure_finite("phase voltage", voltage.value())?;
    let i = ensure_finite("phase current", current.value())?;

    let multiplier = match connection {
        Connection::Wye => 3f64.sqrt(),
        Connection::Delta => 3.0,
    };
    let power = ensure_finite_result("power", multiplier * v * i * power_factor.value())?;

    debug!(
        v = v,
        i = i,
        pf = power_factor.value(),
        connection = %connection,
        power = power,
        "three_phase_power"
    );
    Ok(Watts(power))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tracing_test::traced_test;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_rms_known_values() {
        let peak = Volts(10.0);
        let rms = |w| rms_voltage(peak, w).unwrap().value();

        assert!(close(rms(Waveform::Sine), 7.0711, 1e-4));
        assert_eq!(rms(Waveform::Square), 10.0);
        assert!(close(rms(Waveform::Triangle), 5.7735, 1e-4));
        assert_eq!(rms(Waveform::Sawtooth), 5.0);
        assert_eq!(rms(Waveform::HalfWaveRectified), 5.0);
        assert!(close(rms(Waveform::FullWaveRectified), 7.0711, 1e-4));
    }

    #[test]
    fn test_waveform_parse() {
        assert_eq!("Sine".parse::<Waveform>().unwrap(), Waveform::Sine);
        assert_eq!(
            "half-wave rectified".parse::<Waveform>().unwrap(),
            Waveform::HalfWaveRectified
        );
        assert_eq!(
            " FULL_WAVE_RECTIFIED ".parse::<Waveform>().unwrap(),
            Waveform::FullWaveRectified
        );
        for w in Waveform::ALL {
            assert_eq!(w.name().parse::<Waveform>().unwrap(), w);
        }

        let err = "pulse".parse::<Waveform>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rlc_capacitive_only() {
        let z = rlc_impedance(Ohms(10.0), Henries(0.0), Farads(1e-6), Hertz(1000.0)).unwrap();
        assert!(close(z.value(), 159.4688, 1e-3));

        let a = rlc_analysis(Ohms(10.0), Henries(0.0), Farads(1e-6), Hertz(1000.0)).unwrap();
        assert!(close(a.angular_frequency, 6283.19, 0.01));
        assert!(close(a.capacitive_reactance.value(), 159.15, 0.01));
        assert!(a.phase_degrees < 0.0);
        assert_eq!(a.magnitude, z);
    }

    #[test]
    fn test_rlc_near_resonance() {
        // 100 mH and 100 uF at 50 Hz: Xl ~ 31.42, Xc ~ 31.83
        let a = rlc_analysis(Ohms(30.0), Henries(0.1), Farads(100e-6), Hertz(50.0)).unwrap();
        assert!(close(a.inductive_reactance.value(), 31.4159, 1e-3));
        assert!(close(a.magnitude.value(), 30.0029, 1e-3));
    }

    #[test]
    fn test_rlc_division_by_zero() {
        let err = rlc_impedance(Ohms(10.0), Henries(0.1), Farads(1e-6), Hertz(0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        let err = rlc_impedance(Ohms(10.0), Henries(0.1), Farads(0.0), Hertz(50.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_rlc_rejects_negative() {
        let err = rlc_impedance(Ohms(-1.0), Henries(0.1), Farads(1e-6), Hertz(50.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_resonant_frequency() {
        let f0 = resonant_frequency(Henries(10e-3), Farads(1e-6)).unwrap();
        assert!(close(f0.value(), 1591.549, 1e-3));

        // At resonance the reactances cancel
        let a = rlc_analysis(Ohms(8.0), Henries(10e-3), Farads(1e-6), f0).unwrap();
        assert!(close(a.magnitude.value(), 8.0, 1e-6));

        let err = resonant_frequency(Henries(0.0), Farads(1e-6)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_three_phase_power() {
        let wye = three_phase_power(Volts(230.0), Amps(10.0), PowerFactor::UNITY, Connection::Wye)
            .unwrap();
        assert!(close(wye.value(), 3983.72, 0.01));

        let delta =
            three_phase_power(Volts(230.0), Amps(10.0), PowerFactor::UNITY, Connection::Delta)
                .unwrap();
        assert!(close(delta.value(), 6900.0, 1e-9));

        let pf = PowerFactor::new(0.8).unwrap();
        let delta = three_phase_power(Volts(400.0), Amps(5.0), pf, Connection::Delta).unwrap();
        assert!(close(delta.value(), 4800.0, 1e-9));
    }

    #[test]
    fn test_three_phase_overflow_rejected() {
        let err = three_phase_power(
            Volts(1e200),
            Amps(1e200),
            PowerFactor::UNITY,
            Connection::Delta,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_rlc_overflow_rejected() {
        // 1/(ωC) overflows for a subnormal capacitance
        let err =
            rlc_impedance(Ohms(10.0), Henries(0.0), Farads(1e-310), Hertz(1e-10)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_connection_parse() {
        assert_eq!("Y".parse::<Connection>().unwrap(), Connection::Wye);
        assert_eq!("WYE".parse::<Connection>().unwrap(), Connection::Wye);
        assert_eq!("Delta".parse::<Connection>().unwrap(), Connection::Delta);
        assert_eq!(
            "zigzag".parse::<Connection>().unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_power_factor_reject() {
        assert_eq!(PowerFactor::new(1.2).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(PowerFactor::new(-0.1).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(PowerFactor::new(0.0).unwrap().value(), 0.0);
        assert_eq!(PowerFactor::new(1.0).unwrap(), PowerFactor::UNITY);
    }

    #[test]
    #[traced_test]
    fn test_power_factor_clamp_warns() {
        assert_eq!(PowerFactor::clamped(1.2).unwrap().value(), 1.0);
        assert!(logs_contain("power factor out of range"));
    }

    #[test]
    fn test_power_factor_deserialize_validates() {
        let pf: PowerFactor = serde_json::from_str("0.9").unwrap();
        assert_eq!(pf.value(), 0.9);
        assert!(serde_json::from_str::<PowerFactor>("1.5").is_err());
    }
}
