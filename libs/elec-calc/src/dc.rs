//! DC calculations: Ohm's law, resistor networks and dividers

use crate::error::{ensure_finite, ensure_finite_result, CalcError, Result};
use crate::units::{Amps, Ohms, Volts};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Known quantities for the Ohm's law solver
///
/// Exactly two of the three fields must be `Some`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OhmsLaw {
    pub voltage: Option<Volts>,
    pub current: Option<Amps>,
    pub resistance: Option<Ohms>,
}

impl OhmsLaw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn voltage(mut self, v: impl Into<Volts>) -> Self {
        self.voltage = Some(v.into());
        self
    }

    pub fn current(mut self, i: impl Into<Amps>) -> Self {
        self.current = Some(i.into());
        self
    }

    pub fn resistance(mut self, r: impl Into<Ohms>) -> Self {
        self.resistance = Some(r.into());
        self
    }

    /// Number of quantities supplied
    pub fn known_count(&self) -> usize {
        usize::from(self.voltage.is_some())
            + usize::from(self.current.is_some())
            + usize::from(self.resistance.is_some())
    }

    pub fn solve(self) -> Result<OhmsLawSolution> {
        ohms_law(self)
    }
}

/// All three Ohm's law quantities after solving
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawSolution {
    pub voltage: Volts,
    pub current: Amps,
    pub resistance: Ohms,
}

/// Solve V = I·R for whichever quantity is missing
///
/// # Errors
/// * `InsufficientInput` - fewer than two quantities known
/// * `InvalidInput` - all three supplied, or a non-finite value
/// * `DivisionByZero` - solving for R with I = 0, or for I with R = 0
pub fn ohms_law(known: OhmsLaw) -> Result<OhmsLawSolution> {
    if let Some(v) = known.voltage {
        ensure_finite("voltage", v.value())?;
    }
    if let Some(i) = known.current {
        ensure_finite("current", i.value())?;
    }
    if let Some(r) = known.resistance {
        ensure_finite("resistance", r.value())?;
    }

    let solution = match (known.voltage, known.current, known.resistance) {
        (Some(v), Some(i), None) => {
            if i.value() == 0.0 {
                return Err(CalcError::division_by_zero(
                    "cannot solve for resistance with zero current",
                ));
            }
            OhmsLawSolution {
                voltage: v,
                current: i,
                resistance: Ohms(v.value() / i.value()),
            }
        },
        (Some(v), None, Some(r)) => {
            if r.value() == 0.0 {
                return Err(CalcError::division_by_zero(
                    "cannot solve for current with zero resistance",
                ));
            }
            OhmsLawSolution {
                voltage: v,
                current: Amps(v.value() / r.value()),
                resistance: r,
            }
        },
        (None, Some(i), Some(r)) => OhmsLawSolution {
            voltage: Volts(i.value() * r.value()),
            current: i,
            resistance: r,
        },
        (Some(_), Some(_), Some(_)) => {
            return Err(CalcError::invalid_input(
                "all three quantities supplied; leave exactly one unknown",
            ));
        },
        _ => {
            return Err(CalcError::insufficient_input(format!(
                "Ohm's law needs two known quantities, got {}",
                known.known_count()
            )));
        },
    };

    debug!(
        voltage = solution.voltage.value(),
        current = solution.current.value(),
        resistance = solution.resistance.value(),
        "ohms_law"
    );
    Ok(solution)
}

fn validate_network(resistances: &[Ohms]) -> Result<()> {
    if resistances.is_empty() {
        return Err(CalcError::invalid_input(
            "resistor list must not be empty",
        ));
    }
    for (idx, r) in resistances.iter().enumerate() {
        let value = ensure_finite("resistance", r.value())?;
        if value <= 0.0 {
            return Err(CalcError::invalid_input(format!(
                "resistor #{} must be greater than zero, got {}",
                idx + 1,
                value
            )));
        }
    }
    Ok(())
}

/// Equivalent resistance of resistors in series
pub fn series(resistances: &[Ohms]) -> Result<Ohms> {
    validate_network(resistances)?;
    let total = ensure_finite_result(
        "series resistance",
        resistances.iter().map(|r| r.value()).sum(),
    )?;

    debug!(count = resistances.len(), total = total, "series");
    Ok(Ohms(total))
}

/// Equivalent resistance of resistors in parallel
///
/// A zero-ohm element would be a short circuit; it is rejected rather
/// than reported as 0 Ω.
pub fn parallel(resistances: &[Ohms]) -> Result<Ohms> {
    validate_network(resistances)?;
    // An infinite conductance would come back as a 0 Ω short
    let conductance = ensure_finite_result(
        "parallel conductance",
        resistances.iter().map(|r| 1.0 / r.value()).sum(),
    )?;
    let total = ensure_finite_result("parallel resistance", 1.0 / conductance)?;

    debug!(count = resistances.len(), total = total, "parallel");
    Ok(Ohms(total))
}

fn divider_sum(r1: Ohms, r2: Ohms) -> Result<f64> {
    let r1 = ensure_finite("r1", r1.value())?;
    let r2 = ensure_finite("r2", r2.value())?;
    let sum = r1 + r2;
    if sum == 0.0 {
        return Err(CalcError::division_by_zero("r1 + r2 is zero"));
    }
    Ok(sum)
}

/// Output voltage across R2: Vout = Vin · R2 / (R1 + R2)
pub fn voltage_divider(vin: Volts, r1: Ohms, r2: Ohms) -> Result<Volts> {
    ensure_finite("vin", vin.value())?;
    let sum = divider_sum(r1, r2)?;
    let vout = ensure_finite_result("output voltage", vin.value() * r2.value() / sum)?;

    debug!(vin = vin.value(), r1 = r1.value(), r2 = r2.value(), vout = vout, "voltage_divider");
    Ok(Volts(vout))
}

/// Branch currents of a two-resistor current divider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentSplit {
    pub through_r1: Amps,
    pub through_r2: Amps,
}

/// Split a total current between two parallel resistors
///
/// Each branch takes the share of the *other* resistor:
/// I1 = It · R2 / (R1 + R2), I2 = It · R1 / (R1 + R2).
pub fn current_divider(itotal: Amps, r1: Ohms, r2: Ohms) -> Result<CurrentSplit> {
    ensure_finite("itotal", itotal.value())?;
    let sum = divider_sum(r1, r2)?;
    let split = CurrentSplit {
        through_r1: Amps(ensure_finite_result(
            "current through r1",
            itotal.value() * r2.value() / sum,
        )?),
        through_r2: Amps(ensure_finite_result(
            "current through r2",
            itotal.value() * r1.value() / sum,
        )?),
    };

    debug!(
        itotal = itotal.value(),
        i1 = split.through_r1.value(),
        i2 = split.through_r2.value(),
        "current_divider"
    );
    Ok(split)
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn ohms(values: &[f64]) -> Vec<Ohms> {
        values.iter().copied().map(Ohms).collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_ohms_law_each_unknown() {
        let s = OhmsLaw::new().voltage(12.0).current(2.0).solve().unwrap();
        assert_eq!(s.resistance, Ohms(6.0));

        let s = OhmsLaw::new().voltage(12.0).resistance(6.0).solve().unwrap();
        assert_eq!(s.current, Amps(2.0));

        let s = OhmsLaw::new().current(2.0).resistance(6.0).solve().unwrap();
        assert_eq!(s.voltage, Volts(12.0));
    }

    #[test]
    fn test_ohms_law_round_trip() {
        for (v, i) in [(10.0, 3.0), (230.0, 0.7), (-5.0, 0.25), (1e-3, 4e-6)] {
            let r = OhmsLaw::new().voltage(v).current(i).solve().unwrap().resistance;
            let back = OhmsLaw::new().voltage(v).resistance(r).solve().unwrap().current;
            assert!(approx(back.value(), i), "{} != {}", back.value(), i);
        }
    }

    #[test]
    fn test_ohms_law_insufficient() {
        let err = ohms_law(OhmsLaw::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientInput);

        let err = OhmsLaw::new().voltage(5.0).solve().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientInput);
    }

    #[test]
    fn test_ohms_law_overdetermined() {
        let err = OhmsLaw::new()
            .voltage(5.0)
            .current(1.0)
            .resistance(5.0)
            .solve()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_ohms_law_division_by_zero() {
        let err = OhmsLaw::new().voltage(5.0).current(0.0).solve().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        let err = OhmsLaw::new().voltage(5.0).resistance(0.0).solve().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        // V = I·R has no denominator
        let s = OhmsLaw::new().current(0.0).resistance(10.0).solve().unwrap();
        assert_eq!(s.voltage, Volts(0.0));
    }

    #[test]
    fn test_ohms_law_rejects_nan() {
        let err = OhmsLaw::new().voltage(f64::NAN).current(1.0).solve().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_series() {
        assert_eq!(series(&ohms(&[10.0, 20.0, 30.0])).unwrap(), Ohms(60.0));
        assert_eq!(series(&ohms(&[47.0])).unwrap(), Ohms(47.0));
    }

    #[test]
    fn test_parallel() {
        let r = parallel(&ohms(&[10.0, 20.0, 30.0])).unwrap();
        assert!((r.value() - 5.454_545_45).abs() < 1e-6);

        assert!(approx(parallel(&ohms(&[220.0])).unwrap().value(), 220.0));
        assert!(approx(parallel(&ohms(&[100.0, 100.0])).unwrap().value(), 50.0));
    }

    #[test]
    fn test_network_rejects_empty_and_non_positive() {
        assert_eq!(series(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(parallel(&[]).unwrap_err().kind(), ErrorKind::InvalidInput);
        assert_eq!(
            parallel(&ohms(&[10.0, 0.0])).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            series(&ohms(&[10.0, -5.0])).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_network_overflow_rejected() {
        // 1/r overflows: must not come back as a 0 Ω short
        let err = parallel(&[Ohms(1e-310)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = series(&ohms(&[1e308, 1e308])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_divider_overflow_rejected() {
        let err = voltage_divider(Volts(1e308), Ohms(-1.0), Ohms(10.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = current_divider(Amps(1e308), Ohms(10.0), Ohms(-1.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_voltage_divider() {
        let vout = voltage_divider(Volts(10.0), Ohms(100.0), Ohms(100.0)).unwrap();
        assert_eq!(vout, Volts(5.0));

        let vout = voltage_divider(Volts(12.0), Ohms(10_000.0), Ohms(5_000.0)).unwrap();
        assert!(approx(vout.value(), 4.0));
    }

    #[test]
    fn test_current_divider() {
        let split = current_divider(Amps(10.0), Ohms(100.0), Ohms(100.0)).unwrap();
        assert_eq!(split.through_r1, Amps(5.0));
        assert_eq!(split.through_r2, Amps(5.0));

        // Smaller resistor carries the larger current
        let split = current_divider(Amps(3.0), Ohms(100.0), Ohms(200.0)).unwrap();
        assert!(approx(split.through_r1.value(), 2.0));
        assert!(approx(split.through_r2.value(), 1.0));
    }

    #[test]
    fn test_divider_zero_sum() {
        let err = voltage_divider(Volts(10.0), Ohms(0.0), Ohms(0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        let err = current_divider(Amps(1.0), Ohms(50.0), Ohms(-50.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }
}
