//! elec-calc - Calculation library for elementary electrical formulas
//!
//! Stateless, pure functions grouped by domain. Every function returns a
//! value or a [`CalcError`]; none keep state between calls.
//!
//! # Example
//!
//! ```rust
//! use elec_calc::{ac, dc, resistor, Ohms, Volts};
//!
//! // Ohm's law: two knowns in, all three out
//! let solved = dc::OhmsLaw::new().voltage(12.0).current(0.5).solve().unwrap();
//! assert_eq!(solved.resistance, Ohms(24.0));
//!
//! // Resistor networks
//! let total = dc::series(&[Ohms(10.0), Ohms(20.0), Ohms(30.0)]).unwrap();
//! assert_eq!(total, Ohms(60.0));
//!
//! // RMS of a square wave equals its peak
//! let rms = ac::rms_voltage(Volts(10.0), "square".parse().unwrap()).unwrap();
//! assert_eq!(rms, Volts(10.0));
//!
//! // Color codes
//! let r = resistor::decode_colors(&["red", "violet", "orange"]).unwrap();
//! assert_eq!(r, Ohms(27_000.0));
//! ```
//!
//! # Functions
//!
//! ## DC (`dc`)
//!
//! | Function | Formula |
//! |----------|---------|
//! | `ohms_law` | V = I·R, solved for the missing quantity |
//! | `series` | Σ R |
//! | `parallel` | 1 / Σ(1/R) |
//! | `voltage_divider` | Vin · R2 / (R1 + R2) |
//! | `current_divider` | (It · R2, It · R1) / (R1 + R2) |
//!
//! ## AC (`ac`)
//!
//! | Function | Formula |
//! |----------|---------|
//! | `rms_voltage` | peak · waveform factor |
//! | `rlc_impedance` | √(R² + (ωL − 1/ωC)²) |
//! | `rlc_analysis` | reactances, magnitude and phase |
//! | `resonant_frequency` | 1 / (2π√(LC)) |
//! | `three_phase_power` | √3·V·I·pf (wye), 3·V·I·pf (delta) |
//!
//! ## Resistor color code (`resistor`)
//!
//! | Function | Input |
//! |----------|-------|
//! | `decode_4_band` | two digits + multiplier |
//! | `decode_5_band` | three digits + multiplier |
//! | `decode_colors` | 3 or 4 color names |
//! | `read_resistor` | color names with optional tolerance band |

pub mod ac;
pub mod dc;
pub mod error;
pub mod resistor;
pub mod units;

// Re-exports for convenience
pub use error::{CalcError, ErrorKind, Result};
pub use units::{Amps, Farads, Henries, Hertz, Ohms, Volts, Watts};

pub use ac::{
    resonant_frequency, rlc_analysis, rlc_impedance, rms_voltage, three_phase_power, Connection,
    PowerFactor, RlcImpedance, Waveform,
};
pub use dc::{
    current_divider, ohms_law, parallel, series, voltage_divider, CurrentSplit, OhmsLaw,
    OhmsLawSolution,
};
pub use resistor::{
    decode_4_band, decode_5_band, decode_colors, read_resistor, BandLayout, ColorBand,
    ResistorReading, Tolerance,
};
