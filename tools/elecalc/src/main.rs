//! elecalc - Electrical calculator
//!
//! One-shot subcommands for each formula, plus an interactive REPL.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use elec_calc::{Amps, CalcError, Farads, Henries, Hertz, Ohms, OhmsLaw, Volts, Waveform};
use elecalc::request::{parse_colors, parse_resistances};
use elecalc::{format, load_config, repl, Request, Session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "elecalc")]
#[command(about = "Electrical calculator - DC, AC and resistor color codes")]
#[command(long_about = "Electrical calculator - DC, AC and resistor color codes

DC:
  ohms             Ohm's law (give exactly two of --voltage, --current, --resistance)
  series           Series resistance
  parallel         Parallel resistance
  voltage-divider  Voltage divider output
  current-divider  Current divider branch currents

AC:
  rms              RMS voltage of a waveform
  impedance        Series RLC impedance
  resonance        LC resonant frequency
  three-phase      Three-phase real power

Device Reader:
  resistor         Resistor color code

Examples:
  elecalc ohms --voltage 12 --current 0.5
  elecalc parallel 10,20,30
  elecalc rms 10 half-wave rectified
  elecalc resistor 4-band red,violet,orange,gold
  elecalc repl")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ./elecalc.toml if present)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ohm's law: give exactly two quantities
    Ohms {
        /// Voltage (V)
        #[arg(long, allow_negative_numbers = true)]
        voltage: Option<f64>,

        /// Current (A)
        #[arg(long, allow_negative_numbers = true)]
        current: Option<f64>,

        /// Resistance (Ω)
        #[arg(long, allow_negative_numbers = true)]
        resistance: Option<f64>,
    },

    /// Total resistance of resistors in series
    Series {
        /// Comma-separated resistances, e.g. 10,20,30
        resistances: String,
    },

    /// Total resistance of resistors in parallel
    Parallel {
        /// Comma-separated resistances, e.g. 10,20,30
        resistances: String,
    },

    /// Output voltage of a two-resistor divider
    VoltageDivider {
        /// Input voltage (V)
        #[arg(allow_negative_numbers = true)]
        vin: f64,
        r1: f64,
        r2: f64,
    },

    /// Branch currents of a two-resistor current divider
    CurrentDivider {
        /// Total current (A)
        #[arg(allow_negative_numbers = true)]
        itotal: f64,
        r1: f64,
        r2: f64,
    },

    /// RMS voltage from a peak voltage
    Rms {
        /// Peak voltage (V)
        #[arg(allow_negative_numbers = true)]
        peak: f64,

        /// sine, square, triangle, sawtooth, half-wave rectified, full-wave rectified
        #[arg(required = true, num_args = 1..)]
        waveform: Vec<String>,
    },

    /// Series RLC impedance magnitude
    Impedance {
        /// Resistance (Ω)
        r: f64,
        /// Inductance (H)
        l: f64,
        /// Capacitance (F)
        c: f64,
        /// Frequency (Hz)
        f: f64,

        /// Show reactances and phase angle
        #[arg(short, long)]
        detailed: bool,
    },

    /// Resonant frequency of an LC pair
    Resonance {
        /// Inductance (H)
        l: f64,
        /// Capacitance (F)
        c: f64,
    },

    /// Real power of a balanced three-phase load
    ThreePhase {
        /// Phase voltage (V)
        voltage: f64,
        /// Phase current (A)
        current: f64,
        /// Power factor (0-1)
        #[arg(allow_negative_numbers = true)]
        power_factor: f64,
        /// wye (Y) or delta
        connection: String,
    },

    /// Resistor value from its color bands
    Resistor {
        /// 4-band or 5-band
        layout: String,

        /// Comma-separated colors, tolerance band optional
        colors: String,
    },

    /// Interactive session
    Repl,
}

impl Commands {
    /// Translate into a calculation request; `None` for the REPL
    fn into_request(self) -> std::result::Result<Option<Request>, CalcError> {
        let request = match self {
            Commands::Ohms {
                voltage,
                current,
                resistance,
            } => Request::OhmsLaw(OhmsLaw {
                voltage: voltage.map(Volts),
                current: current.map(Amps),
                resistance: resistance.map(Ohms),
            }),
            Commands::Series { resistances } => {
                Request::Series(parse_resistances(&resistances)?)
            },
            Commands::Parallel { resistances } => {
                Request::Parallel(parse_resistances(&resistances)?)
            },
            Commands::VoltageDivider { vin, r1, r2 } => Request::VoltageDivider {
                vin: Volts(vin),
                r1: Ohms(r1),
                r2: Ohms(r2),
            },
            Commands::CurrentDivider { itotal, r1, r2 } => Request::CurrentDivider {
                itotal: Amps(itotal),
                r1: Ohms(r1),
                r2: Ohms(r2),
            },
            Commands::Rms { peak, waveform } => Request::Rms {
                peak: Volts(peak),
                waveform: waveform.join(" ").parse::<Waveform>()?,
            },
            Commands::Impedance {
                r,
                l,
                c,
                f,
                detailed,
            } => Request::Impedance {
                resistance: Ohms(r),
                inductance: Henries(l),
                capacitance: Farads(c),
                frequency: Hertz(f),
                detailed,
            },
            Commands::Resonance { l, c } => Request::Resonance {
                inductance: Henries(l),
                capacitance: Farads(c),
            },
            Commands::ThreePhase {
                voltage,
                current,
                power_factor,
                connection,
            } => Request::ThreePhase {
                voltage: Volts(voltage),
                current: Amps(current),
                power_factor,
                connection: connection.parse()?,
            },
            Commands::Resistor { layout, colors } => Request::Resistor {
                layout: layout.parse()?,
                colors: parse_colors(&colors),
            },
            Commands::Repl => return Ok(None),
        };
        Ok(Some(request))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    // Configure colored output
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    let mut session = Session::new(config);

    let request = match cli.command.into_request() {
        Ok(Some(request)) => request,
        Ok(None) => return repl::run(&mut session),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), format::error(&e));
            std::process::exit(1);
        },
    };

    match session.run(&request) {
        Ok(text) => println!("{}", text.bright_green()),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), format::error(&e));
            std::process::exit(1);
        },
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_ohms_accepts_negative_values() {
        let cli = Cli::try_parse_from([
            "elecalc",
            "ohms",
            "--voltage",
            "5",
            "--resistance",
            "-2",
        ])
        .unwrap();
        let request = cli.command.into_request().unwrap().unwrap();
        assert_eq!(
            request,
            Request::OhmsLaw(OhmsLaw::new().voltage(5.0).resistance(-2.0))
        );
    }

    #[test]
    fn test_negative_positional_values() {
        let cli = Cli::try_parse_from(["elecalc", "three-phase", "230", "10", "-0.5", "wye"]);
        assert!(cli.is_ok());
    }
}
