//! Calculation requests and REPL line parsing

use crate::config::ShellConfig;
use crate::format;
use crate::session::Mode;
use elec_calc::{
    ac, dc, resistor, Amps, BandLayout, CalcError, Connection, Farads, Henries, Hertz, Ohms,
    OhmsLaw, Result, Volts, Waveform,
};

/// A single calculation with all of its inputs
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    OhmsLaw(OhmsLaw),
    Series(Vec<Ohms>),
    Parallel(Vec<Ohms>),
    VoltageDivider {
        vin: Volts,
        r1: Ohms,
        r2: Ohms,
    },
    CurrentDivider {
        itotal: Amps,
        r1: Ohms,
        r2: Ohms,
    },
    Rms {
        peak: Volts,
        waveform: Waveform,
    },
    Impedance {
        resistance: Ohms,
        inductance: Henries,
        capacitance: Farads,
        frequency: Hertz,
        detailed: bool,
    },
    Resonance {
        inductance: Henries,
        capacitance: Farads,
    },
    /// The power factor stays raw until the configured policy is applied
    ThreePhase {
        voltage: Volts,
        current: Amps,
        power_factor: f64,
        connection: Connection,
    },
    Resistor {
        layout: BandLayout,
        colors: Vec<String>,
    },
}

impl Request {
    /// Screen this calculation belongs to
    pub fn mode(&self) -> Mode {
        match self {
            Request::OhmsLaw(_)
            | Request::Series(_)
            | Request::Parallel(_)
            | Request::VoltageDivider { .. }
            | Request::CurrentDivider { .. } => Mode::Dc,
            Request::Rms { .. }
            | Request::Impedance { .. }
            | Request::Resonance { .. }
            | Request::ThreePhase { .. } => Mode::Ac,
            Request::Resistor { .. } => Mode::DeviceReader,
        }
    }

    /// Run the calculation and render its result
    pub fn evaluate(&self, config: &ShellConfig) -> Result<String> {
        let p = config.precision;
        let text = match self {
            Request::OhmsLaw(known) => format::ohms_law(&dc::ohms_law(*known)?, p),
            Request::Series(rs) => format!(
                "Total series resistance: {}",
                format::quantity(dc::series(rs)?.value(), "Ω", p)
            ),
            Request::Parallel(rs) => format!(
                "Total parallel resistance: {}",
                format::quantity(dc::parallel(rs)?.value(), "Ω", p)
            ),
            Request::VoltageDivider { vin, r1, r2 } => format!(
                "Output voltage (Vout): {}",
                format::quantity(dc::voltage_divider(*vin, *r1, *r2)?.value(), "V", p)
            ),
            Request::CurrentDivider { itotal, r1, r2 } => {
                format::current_split(&dc::current_divider(*itotal, *r1, *r2)?, p)
            },
            Request::Rms { peak, waveform } => format!(
                "RMS voltage for {} wave: {}",
                waveform,
                format::quantity(ac::rms_voltage(*peak, *waveform)?.value(), "V", p)
            ),
            Request::Impedance {
                resistance,
                inductance,
                capacitance,
                frequency,
                detailed,
            } => {
                let z = ac::rlc_analysis(*resistance, *inductance, *capacitance, *frequency)?;
                if *detailed {
                    format::rlc_detailed(&z, p)
                } else {
                    format!(
                        "RLC impedance: {}",
                        format::quantity(z.magnitude.value(), "Ω", p)
                    )
                }
            },
            Request::Resonance {
                inductance,
                capacitance,
            } => format!(
                "Resonant frequency: {}",
                format::quantity(
                    ac::resonant_frequency(*inductance, *capacitance)?.value(),
                    "Hz",
                    p
                )
            ),
            Request::ThreePhase {
                voltage,
                current,
                power_factor,
                connection,
            } => {
                let pf = config.power_factor.apply(*power_factor)?;
                let power = ac::three_phase_power(*voltage, *current, pf, *connection)?;
                format!(
                    "Three-phase power ({}): {}",
                    connection,
                    format::quantity(power.value(), "W", p)
                )
            },
            Request::Resistor { layout, colors } => {
                format::resistor(&resistor::read_resistor(*layout, colors.as_slice())?, p)
            },
        };
        Ok(text)
    }
}

/// A parsed REPL line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Calculate(Request),
    SetMode(Mode),
    ShowMode,
    Last,
    Help,
    Quit,
}

/// Command names offered for tab completion
pub const COMMANDS: &[&str] = &[
    "ohms",
    "series",
    "parallel",
    "vdiv",
    "idiv",
    "rms",
    "impedance",
    "resonance",
    "three-phase",
    "resistor",
    "mode",
    "last",
    "help",
    "quit",
    "exit",
];

/// Parse a number entered by the user
pub fn parse_number(field: &str, text: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| {
        CalcError::invalid_input(format!("{}: '{}' is not a number", field, text.trim()))
    })
}

/// Parse a resistor list such as `10, 20, 30`
///
/// Commas separate values when present, whitespace otherwise.
pub fn parse_resistances(text: &str) -> Result<Vec<Ohms>> {
    let parts: Vec<&str> = if text.contains(',') {
        text.split(',').collect()
    } else {
        text.split_whitespace().collect()
    };
    parts
        .into_iter()
        .map(|p| parse_number("resistance", p).map(Ohms))
        .collect()
}

/// Split a color list such as `red, violet, orange`
pub fn parse_colors(text: &str) -> Vec<String> {
    let parts: Vec<&str> = if text.contains(',') {
        text.split(',').collect()
    } else {
        text.split_whitespace().collect()
    };
    parts.into_iter().map(|c| c.trim().to_string()).collect()
}

fn expect_args<'a>(args: &[&'a str], count: usize, usage: &str) -> Result<Vec<&'a str>> {
    if args.len() != count {
        return Err(CalcError::invalid_input(format!("usage: {}", usage)));
    }
    Ok(args.to_vec())
}

/// Ohm's law terms: `v=12 i=2`, `r=6`, ...
fn parse_ohms_terms(args: &[&str]) -> Result<OhmsLaw> {
    let mut known = OhmsLaw::new();
    for term in args {
        let (key, value) = term.split_once('=').ok_or_else(|| {
            CalcError::invalid_input(format!("expected key=value, got '{}'", term))
        })?;
        match key.trim().to_lowercase().as_str() {
            "v" | "voltage" => known = known.voltage(parse_number("voltage", value)?),
            "i" | "current" => known = known.current(parse_number("current", value)?),
            "r" | "resistance" => known = known.resistance(parse_number("resistance", value)?),
            other => {
                return Err(CalcError::invalid_input(format!(
                    "unknown quantity '{}' (use v, i or r)",
                    other
                )))
            },
        }
    }
    Ok(known)
}

fn parse_request(name: &str, args: &[&str]) -> Result<Request> {
    let request = match name {
        "ohms" | "ohm" => Request::OhmsLaw(parse_ohms_terms(args)?),
        "series" | "parallel" => {
            if args.is_empty() {
                return Err(CalcError::invalid_input(format!(
                    "usage: {} <r1,r2,...>",
                    name
                )));
            }
            let rs = parse_resistances(&args.join(" "))?;
            if name == "series" {
                Request::Series(rs)
            } else {
                Request::Parallel(rs)
            }
        },
        "vdiv" | "voltage-divider" => {
            let a = expect_args(args, 3, "vdiv <vin> <r1> <r2>")?;
            Request::VoltageDivider {
                vin: Volts(parse_number("vin", a[0])?),
                r1: Ohms(parse_number("r1", a[1])?),
                r2: Ohms(parse_number("r2", a[2])?),
            }
        },
        "idiv" | "current-divider" => {
            let a = expect_args(args, 3, "idiv <itotal> <r1> <r2>")?;
            Request::CurrentDivider {
                itotal: Amps(parse_number("itotal", a[0])?),
                r1: Ohms(parse_number("r1", a[1])?),
                r2: Ohms(parse_number("r2", a[2])?),
            }
        },
        "rms" => {
            if args.len() < 2 {
                return Err(CalcError::invalid_input("usage: rms <peak> <waveform>"));
            }
            Request::Rms {
                peak: Volts(parse_number("peak", args[0])?),
                waveform: args[1..].join(" ").parse()?,
            }
        },
        "impedance" | "z" => {
            let detailed = args.last().is_some_and(|a| a.eq_ignore_ascii_case("detailed"));
            let values = if detailed { &args[..args.len() - 1] } else { args };
            let a = expect_args(values, 4, "impedance <r> <l> <c> <f> [detailed]")?;
            Request::Impedance {
                resistance: Ohms(parse_number("resistance", a[0])?),
                inductance: Henries(parse_number("inductance", a[1])?),
                capacitance: Farads(parse_number("capacitance", a[2])?),
                frequency: Hertz(parse_number("frequency", a[3])?),
                detailed,
            }
        },
        "resonance" => {
            let a = expect_args(args, 2, "resonance <l> <c>")?;
            Request::Resonance {
                inductance: Henries(parse_number("inductance", a[0])?),
                capacitance: Farads(parse_number("capacitance", a[1])?),
            }
        },
        "three-phase" | "3p" => {
            let a = expect_args(args, 4, "three-phase <v> <i> <pf> <wye|delta>")?;
            Request::ThreePhase {
                voltage: Volts(parse_number("phase voltage", a[0])?),
                current: Amps(parse_number("phase current", a[1])?),
                power_factor: parse_number("power factor", a[2])?,
                connection: a[3].parse()?,
            }
        },
        "resistor" | "color" => {
            if args.len() < 2 {
                return Err(CalcError::invalid_input(
                    "usage: resistor <4-band|5-band> <color,color,...>",
                ));
            }
            Request::Resistor {
                layout: args[0].parse()?,
                colors: parse_colors(&args[1..].join(" ")),
            }
        },
        other => {
            return Err(CalcError::invalid_input(format!(
                "unknown command '{}', type 'help' for the list",
                other
            )))
        },
    };
    Ok(request)
}

/// Parse one REPL line; `None` for a blank line
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((first, args)) = parts.split_first() else {
        return Ok(None);
    };

    let command = match first.to_lowercase().as_str() {
        "mode" => match args {
            [] => Command::ShowMode,
            [mode] => Command::SetMode(mode.parse()?),
            _ => return Err(CalcError::invalid_input("usage: mode [dc|ac|reader]")),
        },
        "last" => Command::Last,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        name => Command::Calculate(parse_request(name, args)?),
    };
    Ok(Some(command))
}
