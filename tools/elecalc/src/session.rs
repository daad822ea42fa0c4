//! Interactive session state
//!
//! The shell owns one [`Session`]: the selected screen and the text of the
//! last successful result. Nothing else survives between calculations.

use crate::config::ShellConfig;
use crate::format;
use crate::request::{parse_line, Command, Request};
use elec_calc::{CalcError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Calculator screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Dc,
    Ac,
    DeviceReader,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Dc => f.write_str("dc"),
            Mode::Ac => f.write_str("ac"),
            Mode::DeviceReader => f.write_str("reader"),
        }
    }
}

impl FromStr for Mode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dc" => Ok(Mode::Dc),
            "ac" => Ok(Mode::Ac),
            "reader" | "device-reader" | "device" => Ok(Mode::DeviceReader),
            other => Err(CalcError::invalid_input(format!(
                "unknown mode '{}' (expected dc, ac or reader)",
                other
            ))),
        }
    }
}

/// Outcome of one REPL line
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Calculation result or informational text
    Output(String),
    /// Rendered error; the session stays usable
    Error(String),
    Quit,
    /// Blank line
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ShellConfig,
    mode: Option<Mode>,
    last_result: Option<String>,
}

impl Session {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            mode: None,
            last_result: None,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != Some(mode) {
            info!(mode = %mode, "mode selected");
        }
        self.mode = Some(mode);
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// Run a calculation, following it to its screen if another one is selected
    pub fn run(&mut self, request: &Request) -> Result<String> {
        let target = request.mode();
        if self.mode.is_some_and(|m| m != target) {
            self.set_mode(target);
        }

        let text = request.evaluate(&self.config)?;
        debug!(result = %text, "calculation done");
        self.last_result = Some(text.clone());
        Ok(text)
    }

    /// Parse and execute one REPL line
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::Nothing,
            Err(e) => return Reply::Error(format::error(&e)),
        };

        match command {
            Command::Calculate(request) => match self.run(&request) {
                Ok(text) => Reply::Output(text),
                Err(e) => Reply::Error(format::error(&e)),
            },
            Command::SetMode(mode) => {
                self.set_mode(mode);
                Reply::Output(format!("Mode: {}", mode))
            },
            Command::ShowMode => match self.mode {
                Some(mode) => Reply::Output(format!("Mode: {}", mode)),
                None => Reply::Output("No mode selected".to_string()),
            },
            Command::Last => match &self.last_result {
                Some(text) => Reply::Output(text.clone()),
                None => Reply::Output("Results will appear here.".to_string()),
            },
            Command::Help => Reply::Output(help_text(self.mode)),
            Command::Quit => Reply::Quit,
        }
    }

    /// Prompt showing the selected mode
    pub fn prompt(&self) -> String {
        match self.mode {
            Some(mode) => format!("elecalc[{}]> ", mode),
            None => "elecalc> ".to_string(),
        }
    }
}

const DC_HELP: &[(&str, &str)] = &[
    ("ohms v=<V> i=<I> r=<R>", "Ohm's law, give exactly two"),
    ("series <r1,r2,...>", "Series resistance"),
    ("parallel <r1,r2,...>", "Parallel resistance"),
    ("vdiv <vin> <r1> <r2>", "Voltage divider output"),
    ("idiv <itotal> <r1> <r2>", "Current divider branches"),
];

const AC_HELP: &[(&str, &str)] = &[
    ("rms <peak> <waveform>", "RMS voltage"),
    ("impedance <r> <l> <c> <f> [detailed]", "Series RLC impedance"),
    ("resonance <l> <c>", "LC resonant frequency"),
    ("three-phase <v> <i> <pf> <wye|delta>", "Three-phase power"),
];

const READER_HELP: &[(&str, &str)] = &[(
    "resistor <4-band|5-band> <colors...>",
    "Resistor color code",
)];

/// Help listing; the selected mode's commands come first
pub fn help_text(mode: Option<Mode>) -> String {
    let mut sections = vec![
        (Mode::Dc, "DC", DC_HELP),
        (Mode::Ac, "AC", AC_HELP),
        (Mode::DeviceReader, "Device Reader", READER_HELP),
    ];
    if let Some(mode) = mode {
        sections.sort_by_key(|(m, _, _)| *m != mode);
    }

    let mut lines = Vec::new();
    for (_, title, entries) in sections {
        lines.push(format!("=== {} ===", title));
        for (usage, what) in entries {
            lines.push(format!("  {:<40} {}", usage, what));
        }
    }
    lines.push("=== Session ===".to_string());
    lines.push(format!("  {:<40} {}", "mode [dc|ac|reader]", "Show or select a mode"));
    lines.push(format!("  {:<40} {}", "last", "Show the last result"));
    lines.push(format!("  {:<40} {}", "help", "Show this help"));
    lines.push(format!("  {:<40} {}", "quit", "Leave the calculator"));
    lines.join("\n")
}
