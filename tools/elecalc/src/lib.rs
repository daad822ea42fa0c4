//! elecalc - terminal shell around the elec-calc library
//!
//! Turns command-line arguments and REPL lines into calculation requests,
//! runs them, and renders the results as text. The only state is the
//! [`Session`], owned by whoever drives the shell.

pub mod config;
pub mod format;
pub mod repl;
pub mod request;
pub mod session;

pub use config::{load_config, PowerFactorPolicy, ShellConfig};
pub use request::{parse_line, Command, Request};
pub use session::{Mode, Reply, Session};
