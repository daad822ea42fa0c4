//! Unit-tagged electrical quantities
//!
//! Each quantity is a thin `f64` newtype so that a voltage can never be
//! passed where a resistance is expected. They serialize as bare numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, $symbol:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub f64);

        impl $name {
            /// Unit symbol used when displaying the quantity
            pub const SYMBOL: &'static str = $symbol;

            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> f64 {
                self.0
            }
        }

        impl From<f64> for $name {
            fn from(value: f64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f64 {
            fn from(q: $name) -> f64 {
                q.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, Self::SYMBOL),
                    None => write!(f, "{} {}", self.0, Self::SYMBOL),
                }
            }
        }
    };
}

quantity!(
    /// Electric potential in volts
    Volts, "V"
);
quantity!(
    /// Electric current in amperes
    Amps, "A"
);
quantity!(
    /// Resistance, reactance or impedance magnitude in ohms
    Ohms, "Ω"
);
quantity!(
    /// Power in watts
    Watts, "W"
);
quantity!(Henries, "H");
quantity!(Farads, "F");
quantity!(Hertz, "Hz");
