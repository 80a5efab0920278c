//! Numeric arguments with optional inclusive bounds.
//!
//! A value outside the bounds fails with `TooLow` / `TooHigh` and rewinds
//! the scanner to the start of the number.

use argot_foundation::{Error, NumberKind, Result};
use argot_grammar::{ArgumentType, Scanner};

macro_rules! numeric_argument {
    (
        $(#[$doc:meta])*
        $name:ident, $value:ty, $kind:ident, $read:ident, [$($example:literal),* $(,)?]
    ) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name {
            min: $value,
            max: $value,
        }

        impl $name {
            /// Accepts any value of the underlying type.
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    min: <$value>::MIN,
                    max: <$value>::MAX,
                }
            }

            /// Accepts values in `min..=max`.
            #[must_use]
            pub const fn between(min: $value, max: $value) -> Self {
                Self { min, max }
            }

            /// Sets the inclusive minimum.
            #[must_use]
            pub const fn with_min(mut self, min: $value) -> Self {
                self.min = min;
                self
            }

            /// Sets the inclusive maximum.
            #[must_use]
            pub const fn with_max(mut self, max: $value) -> Self {
                self.max = max;
                self
            }

            /// The inclusive minimum.
            #[must_use]
            pub const fn min(&self) -> $value {
                self.min
            }

            /// The inclusive maximum.
            #[must_use]
            pub const fn max(&self) -> $value {
                self.max
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ArgumentType for $name {
            type Value = $value;

            fn parse(&self, scanner: &mut Scanner) -> Result<$value> {
                let start = scanner.cursor();
                let value = scanner.$read()?;
                if value < self.min {
                    scanner.set_cursor(start);
                    return Err(scanner.error(Error::too_low(NumberKind::$kind, value, self.min)));
                }
                if value > self.max {
                    scanner.set_cursor(start);
                    return Err(scanner.error(Error::too_high(NumberKind::$kind, value, self.max)));
                }
                Ok(value)
            }

            fn examples(&self) -> Vec<&'static str> {
                vec![$($example),*]
            }
        }
    };
}

numeric_argument!(
    /// Reads a 32-bit integer.
    IntegerArgument, i32, Integer, read_int, ["0", "123", "-123"]
);

numeric_argument!(
    /// Reads a 64-bit integer.
    LongArgument, i64, Long, read_long, ["0", "123", "-123"]
);

numeric_argument!(
    /// Reads a 64-bit float.
    DoubleArgument, f64, Double, read_double, ["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
);

numeric_argument!(
    /// Reads a 32-bit float.
    FloatArgument, f32, Float, read_float, ["0", "1.2", ".5", "-1", "-.5", "-1234.56"]
);
