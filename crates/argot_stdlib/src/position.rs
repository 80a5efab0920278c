//! Two-coordinate positions.
//!
//! A position is written `x y`. Each coordinate is either absolute (`12.5`)
//! or relative to an origin (`~3`, or a bare `~` for no offset).

use argot_foundation::{Error, Result};
use argot_grammar::{ArgumentType, CommandContext, SEPARATOR, Scanner, Suggestions, SuggestionsBuilder};

use crate::matching::suggest_matching;

const RELATIVE: char = '~';

/// A resolved point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One coordinate, absolute or relative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    relative: bool,
    value: f64,
}

impl Coordinate {
    /// An absolute coordinate.
    #[must_use]
    pub const fn absolute(value: f64) -> Self {
        Self {
            relative: false,
            value,
        }
    }

    /// A coordinate offset from the origin.
    #[must_use]
    pub const fn relative(offset: f64) -> Self {
        Self {
            relative: true,
            value: offset,
        }
    }

    /// Returns true for `~` coordinates.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.relative
    }

    /// The written value (offset for relative coordinates).
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Resolves against `origin`.
    #[must_use]
    pub fn resolve(&self, origin: f64) -> f64 {
        if self.relative {
            origin + self.value
        } else {
            self.value
        }
    }

    /// Reads one coordinate.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteArgument` at end of input, or the number error for
    /// a malformed value.
    pub fn parse(scanner: &mut Scanner) -> Result<Self> {
        if !scanner.can_read() {
            return Err(scanner.error(Error::incomplete_argument("missing coordinate")));
        }

        let relative = scanner.next_is(RELATIVE);
        if relative {
            scanner.skip();
            if !scanner.can_read() || scanner.next_is(SEPARATOR) {
                return Ok(Self::relative(0.0));
            }
        }

        let value = scanner.read_double()?;
        Ok(Self { relative, value })
    }
}

/// A parsed `x y` position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: Coordinate,
    /// Vertical coordinate.
    pub y: Coordinate,
}

impl Position {
    /// Resolves both coordinates against `origin`.
    #[must_use]
    pub fn resolve(&self, origin: Point) -> Point {
        Point::new(self.x.resolve(origin.x), self.y.resolve(origin.y))
    }

    /// Returns true if either coordinate is relative.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.x.relative || self.y.relative
    }
}

/// Reads a [`Position`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionArgument {
    candidates: Vec<(String, String)>,
}

impl PositionArgument {
    /// Creates a position argument suggesting the origin (`~ ~`).
    ///
    /// Suggestions are always complete positions, so applying one leaves
    /// input that parses.
    #[must_use]
    pub fn new() -> Self {
        Self {
            candidates: vec![("~".to_string(), "~".to_string())],
        }
    }

    /// Replaces the suggested positions with `(x, y)` pairs.
    #[must_use]
    pub fn with_candidates<I, X, Y>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = (X, Y)>,
        X: Into<String>,
        Y: Into<String>,
    {
        self.candidates = candidates
            .into_iter()
            .map(|(x, y)| (x.into(), y.into()))
            .collect();
        self
    }

    fn accepts(&self, text: &str) -> bool {
        let mut scanner = Scanner::new(text);
        self.parse(&mut scanner).is_ok() && !scanner.can_read()
    }
}

impl Default for PositionArgument {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgumentType for PositionArgument {
    type Value = Position;

    fn parse(&self, scanner: &mut Scanner) -> Result<Position> {
        let start = scanner.cursor();
        let x = Coordinate::parse(scanner)?;
        if !scanner.next_is(SEPARATOR) {
            scanner.set_cursor(start);
            return Err(scanner.error(Error::incomplete_argument("expected two coordinates")));
        }
        scanner.skip();
        let y = Coordinate::parse(scanner)?;
        Ok(Position { x, y })
    }

    fn list_suggestions<S>(
        &self,
        _context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions> {
        let remaining = builder.remaining().to_string();
        let mut list = Vec::new();

        if remaining.is_empty() {
            for (x, y) in &self.candidates {
                let both = format!("{x} {y}");
                if self.accepts(&both) {
                    list.push(both);
                }
            }
        } else if !remaining.contains(SEPARATOR) {
            for (_, y) in &self.candidates {
                let both = format!("{remaining} {y}");
                if self.accepts(&both) {
                    list.push(both);
                }
            }
        }

        Ok(suggest_matching(list, builder))
    }

    fn examples(&self) -> Vec<&'static str> {
        vec!["0 0", "~ ~", "~0.5 ~1", "~-5 ~5", "3 ~"]
    }
}
