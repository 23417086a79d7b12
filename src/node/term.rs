//! Port direction.

use std::fmt;

/// Direction of a terminal on a component boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    In,
    Out,
    #[default]
    None,
}

impl Direction {
    /// Canonical lowercase token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::None => "none",
        }
    }

    /// Swap `In` and `Out`; `None` stays `None`.
    pub fn invert(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
            Direction::None => Direction::None,
        }
    }

    /// Parse a direction keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            "none" => Some(Direction::None),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_tokens() {
        assert_eq!(Direction::In.as_str(), "in");
        assert_eq!(Direction::Out.to_string(), "out");
        assert_eq!(Direction::None.as_str(), "none");
        assert_eq!(Direction::from_keyword("OUT"), Some(Direction::Out));
        assert_eq!(Direction::from_keyword("inout"), None);
    }

    #[test]
    fn test_invert() {
        assert_eq!(Direction::In.invert(), Direction::Out);
        assert_eq!(Direction::Out.invert(), Direction::In);
        assert_eq!(Direction::None.invert(), Direction::None);
        assert_eq!(Direction::In.invert().invert(), Direction::In);
    }
}
