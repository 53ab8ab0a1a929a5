use compact_str::CompactString;
use std::fmt::{self, Display, Formatter};

/// A roster position symbol ("QB", "RB", "DST", ...). The set of
/// positions is configurable, so this is an interned-ish small string
/// rather than a closed enum. Symbols are normalized to uppercase on
/// construction, which keeps lookups insensitive to how the source
/// table spelled them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position(CompactString);

/// The synthetic slot fillable by any FLEX-eligible position.
pub const FLEX: &str = "FLEX";

impl Position {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Position(CompactString::from(symbol.as_ref().trim().to_uppercase()))
    }

    pub fn flex() -> Self {
        Position(CompactString::const_new(FLEX))
    }

    pub fn is_flex(&self) -> bool {
        self.0 == FLEX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Position {
    fn from(symbol: &str) -> Self {
        Position::new(symbol)
    }
}

impl From<String> for Position {
    fn from(symbol: String) -> Self {
        Position::new(symbol)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Position {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let symbol = <String as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Position::new(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_uppercase() {
        assert_eq!(Position::new(" qb "), Position::new("QB"));
        assert_eq!(Position::new("dst").as_str(), "DST");
    }

    #[test]
    fn flex_is_flex() {
        assert!(Position::flex().is_flex());
        assert!(Position::new("flex").is_flex());
        assert!(!Position::new("WR").is_flex());
    }
}
