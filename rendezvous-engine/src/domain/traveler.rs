//! Traveler identity, mode, and display types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Coordinate, DomainError};

/// A non-empty traveler identifier.
///
/// # Examples
///
/// ```
/// use rendezvous_engine::domain::TravelerId;
///
/// let id = TravelerId::parse(" alice ").unwrap();
/// assert_eq!(id.as_str(), "alice");
///
/// assert!(TravelerId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TravelerId(String);

impl TravelerId {
    /// Parse an identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTravelerId("must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TravelerId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TravelerId> for String {
    fn from(id: TravelerId) -> Self {
        id.0
    }
}

impl fmt::Debug for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TravelerId({})", self.0)
    }
}

impl fmt::Display for TravelerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A display color in `#RRGGBB` form.
///
/// Stored uppercase so two spellings of the same color compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// Parse a `#RRGGBB` color.
    ///
    /// ```
    /// use rendezvous_engine::domain::Color;
    ///
    /// assert_eq!(Color::parse("#ff8800").unwrap().as_str(), "#FF8800");
    /// assert!(Color::parse("ff8800").is_err());
    /// assert!(Color::parse("#ff88").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &'static str| DomainError::InvalidColor {
            value: s.to_string(),
            reason,
        };

        let hex = s.strip_prefix('#').ok_or_else(|| invalid("expected leading '#'"))?;
        if hex.len() != 6 {
            return Err(invalid("expected 6 hex digits"));
        }
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("expected hex digits 0-9, A-F"));
        }

        Ok(Self(format!("#{}", hex.to_ascii_uppercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Color {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({})", self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a traveler gets to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    Car,
    Transit,
    Walk,
}

impl TravelMode {
    /// Human-readable label for narratives.
    pub fn label(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Transit => "public transit",
            TravelMode::Walk => "on foot",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mode-specific route search preference.
///
/// The value is passed through to the route provider unchanged; its meaning
/// depends on the traveler's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchOption(pub i32);

impl SearchOption {
    /// Provider's default recommendation.
    pub const RECOMMENDED: SearchOption = SearchOption(0);
    /// Shortest travel time.
    pub const FASTEST: SearchOption = SearchOption(1);
    /// Lowest fare (car: toll-free).
    pub const CHEAPEST: SearchOption = SearchOption(2);
    /// Transit only: fewest vehicle changes. Shares a value with `CHEAPEST`.
    pub const FEWEST_TRANSFERS: SearchOption = SearchOption(2);
    /// Transit only: least walking between stops.
    pub const LEAST_WALKING: SearchOption = SearchOption(3);
}

/// A member of the group being planned for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traveler {
    pub id: TravelerId,
    pub name: String,
    /// Unset means the traveler cannot be routed yet.
    pub origin: Option<Coordinate>,
    pub mode: TravelMode,
    #[serde(default)]
    pub option: SearchOption,
    pub color: Color,
}

impl Traveler {
    pub fn new(
        id: TravelerId,
        name: impl Into<String>,
        origin: Option<Coordinate>,
        mode: TravelMode,
        color: Color,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            origin,
            mode,
            option: SearchOption::RECOMMENDED,
            color,
        }
    }

    /// Set the route search preference.
    pub fn with_option(mut self, option: SearchOption) -> Self {
        self.option = option;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traveler_id_rejects_blank() {
        assert!(TravelerId::parse("").is_err());
        assert!(TravelerId::parse(" \t").is_err());
        assert_eq!(TravelerId::parse("bob").unwrap().to_string(), "bob");
    }

    #[test]
    fn color_normalizes_case() {
        assert_eq!(Color::parse("#abcdef").unwrap(), Color::parse("#ABCDEF").unwrap());
    }

    #[test]
    fn color_rejects_bad_digits() {
        assert!(Color::parse("#GG0000").is_err());
        assert!(Color::parse("#12345").is_err());
        assert!(Color::parse("#1234567").is_err());
        assert!(Color::parse("").is_err());
    }

    #[test]
    fn traveler_deserializes_with_default_option() {
        let json = r##"{
            "id": "a",
            "name": "Alice",
            "origin": {"lat": 37.5, "lon": 127.0},
            "mode": "TRANSIT",
            "color": "#3366ff"
        }"##;

        let traveler: Traveler = serde_json::from_str(json).unwrap();
        assert_eq!(traveler.mode, TravelMode::Transit);
        assert_eq!(traveler.option, SearchOption::RECOMMENDED);
        assert_eq!(traveler.color.as_str(), "#3366FF");
    }

    #[test]
    fn traveler_deserialize_rejects_blank_id() {
        let json = r##"{"id": " ", "name": "X", "origin": null, "mode": "WALK", "color": "#000000"}"##;
        assert!(serde_json::from_str::<Traveler>(json).is_err());
    }

    #[test]
    fn with_option_overrides_default() {
        let t = Traveler::new(
            TravelerId::parse("c").unwrap(),
            "Carol",
            None,
            TravelMode::Car,
            Color::parse("#000000").unwrap(),
        )
        .with_option(SearchOption::FASTEST);
        assert_eq!(t.option, SearchOption::FASTEST);
    }
}
