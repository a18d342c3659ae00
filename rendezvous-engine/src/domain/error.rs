//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. They are distinct from provider and planning errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Coordinate outside WGS-84 bounds or not finite
    #[error("invalid coordinate ({lat}, {lon}): {reason}")]
    InvalidCoordinate {
        lat: f64,
        lon: f64,
        reason: &'static str,
    },

    /// Traveler identifier is blank
    #[error("invalid traveler id: {0}")]
    InvalidTravelerId(&'static str),

    /// Color is not `#RRGGBB`
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::InvalidTravelerId("must not be empty");
        assert_eq!(err.to_string(), "invalid traveler id: must not be empty");

        let err = DomainError::InvalidColor {
            value: "red".into(),
            reason: "expected #RRGGBB",
        };
        assert_eq!(err.to_string(), "invalid color \"red\": expected #RRGGBB");

        let err = DomainError::InvalidCoordinate {
            lat: 95.0,
            lon: 1.0,
            reason: "latitude must be within -90..=90",
        };
        assert_eq!(
            err.to_string(),
            "invalid coordinate (95, 1): latitude must be within -90..=90"
        );
    }
}
