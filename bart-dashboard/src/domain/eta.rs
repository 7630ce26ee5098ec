//! Minutes-until-departure values.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The literal token BART uses for a train that is at the platform.
const LEAVING: &str = "Leaving";

/// Minutes until a train departs, as reported by an ETD estimate.
///
/// BART reports either a whole number of minutes or the literal token
/// `"Leaving"`. `Leaving` is its own variant and is never treated as a
/// number; any other token is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Eta {
    /// The train is at the platform.
    Leaving,
    /// Whole minutes until departure.
    Minutes(u32),
    /// Anything else the API sent, untouched.
    Other(String),
}

impl Eta {
    /// Interpret a raw `minutes` field.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == LEAVING {
            return Eta::Leaving;
        }
        match trimmed.parse::<u32>() {
            Ok(mins) => Eta::Minutes(mins),
            Err(_) => Eta::Other(raw.to_string()),
        }
    }

    /// Whether the departure falls inside a lookahead window.
    ///
    /// `Leaving` is always inside. Tokens that are not numbers are never
    /// "greater than" the window, so they are kept too.
    pub fn within(&self, lookahead_mins: u32) -> bool {
        match self {
            Eta::Minutes(mins) => *mins <= lookahead_mins,
            Eta::Leaving | Eta::Other(_) => true,
        }
    }

    /// Label used on departure boards: `Leaving` or `"<n> min"`.
    pub fn label(&self) -> String {
        match self {
            Eta::Leaving => LEAVING.to_string(),
            Eta::Minutes(mins) => format!("{mins} min"),
            Eta::Other(raw) => format!("{raw} min"),
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eta::Leaving => f.write_str(LEAVING),
            Eta::Minutes(mins) => write!(f, "{mins}"),
            Eta::Other(raw) => f.write_str(raw),
        }
    }
}

impl Serialize for Eta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Eta {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Eta::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaving_is_not_a_number() {
        let eta = Eta::parse("Leaving");
        assert_eq!(eta, Eta::Leaving);
        assert_eq!(eta.to_string(), "Leaving");
        assert_eq!(eta.label(), "Leaving");
    }

    #[test]
    fn numeric_minutes() {
        assert_eq!(Eta::parse("7"), Eta::Minutes(7));
        assert_eq!(Eta::parse(" 12 "), Eta::Minutes(12));
        assert_eq!(Eta::parse("7").label(), "7 min");
    }

    #[test]
    fn unknown_tokens_kept_verbatim() {
        let eta = Eta::parse("leaving soon");
        assert_eq!(eta, Eta::Other("leaving soon".into()));
        assert_eq!(eta.to_string(), "leaving soon");
    }

    #[test]
    fn lookahead_window() {
        assert!(Eta::Leaving.within(20));
        assert!(Eta::Minutes(20).within(20));
        assert!(!Eta::Minutes(21).within(20));
        assert!(Eta::Other("?".into()).within(20));
    }

    #[test]
    fn serializes_as_the_upstream_string() {
        let json = serde_json::to_string(&vec![Eta::Leaving, Eta::Minutes(4)]).unwrap();
        assert_eq!(json, r#"["Leaving","4"]"#);

        let back: Vec<Eta> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Eta::Leaving, Eta::Minutes(4)]);
    }
}
