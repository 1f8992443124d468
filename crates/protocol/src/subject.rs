use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;
use crate::identity::IdentityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Brother,
    Sister,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Brother, Gender::Sister];

    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Brother => "Brother",
            Gender::Sister => "Sister",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Brother" => Ok(Gender::Brother),
            "Sister" => Ok(Gender::Sister),
            other => Err(ProtocolError::UnknownGender(other.to_string())),
        }
    }
}

/// Identity details captured before topic selection.
///
/// Name fields are stored verbatim; an empty string is a valid answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub identity_id: IdentityId,
    pub gender: Gender,
    pub name: String,
    pub father_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn gender_round_trips_through_display() {
        for gender in Gender::ALL {
            assert_eq!(gender.to_string().parse::<Gender>(), Ok(gender));
        }
    }

    #[test]
    fn gender_rejects_lowercase() {
        assert_eq!(
            "brother".parse::<Gender>(),
            Err(ProtocolError::UnknownGender("brother".to_string()))
        );
    }

    #[test]
    fn gender_serializes_as_plain_text() {
        let raw = serde_json::to_string(&Gender::Sister).unwrap();
        assert_eq!(raw, "\"Sister\"");
    }
}
