//! Player profiles and their input validation.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};

/// Maximum player name length, in characters.
pub const MAX_NAME_LEN: usize = 10;

/// A VIP level, always a single digit 1-9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct VipLevel(u8);

impl VipLevel {
    /// Parse a VIP level from raw input. Exactly one digit 1-9 is accepted.
    pub fn parse(s: &str) -> ValidationResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ '1'..='9'), None) => Ok(Self(c as u8 - b'0')),
            _ => Err(ValidationError::InvalidVip(s.to_string())),
        }
    }

    /// The numeric level.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for VipLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> ValidationResult<Self> {
        if (1..=9).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidVip(value.to_string()))
        }
    }
}

impl From<VipLevel> for u8 {
    fn from(level: VipLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for VipLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw, unvalidated profile answers as typed by the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInput {
    /// Player name.
    pub name: String,
    /// VIP level as typed.
    pub vip: String,
    /// Answer to "will you burn at least 3 legendary photos?" (`Y`/`N`).
    pub legendary: String,
    /// Answer to "will you burn at least 4 epic photos?" (`Y`/`N`).
    pub epic: String,
}

impl ProfileInput {
    /// Build input from the four raw answers.
    pub fn new(
        name: impl Into<String>,
        vip: impl Into<String>,
        legendary: impl Into<String>,
        epic: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vip: vip.into(),
            legendary: legendary.into(),
            epic: epic.into(),
        }
    }

    /// Validate the answers into a profile.
    ///
    /// Checks run in the order the player fills the form: presence of name
    /// and VIP, name length, VIP format, then both pledge answers.
    pub fn validate(&self) -> ValidationResult<PlayerProfile> {
        if self.name.is_empty() || self.vip.is_empty() {
            return Err(ValidationError::MissingProfileFields);
        }

        let len = self.name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                len,
                max: MAX_NAME_LEN,
            });
        }

        let vip_level = VipLevel::parse(&self.vip)?;
        let will_burn_legendary = parse_pledge("legendary", &self.legendary)?;
        let will_burn_epic = parse_pledge("epic", &self.epic)?;

        Ok(PlayerProfile {
            name: self.name.clone(),
            vip_level,
            will_burn_legendary,
            will_burn_epic,
        })
    }
}

fn parse_pledge(question: &'static str, value: &str) -> ValidationResult<bool> {
    match value {
        "Y" => Ok(true),
        "N" => Ok(false),
        _ => Err(ValidationError::InvalidAnswer {
            question,
            value: value.to_string(),
        }),
    }
}

/// A validated player profile. Immutable once the session is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    /// Player name (1-10 characters).
    pub name: String,
    /// VIP level.
    pub vip_level: VipLevel,
    /// Pledged at least 3 legendary photos.
    pub will_burn_legendary: bool,
    /// Pledged at least 4 epic photos.
    pub will_burn_epic: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, vip: &str, legendary: &str, epic: &str) -> ProfileInput {
        ProfileInput::new(name, vip, legendary, epic)
    }

    #[test]
    fn valid_profile() {
        let profile = input("Mira", "6", "Y", "N").validate().unwrap();
        assert_eq!(profile.name, "Mira");
        assert_eq!(profile.vip_level.value(), 6);
        assert!(profile.will_burn_legendary);
        assert!(!profile.will_burn_epic);
    }

    #[test]
    fn missing_fields() {
        assert_eq!(
            input("", "5", "Y", "Y").validate(),
            Err(ValidationError::MissingProfileFields)
        );
        assert_eq!(
            input("Mira", "", "Y", "Y").validate(),
            Err(ValidationError::MissingProfileFields)
        );
    }

    #[test]
    fn name_length_limit() {
        assert!(input("ABCDEFGHIJ", "1", "N", "N").validate().is_ok());
        assert_eq!(
            input("ABCDEFGHIJK", "1", "N", "N").validate(),
            Err(ValidationError::NameTooLong { len: 11, max: 10 })
        );
    }

    #[test]
    fn name_length_counts_characters() {
        // Ten characters, more than ten bytes.
        assert!(input("ÇağrıŞükrü", "3", "N", "N").validate().is_ok());
    }

    #[test]
    fn vip_must_be_single_digit() {
        for bad in ["0", "10", "a", "-1", " 5", "5 "] {
            assert_eq!(
                input("Mira", bad, "N", "N").validate(),
                Err(ValidationError::InvalidVip(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn pledge_answers_are_case_sensitive() {
        let err = input("Mira", "4", "y", "N").validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidAnswer {
                question: "legendary",
                ..
            }
        ));

        let err = input("Mira", "4", "N", "yes").validate().unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidAnswer {
                question: "epic",
                ..
            }
        ));
    }

    #[test]
    fn vip_level_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<VipLevel>("7").is_ok());
        assert!(serde_json::from_str::<VipLevel>("0").is_err());
        assert!(serde_json::from_str::<VipLevel>("12").is_err());
    }

    #[test]
    fn profile_serializes_camel_case() {
        let profile = input("Mira", "9", "N", "Y").validate().unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["vipLevel"], 9);
        assert_eq!(json["willBurnEpic"], true);
    }
}
