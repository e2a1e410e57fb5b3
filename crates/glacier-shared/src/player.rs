use std::fmt::Display;

use crate::errors::ConversionError;

/// In-game username of the player an entitlement is granted to
///
/// The API matches player names case-insensitively by storing them
/// lowercased, so the name is folded to lowercase on construction and every
/// transmitted value is already normalized.
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct PlayerUsername(String);

impl PlayerUsername {
    pub const MAX_LENGTH: usize = 16;
}

impl TryFrom<String> for PlayerUsername {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value.to_lowercase()))
    }
}

impl TryFrom<&str> for PlayerUsername {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<PlayerUsername> for String {
    fn from(value: PlayerUsername) -> Self {
        value.0
    }
}

impl AsRef<str> for PlayerUsername {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerUsername {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::mixed_case("Steve", "steve")]
    #[case::already_lower("alex", "alex")]
    #[case::upper("NOTCH", "notch")]
    fn usernames_are_lowercased_on_construction(#[case] input: &str, #[case] expect: &str) {
        // Act
        let actual: PlayerUsername = input.try_into().unwrap();

        // Assert
        assert_eq!(actual.as_ref(), expect);
    }

    #[rstest]
    #[case::empty("", ConversionError::Empty)]
    #[case::too_long("s".repeat(17), ConversionError::MaxExceeded{max:16, actual:17})]
    fn illegal_usernames(#[case] name: String, #[case] expect: ConversionError) {
        // Act
        let actual: Result<PlayerUsername, ConversionError> = name.try_into();

        // Assert
        assert_eq!(actual.unwrap_err(), expect);
    }

    #[test]
    fn serializes_as_the_lowercased_string() {
        let name: PlayerUsername = "Steve".try_into().unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), r#""steve""#);
    }
}
