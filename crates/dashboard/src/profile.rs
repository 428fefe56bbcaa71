use serde::Serialize;

/// Signed-in operator shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    pub location: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::sample()
    }
}

impl UserProfile {
    pub fn sample() -> Self {
        Self {
            name: "Jordan Lee".to_string(),
            email: "jordan.lee@example.com".to_string(),
            role: "Inventory Manager".to_string(),
            location: "Main Warehouse".to_string(),
        }
    }

    /// Initials for the avatar badge.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_letter_of_each_word() {
        assert_eq!(UserProfile::sample().initials(), "JL");

        let profile = UserProfile {
            name: "ada  m. byron".to_string(),
            ..UserProfile::sample()
        };
        assert_eq!(profile.initials(), "AMB");
    }
}
