use crate::errors::{DomainError, DomainResult};
use crate::identifiers::PersonId;
use serde::{Deserialize, Serialize};

/// A user identity. The display name is unique and doubles as the login key;
/// people are provisioned lazily on first todo save and never auto-deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub email: String,
}

impl Person {
    /// The email claim comes from the identity provider and is stored as-is;
    /// its shape is the provider's concern, not ours.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Person name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: PersonId::new(),
            name: name.trim().to_string(),
            email: email.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_requires_a_name() {
        let result = Person::new("  ", "a@example.com");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn email_claim_is_stored_verbatim() {
        let person = Person::new("alice", "opaque-subject-id").unwrap();
        assert_eq!(person.email, "opaque-subject-id");
    }

    #[test]
    fn person_name_is_trimmed() {
        let person = Person::new(" alice ", "alice@example.com").unwrap();
        assert_eq!(person.name, "alice");
    }
}
