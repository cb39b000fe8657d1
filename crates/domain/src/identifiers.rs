use crate::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn from_string(s: String) -> DomainResult<Self> {
        Ulid::from_string(&s).map_err(|_| DomainError::InvalidTodoId(s.clone()))?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn from_string(s: String) -> DomainResult<Self> {
        Ulid::from_string(&s).map_err(|_| DomainError::InvalidPersonId(s.clone()))?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for PersonId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollaborationRequestId(String);

impl CollaborationRequestId {
    pub fn new() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn from_string(s: String) -> DomainResult<Self> {
        Ulid::from_string(&s).map_err(|_| DomainError::InvalidCollaborationRequestId(s.clone()))?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollaborationRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for CollaborationRequestId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_round_trips_through_string() {
        let id = TodoId::new();
        let parsed = TodoId::from_string(id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn malformed_todo_id_is_rejected() {
        let result = TodoId::from_string("not-a-ulid".to_string());
        assert!(matches!(result, Err(DomainError::InvalidTodoId(_))));
    }

    #[test]
    fn malformed_person_id_is_rejected() {
        let result = PersonId::from_string("".to_string());
        assert!(matches!(result, Err(DomainError::InvalidPersonId(_))));
    }
}
