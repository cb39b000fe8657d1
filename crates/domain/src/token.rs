use crate::identifiers::{PersonId, TodoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use subtle::ConstantTimeEq;

/// Single-use confirmation token attached to a collaboration request.
///
/// The token is an opaque bearer secret: a SHA3-256 hex digest over the todo
/// id, the collaborator id, and the issuance timestamp at nanosecond
/// precision. The timestamp is never stored, so the value cannot be
/// re-derived later; only the stored digest is compared at confirmation
/// time, in constant time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfirmationToken(String);

impl ConfirmationToken {
    pub fn issue(todo_id: &TodoId, collaborator_id: &PersonId, issued_at: DateTime<Utc>) -> Self {
        let mut hasher = Sha3_256::new();
        hasher.update(todo_id.as_str().as_bytes());
        hasher.update(b"/");
        hasher.update(collaborator_id.as_str().as_bytes());
        hasher.update(b"/");
        hasher.update(
            issued_at
                .timestamp_nanos_opt()
                .unwrap_or_else(|| issued_at.timestamp_micros())
                .to_be_bytes(),
        );
        Self(hex::encode(hasher.finalize()))
    }

    /// Rehydrate a token read back from storage or a message payload.
    pub fn from_string(token: String) -> Self {
        Self(token)
    }

    pub fn matches(&self, supplied: &str) -> bool {
        self.0.as_bytes().ct_eq(supplied.as_bytes()).into()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn token_is_a_sha3_256_hex_digest() {
        let token = ConfirmationToken::issue(&TodoId::new(), &PersonId::new(), Utc::now());
        assert_eq!(token.as_str().len(), 64);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn same_inputs_produce_the_same_token() {
        let todo_id = TodoId::new();
        let collaborator = PersonId::new();
        let issued_at = Utc::now();

        let a = ConfirmationToken::issue(&todo_id, &collaborator, issued_at);
        let b = ConfirmationToken::issue(&todo_id, &collaborator, issued_at);
        assert_eq!(a, b);
    }

    #[test]
    fn issuance_time_changes_the_token() {
        let todo_id = TodoId::new();
        let collaborator = PersonId::new();
        let issued_at = Utc::now();

        let a = ConfirmationToken::issue(&todo_id, &collaborator, issued_at);
        let b = ConfirmationToken::issue(&todo_id, &collaborator, issued_at + Duration::nanoseconds(1));
        assert_ne!(a, b);
    }

    #[test]
    fn different_collaborators_get_different_tokens() {
        let todo_id = TodoId::new();
        let issued_at = Utc::now();

        let a = ConfirmationToken::issue(&todo_id, &PersonId::new(), issued_at);
        let b = ConfirmationToken::issue(&todo_id, &PersonId::new(), issued_at);
        assert_ne!(a, b);
    }

    #[test]
    fn matches_compares_exactly() {
        let token = ConfirmationToken::issue(&TodoId::new(), &PersonId::new(), Utc::now());
        assert!(token.matches(token.as_str()));
        assert!(!token.matches("deadbeef"));
        assert!(!token.matches(&token.as_str()[..63]));
    }
}
