/// The authenticated caller, as established by whatever inbound layer fronts
/// this service. Passed explicitly into operations that need it rather than
/// read from ambient global state, and typed rather than extracted from a
/// generic principal object.
pub trait IdentityContext: Send + Sync {
    fn principal_name(&self) -> &str;
    fn principal_email(&self) -> &str;
}

/// A fixed identity, for tests and non-interactive callers.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    name: String,
    email: String,
}

impl StaticIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl IdentityContext for StaticIdentity {
    fn principal_name(&self) -> &str {
        &self.name
    }

    fn principal_email(&self) -> &str {
        &self.email
    }
}
