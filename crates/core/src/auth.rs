use serde::{Deserialize, Serialize};

/// Identity of the administrator acting in the dashboard.
///
/// Issued by the authentication collaborator; this crate only carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    subject: String,
    email: Option<String>,
}

impl AdminIdentity {
    /// Creates an identity from the directory id claim and an optional email.
    #[must_use]
    pub fn new(subject: impl Into<String>, email: Option<String>) -> Self {
        Self {
            subject: subject.into(),
            email,
        }
    }

    /// Returns the directory identifier of the acting admin.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the email, if the identity provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
