//! Request context carrying the authenticated principal.

use chrono::{DateTime, Utc};

use tenanthub_entity::principal::Principal;

/// Context for the current authenticated request.
///
/// Built by the transport (or CLI) after token validation and a principal
/// lookup, then passed into service methods so that every operation knows
/// *who* is acting. The full principal travels here rather than bare
/// claims: authorization needs the live role set, company linkage, and
/// superuser flag, not what the token said at issuance time.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated principal.
    pub principal: Principal,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            request_time: Utc::now(),
        }
    }

    /// Whether the acting principal is platform staff (or the bootstrap
    /// superuser).
    pub fn is_staff(&self) -> bool {
        self.principal.is_superuser || self.principal.holds_staff_role()
    }
}
