use serde::Deserialize;

/// Membership state as reported by the code host.
///
/// Anything other than `Active` does not authorize spending; a `Pending`
/// invitation is surfaced with its own reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipState {
    Active,
    Pending,
}

/// Result of a single membership query. Created per lookup, never stored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MembershipOutcome {
    pub is_member: bool,
    pub state: Option<MembershipState>,
    /// Diagnostic error from a failed lookup, or the fallback annotation.
    /// A plain "no membership record" result leaves this empty.
    pub error: Option<String>,
}

impl MembershipOutcome {
    pub fn with_state(state: MembershipState) -> Self {
        Self {
            is_member: state == MembershipState::Active,
            state: Some(state),
            error: None,
        }
    }

    pub fn non_member() -> Self {
        Self::default()
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            is_member: false,
            state: None,
            error: Some(error.into()),
        }
    }
}

/// Whether a requester may spend funds, and why not if they may not.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizationOutcome {
    pub is_authorized: bool,
    pub reason: Option<String>,
    pub membership: MembershipOutcome,
}
