use crate::domain::membership::MembershipState;
use crate::domain::outcome::{BalanceSnapshot, TransactionOutcome};
use crate::domain::tip::TipRequest;
use crate::error::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Reference to the issue or pull-request thread a comment lives in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// An inbound "comment created" notification.
///
/// Issue comments and review comments are delivered in the same shape and
/// treated identically.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommentEvent {
    pub author: String,
    #[serde(default)]
    pub author_is_bot: bool,
    pub body: String,
    pub issue: IssueRef,
    pub comment_id: u64,
}

/// Acknowledgment marker added to the origin comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Eyes,
    ThumbsDown,
}

impl Reaction {
    /// The code host's content string for this marker.
    pub fn content(&self) -> &'static str {
        match self {
            Reaction::Eyes => "eyes",
            Reaction::ThumbsDown => "-1",
        }
    }
}

/// The narrow slice of the code-hosting platform this crate needs.
///
/// Membership queries distinguish "no record" (`Ok(None)`) from a failed
/// lookup (`Err`); the authorization resolver relies on that distinction
/// to decide whether to fall back to the organization tier.
#[async_trait]
pub trait CodeHost: Send + Sync {
    async fn team_membership(
        &self,
        org: &str,
        team: &str,
        user: &str,
    ) -> Result<Option<MembershipState>>;

    async fn org_membership(&self, org: &str, user: &str) -> Result<Option<MembershipState>>;

    /// Post a comment on the thread, returning its identifier.
    async fn create_comment(&self, issue: &IssueRef, body: &str) -> Result<u64>;

    async fn update_comment(&self, issue: &IssueRef, comment_id: u64, body: &str) -> Result<()>;

    async fn add_reaction(
        &self,
        issue: &IssueRef,
        comment_id: u64,
        reaction: Reaction,
    ) -> Result<()>;
}

/// Ledger-facing service: submits transfers and reports wallet health.
#[async_trait]
pub trait ChainService: Send + Sync {
    /// Submit a transfer and wait for finality. Failures are reported in
    /// the outcome rather than as an error, since by this point the
    /// requester is entitled to see them.
    async fn send_tip(&self, request: &TipRequest) -> TransactionOutcome;

    async fn check_balance(&self) -> BalanceSnapshot;

    /// Tear down the underlying connection. Idempotent; safe to call on
    /// shutdown and between test runs.
    async fn disconnect(&self) -> Result<()>;
}

pub type CodeHostBox = Box<dyn CodeHost>;
pub type ChainServiceBox = Box<dyn ChainService>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_content_strings() {
        assert_eq!(Reaction::Eyes.content(), "eyes");
        assert_eq!(Reaction::ThumbsDown.content(), "-1");
    }

    #[test]
    fn test_comment_event_deserializes_from_webhook_payload() {
        let payload = r#"{
            "author": "alice",
            "body": "@tipbot tip 5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY 10 DOT",
            "issue": { "owner": "fluffylabs", "repo": "tips", "number": 7 },
            "comment_id": 42
        }"#;
        let event: CommentEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(event.author, "alice");
        assert!(!event.author_is_bot);
        assert_eq!(event.issue.number, 7);
        assert_eq!(event.comment_id, 42);
    }
}
