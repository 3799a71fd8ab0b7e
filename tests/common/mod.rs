use async_trait::async_trait;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tipbot::config::{BotConfig, ChainConfig, GithubConfig};
use tipbot::domain::membership::MembershipState;
use tipbot::domain::policy::TipLimits;
use tipbot::domain::ports::{CodeHost, CommentEvent, IssueRef, Reaction};
use tipbot::error::{Result, TipError};

pub const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

/// Scripted answer for one membership tier.
#[derive(Clone)]
pub enum Answer {
    State(MembershipState),
    NotFound,
    Fail(&'static str),
}

/// Outbound platform calls recorded by the fake code host, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Reaction {
        comment_id: u64,
        content: &'static str,
    },
    Created {
        id: u64,
        body: String,
    },
    Updated {
        comment_id: u64,
        body: String,
    },
}

/// In-memory code host: membership answers are scripted and every
/// outbound call is recorded for assertions. Cloning shares the record.
#[derive(Clone)]
pub struct RecordingHost {
    team: Answer,
    org: Answer,
    calls: Arc<Mutex<Vec<HostCall>>>,
    next_id: Arc<AtomicU64>,
}

impl RecordingHost {
    pub fn new(team: Answer, org: Answer) -> Self {
        Self {
            team,
            org,
            calls: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(100)),
        }
    }

    pub fn active_team_member() -> Self {
        Self::new(Answer::State(MembershipState::Active), Answer::NotFound)
    }

    pub fn outsider() -> Self {
        Self::new(Answer::NotFound, Answer::NotFound)
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn resolve(answer: &Answer) -> Result<Option<MembershipState>> {
    match answer {
        Answer::State(state) => Ok(Some(*state)),
        Answer::NotFound => Ok(None),
        Answer::Fail(message) => Err(TipError::Host((*message).to_string())),
    }
}

#[async_trait]
impl CodeHost for RecordingHost {
    async fn team_membership(
        &self,
        _org: &str,
        _team: &str,
        _user: &str,
    ) -> Result<Option<MembershipState>> {
        resolve(&self.team)
    }

    async fn org_membership(&self, _org: &str, _user: &str) -> Result<Option<MembershipState>> {
        resolve(&self.org)
    }

    async fn create_comment(&self, _issue: &IssueRef, body: &str) -> Result<u64> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(HostCall::Created {
            id,
            body: body.to_string(),
        });
        Ok(id)
    }

    async fn update_comment(&self, _issue: &IssueRef, comment_id: u64, body: &str) -> Result<()> {
        self.calls.lock().unwrap().push(HostCall::Updated {
            comment_id,
            body: body.to_string(),
        });
        Ok(())
    }

    async fn add_reaction(
        &self,
        _issue: &IssueRef,
        comment_id: u64,
        reaction: Reaction,
    ) -> Result<()> {
        self.calls.lock().unwrap().push(HostCall::Reaction {
            comment_id,
            content: reaction.content(),
        });
        Ok(())
    }
}

/// Config fixture with DOT ceiling 10 and USDC ceiling 100.
pub fn config() -> BotConfig {
    BotConfig {
        github: GithubConfig {
            org: "fluffylabs".to_string(),
            team: "core-team".to_string(),
        },
        chain: ChainConfig {
            wallet_seed:
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about"
                    .to_string(),
            rpc_endpoint: "wss://test-rpc.example.com".to_string(),
            limits: TipLimits {
                max_dot: rust_decimal_macros::dec!(10),
                max_usdc: rust_decimal_macros::dec!(100),
            },
        },
    }
}

/// A comment event on issue 1, comment id 1.
pub fn event(author: &str, body: &str) -> CommentEvent {
    CommentEvent {
        author: author.to_string(),
        author_is_bot: false,
        body: body.to_string(),
        issue: IssueRef {
            owner: "fluffylabs".to_string(),
            repo: "testing-things".to_string(),
            number: 1,
        },
        comment_id: 1,
    }
}
