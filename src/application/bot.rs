use crate::application::authorization::check_authorization;
use crate::config::BotConfig;
use crate::domain::outcome::{BalanceWarning, TipProcessingOutcome, TransactionOutcome};
use crate::domain::policy::{balance_warnings, check_limit};
use crate::domain::ports::{ChainServiceBox, CodeHostBox, CommentEvent, IssueRef, Reaction};
use crate::domain::tip::TipRequest;
use crate::error::Result;
use crate::interfaces::comment::CommentParser;
use tracing::{info, warn};

/// End-to-end tip request orchestrator.
///
/// Owns the injected code-host and ledger capabilities and drives one
/// comment through parsing, authorization, limit enforcement, submission
/// and reporting. Holds no state between comments; everything transient
/// lives for a single `handle_comment` call.
pub struct TipBot {
    host: CodeHostBox,
    chain: ChainServiceBox,
    config: BotConfig,
}

impl TipBot {
    pub fn new(host: CodeHostBox, chain: ChainServiceBox, config: BotConfig) -> Self {
        Self {
            host,
            chain,
            config,
        }
    }

    /// Run parsing, authorization and limit checks for a comment without
    /// any side effects. Stages run strictly in that order; the first
    /// failing stage terminates the pipeline.
    pub async fn process_tip_comment(&self, author: &str, body: &str) -> TipProcessingOutcome {
        let org = &self.config.github.org;
        let team = &self.config.github.team;

        let request = match CommentParser::parse(body) {
            Err(e) if !e.is_tip_attempt() => return TipProcessingOutcome::not_an_attempt(),
            Err(e) => {
                // Malformed but genuine attempt: authorization still runs
                // so the requester gets the right acknowledgment marker,
                // and so error detail is withheld from outsiders.
                let auth = check_authorization(self.host.as_ref(), author, org, team).await;
                return TipProcessingOutcome::failed_attempt(
                    None,
                    format!("invalid tip command: {e}"),
                    auth.is_authorized,
                );
            }
            Ok(request) => request,
        };

        let auth = check_authorization(self.host.as_ref(), author, org, team).await;
        if !auth.is_authorized {
            let reason = auth.reason.unwrap_or_else(|| "not authorized".to_string());
            return TipProcessingOutcome::failed_attempt(
                Some(request),
                format!("authorization failed: {reason}"),
                false,
            );
        }

        if let Err(e) = check_limit(&self.config.chain.limits, request.asset, request.amount) {
            return TipProcessingOutcome::failed_attempt(Some(request), e.to_string(), true);
        }

        TipProcessingOutcome::accepted(request)
    }

    /// Handle one inbound comment event end to end, posting all
    /// user-visible feedback. Terminal on any failure; never retries.
    pub async fn handle_comment(&self, event: &CommentEvent) -> Result<TipProcessingOutcome> {
        if event.author_is_bot {
            return Ok(TipProcessingOutcome::not_an_attempt());
        }
        if !CommentParser::contains_mention(&event.body) {
            return Ok(TipProcessingOutcome::not_an_attempt());
        }

        let outcome = self.process_tip_comment(&event.author, &event.body).await;

        if outcome.is_tip_attempt {
            let reaction = if outcome.is_authorized {
                Reaction::Eyes
            } else {
                Reaction::ThumbsDown
            };
            self.host
                .add_reaction(&event.issue, event.comment_id, reaction)
                .await?;
        }

        if !outcome.success {
            // Error detail goes only to authorized requesters; everyone
            // else has already received the negative marker.
            if outcome.is_authorized
                && let Some(message) = &outcome.error_message
            {
                info!(author = %event.author, "tip attempt rejected: {message}");
                self.host
                    .create_comment(&event.issue, &format!("❌ {message}"))
                    .await?;
            }
            return Ok(outcome);
        }

        let Some(request) = outcome.request.clone() else {
            return Ok(outcome);
        };

        let notice_id = self
            .host
            .create_comment(&event.issue, &processing_notice(&event.author, &request))
            .await?;

        info!(
            author = %event.author,
            recipient = %request.recipient,
            amount = %request.amount,
            asset = %request.asset,
            "submitting tip transfer"
        );
        let tx = self.chain.send_tip(&request).await;

        if tx.success {
            self.host
                .update_comment(
                    &event.issue,
                    notice_id,
                    &success_report(&event.author, &request, &tx),
                )
                .await?;
            self.post_balance_advisory(&event.issue).await?;
        } else {
            let error = tx.error.as_deref().unwrap_or("unknown error");
            warn!(author = %event.author, "tip transfer failed: {error}");
            self.host
                .update_comment(&event.issue, notice_id, &failure_report(error))
                .await?;
        }

        Ok(outcome)
    }

    /// After a finalized transfer, check whether the operating wallet
    /// needs replenishment and post an advisory if so.
    async fn post_balance_advisory(&self, issue: &IssueRef) -> Result<()> {
        let snapshot = self.chain.check_balance().await;
        let warnings = balance_warnings(&snapshot, &self.config.chain.limits);
        if warnings.is_empty() {
            return Ok(());
        }
        for warning in &warnings {
            warn!(
                asset = %warning.asset,
                current = %warning.current_balance,
                threshold = %warning.threshold,
                "wallet balance below replenishment threshold"
            );
        }
        self.host
            .create_comment(issue, &advisory_report(&warnings))
            .await?;
        Ok(())
    }

    /// Release the ledger connection. Idempotent.
    pub async fn shutdown(&self) -> Result<()> {
        self.chain.disconnect().await
    }
}

fn processing_notice(author: &str, request: &TipRequest) -> String {
    let mut body = format!(
        "⏳ **Processing tip** from @{author}\n**To**: `{}`\n**Amount**: {} {}\n",
        request.recipient, request.amount, request.asset
    );
    if let Some(note) = &request.note {
        body.push_str(&format!("**Message**: {note}\n"));
    }
    body.push_str("\n🔄 Sending transaction...");
    body
}

fn success_report(author: &str, request: &TipRequest, tx: &TransactionOutcome) -> String {
    let mut body = format!(
        "✅ **Tip sent successfully!** 🎉\n**From**: @{author}\n**To**: `{}`\n**Amount**: {} {}\n",
        request.recipient, request.amount, request.asset
    );
    if let Some(note) = &request.note {
        body.push_str(&format!("**Message**: {note}\n"));
    }
    if let Some(hash) = &tx.tx_hash {
        body.push_str(&format!("\n**Transaction Hash**: `{hash}`\n"));
    }
    if let Some(block) = &tx.block_hash {
        body.push_str(&format!("**Block Hash**: `{block}`\n"));
    }
    if let Some(url) = &tx.explorer_url {
        body.push_str(&format!("**Explorer**: {url}\n"));
    }
    body
}

fn failure_report(error: &str) -> String {
    format!("❌ **Transaction failed**\n**Error**: {error}\n\nPlease check the configuration and try again.")
}

fn advisory_report(warnings: &[BalanceWarning]) -> String {
    let mut body = String::from("⚠️ **Low wallet balance**\n");
    for warning in warnings {
        body.push_str(&format!(
            "- {}: {} remaining, below the replenishment threshold of {}\n",
            warning.asset, warning.current_balance, warning.threshold
        ));
    }
    body.push_str("\nPlease top up the tipping wallet.");
    body
}
