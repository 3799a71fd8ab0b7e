use crate::domain::asset::Asset;
use crate::domain::tip::{TipRequest, is_valid_address};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// The literal token a comment must contain to address the bot.
/// Matched case-sensitively, anywhere in the text.
pub const BOT_MENTION: &str = "@tipbot";

const TIP_KEYWORD: &str = "tip";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("comment does not mention the bot")]
    NoMention,
    #[error("comment does not contain a tip command")]
    NoTipKeyword,
    #[error("incomplete tip command")]
    Incomplete,
    #[error("tip command requires at least: address, amount, and asset")]
    MissingParameters,
    #[error("invalid Asset Hub address format")]
    InvalidAddress,
    #[error("amount must be a positive number")]
    InvalidAmount,
    #[error("unsupported asset `{asset}`, supported assets: {supported}")]
    UnsupportedAsset { asset: String, supported: String },
}

impl ParseError {
    /// Whether the comment was a genuine tip attempt. Non-attempts are
    /// dropped silently; attempts get user-visible feedback.
    pub fn is_tip_attempt(&self) -> bool {
        !matches!(self, ParseError::NoMention | ParseError::NoTipKeyword)
    }
}

/// Extracts structured tip commands from free-form comment text.
///
/// Command shape: `@tipbot tip <address> <amount> <asset> [note...]`.
pub struct CommentParser;

impl CommentParser {
    pub fn parse(comment: &str) -> Result<TipRequest, ParseError> {
        let normalized = comment.split_whitespace().collect::<Vec<_>>().join(" ");

        let Some(mention_at) = normalized.find(BOT_MENTION) else {
            return Err(ParseError::NoMention);
        };
        let after_mention = normalized[mention_at + BOT_MENTION.len()..].trim_start();

        let keyword = after_mention.get(..TIP_KEYWORD.len());
        if !keyword.is_some_and(|k| k.eq_ignore_ascii_case(TIP_KEYWORD)) {
            return Err(ParseError::NoTipKeyword);
        }

        let command_part = after_mention[TIP_KEYWORD.len()..].trim();
        if command_part.is_empty() {
            return Err(ParseError::Incomplete);
        }

        let tokens: Vec<&str> = command_part.split(' ').collect();
        if tokens.len() < 3 {
            return Err(ParseError::MissingParameters);
        }

        let recipient = tokens[0];
        if !is_valid_address(recipient) {
            return Err(ParseError::InvalidAddress);
        }

        let amount = Decimal::from_str(tokens[1]).map_err(|_| ParseError::InvalidAmount)?;
        if amount <= Decimal::ZERO {
            return Err(ParseError::InvalidAmount);
        }

        let Some(asset) = Asset::parse(tokens[2]) else {
            return Err(ParseError::UnsupportedAsset {
                asset: tokens[2].to_string(),
                supported: Asset::supported_list(),
            });
        };

        let note = (tokens.len() > 3).then(|| tokens[3..].join(" "));

        Ok(TipRequest {
            recipient: recipient.to_string(),
            amount,
            asset,
            note,
            raw_comment: normalized,
        })
    }

    /// Parse every line independently, keeping only the lines that carry a
    /// complete tip command. Lets one comment tip several recipients.
    pub fn parse_multiple(comment: &str) -> Vec<TipRequest> {
        comment
            .lines()
            .filter_map(|line| Self::parse(line).ok())
            .collect()
    }

    /// Cheap pre-filter: does the text address the bot at all?
    pub fn contains_mention(comment: &str) -> bool {
        comment.contains(BOT_MENTION)
    }
}
