//! Token, character, cost and message counters for a chat session.

use crate::types::Role;
use crate::ProviderId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Token count above which the token counter is flagged.
pub const TOKEN_WARNING_THRESHOLD: u64 = 3500;

/// Length of `text` in UTF-16 code units, the unit browsers report.
///
/// Characters outside the Basic Multilingual Plane, such as most emoji,
/// count as two.
pub fn text_length(text: &str) -> u64 {
    text.encode_utf16().count() as u64
}

/// Rough token estimate: one token per four characters, rounded up.
pub fn count_tokens(text: &str) -> u64 {
    text_length(text).div_ceil(4)
}

/// Dollar cost of `tokens` at the provider's rate.
pub fn calculate_cost(provider: ProviderId, tokens: u64) -> f64 {
    tokens as f64 / 1000.0 * provider.cost_rate()
}

/// Per-author message counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageCounts {
    pub total: u64,
    pub user: u64,
    pub ai: u64,
}

/// Running totals plus derived averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    pub tokens: u64,
    pub characters: u64,
    pub cost: f64,
    pub messages: MessageCounts,
    pub average_tokens_per_message: f64,
    pub average_cost_per_message: f64,
}

/// Exported statistics report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageReport {
    pub summary: ReportSummary,
    pub averages: ReportAverages,
    pub usage: ReportUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_messages: u64,
    pub user_messages: u64,
    pub ai_messages: u64,
    pub total_tokens: u64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportAverages {
    pub tokens_per_message: String,
    pub cost_per_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportUsage {
    pub characters: u64,
    pub tokens: u64,
    pub cost: String,
}

/// Usage counters. AI replies are charged at the pricing provider's rate.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageCounters {
    tokens: u64,
    characters: u64,
    cost: f64,
    messages: MessageCounts,
    pricing: ProviderId,
}

impl Default for UsageCounters {
    fn default() -> Self {
        Self::new(ProviderId::Gpt)
    }
}

impl UsageCounters {
    pub fn new(pricing: ProviderId) -> Self {
        Self {
            tokens: 0,
            characters: 0,
            cost: 0.0,
            messages: MessageCounts::default(),
            pricing,
        }
    }

    pub fn pricing(&self) -> ProviderId {
        self.pricing
    }

    /// Price subsequent AI messages at `provider`'s rate.
    pub fn set_pricing(&mut self, provider: ProviderId) {
        self.pricing = provider;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.pricing);
    }

    pub fn add_message(&mut self, content: &str, role: Role) {
        let tokens = count_tokens(content);
        self.messages.total += 1;
        match role {
            Role::User => self.messages.user += 1,
            Role::Ai => {
                self.messages.ai += 1;
                self.cost += calculate_cost(self.pricing, tokens);
            }
        }
        self.characters += text_length(content);
        self.tokens += tokens;
    }

    /// Undo [`UsageCounters::add_message`]. Counts never go below zero.
    pub fn remove_message(&mut self, content: &str, role: Role) {
        let tokens = count_tokens(content);
        self.messages.total = self.messages.total.saturating_sub(1);
        match role {
            Role::User => self.messages.user = self.messages.user.saturating_sub(1),
            Role::Ai => {
                self.messages.ai = self.messages.ai.saturating_sub(1);
                self.cost = (self.cost - calculate_cost(self.pricing, tokens)).max(0.0);
            }
        }
        self.characters = self
            .characters
            .saturating_sub(text_length(content));
        self.tokens = self.tokens.saturating_sub(tokens);
    }

    pub fn tokens(&self) -> u64 {
        self.tokens
    }

    pub fn characters(&self) -> u64 {
        self.characters
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn messages(&self) -> MessageCounts {
        self.messages
    }

    pub fn stats(&self) -> UsageStats {
        let average_tokens_per_message = if self.messages.total > 0 {
            self.tokens as f64 / self.messages.total as f64
        } else {
            0.0
        };
        let average_cost_per_message = if self.messages.ai > 0 {
            self.cost / self.messages.ai as f64
        } else {
            0.0
        };

        UsageStats {
            tokens: self.tokens,
            characters: self.characters,
            cost: self.cost,
            messages: self.messages,
            average_tokens_per_message,
            average_cost_per_message,
        }
    }

    pub fn report(&self) -> UsageReport {
        let stats = self.stats();
        UsageReport {
            summary: ReportSummary {
                total_messages: stats.messages.total,
                user_messages: stats.messages.user,
                ai_messages: stats.messages.ai,
                total_tokens: stats.tokens,
                total_cost: stats.cost,
            },
            averages: ReportAverages {
                tokens_per_message: format!("{:.2}", stats.average_tokens_per_message),
                cost_per_message: format!("{:.4}", stats.average_cost_per_message),
            },
            usage: ReportUsage {
                characters: stats.characters,
                tokens: stats.tokens,
                cost: format!("{:.4}", stats.cost),
            },
        }
    }

    /// Pretty-printed JSON of [`UsageCounters::report`].
    pub fn export_json(&self) -> Result<String, crate::Error> {
        Ok(serde_json::to_string_pretty(&self.report())?)
    }

    pub fn token_label(&self) -> String {
        format!("{} tokens", group_thousands(self.tokens))
    }

    pub fn character_label(&self) -> String {
        format!("{} characters", group_thousands(self.characters))
    }

    pub fn cost_label(&self) -> String {
        format!("${:.4}", self.cost)
    }

    pub fn message_label(&self) -> String {
        format!(
            "Messages: {} (User: {}, AI: {})",
            self.messages.total, self.messages.user, self.messages.ai
        )
    }

    pub fn token_warning(&self) -> bool {
        self.tokens > TOKEN_WARNING_THRESHOLD
    }
}

/// File name for an exported report.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!(
        "chat-stats-{}.json",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
