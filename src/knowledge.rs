//! Banking knowledge base
//!
//! Ordered keyword → canned answer table used by the local responder.
//! The first keyword found as a substring of the lowercased query wins, so
//! order is part of the contract. The table keeps the historical topic order
//! with two exceptions: "lost" sits ahead of "card", and "open account" sits
//! ahead of "account".

use serde::{Deserialize, Serialize};

/// Static default table — zero allocation until a `KnowledgeBase` is built
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    // Checked before "card" so "Lost my card!" gets the lost-card answer
    (
        "lost",
        "🚨 LOST CARD: Call 1-800-HELP immediately to block your card. You have zero liability if reported within 3 days.",
    ),
    // Accounts and cards
    (
        "open account",
        "To open an account, visit any branch with ID proof and $100 minimum deposit. Account activated within 24 hours.",
    ),
    (
        "account",
        "To open an account, visit any branch with ID proof and $100 minimum deposit. Account activated within 24 hours.",
    ),
    (
        "card",
        "For lost or stolen cards, call 1-800-HELP immediately to block. Replacement arrives in 5-7 business days.",
    ),
    // Lending and rates
    (
        "loan",
        "Personal loans: up to $50,000 at 10.99% APR. Home loans: up to $1M at 8.5% APR. Auto loans: up to $100,000 at 9.5% APR.",
    ),
    (
        "rates",
        "Savings: 3.5%, Fixed Deposit (1 year): 6.5%, Personal Loan from 10.99%, Home Loan from 8.5%.",
    ),
    // Branches
    (
        "branch",
        "Downtown: 123 Main St, Mon-Fri 9AM-6PM, Sat 9AM-2PM. Westside: 456 Oak Ave, Mon-Fri 9AM-7PM.",
    ),
    (
        "hours",
        "Downtown: Mon-Fri 9AM-6PM, Sat 9AM-2PM. Westside: Mon-Fri 9AM-7PM. Airport: Daily 7AM-10PM.",
    ),
    // Everyday banking
    (
        "fraud",
        "Report fraud at 1-800-HELP immediately. Freeze cards via mobile app. Zero liability within 3 days.",
    ),
    (
        "balance",
        "Check balance via Mobile App, Internet Banking, ATM, or SMS 'BAL' to 56789. Minimum balance: $100.",
    ),
    (
        "transfer",
        "ATM: $500/day, POS: $2000/day, Online: $5000/day, International: $2000/day + 2.5% fee.",
    ),
];

/// A single keyword/answer pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub keyword: String,
    pub answer: String,
}

impl KnowledgeEntry {
    /// Keywords are stored lowercased so matching stays case-insensitive.
    pub fn new(keyword: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            answer: answer.into(),
        }
    }
}

/// Immutable, ordered keyword table
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    /// Build from an explicit ordered list. Entries with an empty keyword
    /// would match every query and are skipped.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|e| !e.keyword.is_empty())
            .collect();
        Self { entries }
    }

    /// First matching answer in table order, `None` when nothing matches
    pub fn lookup(&self, query: &str) -> Option<&str> {
        let query = query.to_lowercase();

        self.entries
            .iter()
            .find(|entry| query.contains(entry.keyword.as_str()))
            .map(|entry| entry.answer.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(
            DEFAULT_ENTRIES
                .iter()
                .map(|(keyword, answer)| KnowledgeEntry::new(*keyword, *answer))
                .collect(),
        )
    }
}
