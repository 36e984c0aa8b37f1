//! Authorization rule chain
//!
//! Every rule is a pure function over a shared [`RuleContext`] that either
//! passes (`None`) or names the violation it found. Rules run in the order of
//! [`RULES`] and evaluation stops at the first violation, so a request is
//! rejected with exactly one code.
//!
//! | Order | Rule                | Violation                        |
//! |-------|---------------------|----------------------------------|
//! | 1     | card active         | `card-not-active`                |
//! | 2     | sufficient limit    | `insufficient-limit`             |
//! | 3     | doubled transaction | `doubled-transaction`            |
//! | 4     | high frequency      | `high-frequency-small-interval`  |

use crate::types::{Account, Transaction, Violation};
use chrono::TimeDelta;
use tracing::warn;

/// Default width of the doubled/high-frequency window
pub const DEFAULT_WINDOW_SECS: i64 = 120;

/// Default number of past transactions in the window that triggers
/// `high-frequency-small-interval`
pub const DEFAULT_MAX_IN_WINDOW: usize = 2;

/// Tunables for the time-window rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleConfig {
    /// Two transactions are "close" when strictly less than this apart
    pub window: TimeDelta,
    /// Past transactions in the window at which high-frequency fires
    pub max_in_window: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            window: TimeDelta::seconds(DEFAULT_WINDOW_SECS),
            max_in_window: DEFAULT_MAX_IN_WINDOW,
        }
    }
}

impl RuleConfig {
    /// Create a RuleConfig, replacing zero values with the defaults
    pub fn new(window: TimeDelta, max_in_window: usize) -> Self {
        let default = Self::default();

        let window = if window <= TimeDelta::zero() {
            warn!(
                ?window,
                default = ?default.window,
                "invalid rule window, using default"
            );
            default.window
        } else {
            window
        };

        let max_in_window = if max_in_window == 0 {
            warn!(
                max_in_window,
                default = default.max_in_window,
                "invalid high-frequency threshold, using default"
            );
            default.max_in_window
        } else {
            max_in_window
        };

        Self {
            window,
            max_in_window,
        }
    }
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// The candidate transaction
    pub transaction: &'a Transaction,
    /// Committed history of the account, in commit order (not time order)
    pub history: &'a [Transaction],
    /// Current account state
    pub account: &'a Account,
    pub config: &'a RuleConfig,
}

/// A single authorization check
pub type Rule = fn(&RuleContext<'_>) -> Option<Violation>;

/// The rule chain, in evaluation order
pub const RULES: [Rule; 4] = [
    card_active,
    sufficient_limit,
    doubled_transaction,
    high_frequency,
];

/// Outcome of running the rule chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Rejected(Violation),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// The violation that rejected the transaction, if any
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            Decision::Allowed => None,
            Decision::Rejected(violation) => Some(violation),
        }
    }
}

/// Run every rule in order, stopping at the first violation
pub fn evaluate(context: &RuleContext<'_>) -> Decision {
    match RULES.iter().find_map(|rule| rule(context)) {
        Some(violation) => {
            warn!(
                account_id = context.account.id,
                violation = %violation,
                "transaction rejected"
            );
            Decision::Rejected(violation)
        }
        None => Decision::Allowed,
    }
}

/// An inactive card invalidates everything else
pub fn card_active(context: &RuleContext<'_>) -> Option<Violation> {
    (!context.account.active_card).then_some(Violation::CardNotActive)
}

/// The limit must not go negative after the debit
pub fn sufficient_limit(context: &RuleContext<'_>) -> Option<Violation> {
    // Widened so extreme amounts cannot overflow the comparison
    let remaining =
        i128::from(context.account.available_limit) - i128::from(context.transaction.amount);

    (remaining < 0).then_some(Violation::InsufficientLimit)
}

/// Same merchant and amount anywhere in the window
///
/// The whole history is scanned because it is not ordered by time.
pub fn doubled_transaction(context: &RuleContext<'_>) -> Option<Violation> {
    let candidate = context.transaction;

    context
        .history
        .iter()
        .any(|past| {
            candidate.is_same_purchase(past) && candidate.is_within(past, context.config.window)
        })
        .then_some(Violation::DoubledTransaction)
}

/// Too many past transactions of any kind in the window
pub fn high_frequency(context: &RuleContext<'_>) -> Option<Violation> {
    let candidate = context.transaction;
    let threshold = context.config.max_in_window;

    let mut close = context
        .history
        .iter()
        .filter(|past| candidate.is_within(past, context.config.window));

    // nth(threshold - 1) stops the scan as soon as the count is reached
    close
        .nth(threshold.saturating_sub(1))
        .map(|_| Violation::HighFrequencySmallInterval)
}
