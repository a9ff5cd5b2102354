// Share math for a single investment
use serde::Serialize;
use thiserror::Error;

use super::amount::sanitize_amount;
use super::InvestError;
use crate::models::Track;

/// Why an investment amount cannot be accepted
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InvestmentIssue {
    #[error("Minimum investment is ${minimum:.2}")]
    BelowMinimum { minimum: f64 },
    #[error("Only {available} shares available, {requested} requested")]
    InsufficientShares { requested: u64, available: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentBasics {
    /// Sanitized amount the basics were computed for
    pub amount: f64,
    pub share_price: f64,
    pub shares: u64,
    /// Amount actually spent on whole shares
    pub actual_amount: f64,
    /// 0..=100
    pub ownership_percentage: f64,
    pub is_valid: bool,
    pub issues: Vec<InvestmentIssue>,
}

impl InvestmentBasics {
    /// Ownership as a fraction of all shares, 0..=1
    pub fn ownership_fraction(&self) -> f64 {
        self.ownership_percentage / 100.0
    }
}

pub(crate) fn share_price(track: &Track) -> Result<f64, InvestError> {
    if track.total_shares == 0 || !track.funding_goal.is_finite() || track.funding_goal <= 0.0 {
        return Err(InvestError::NotInvestable {
            track_id: track.id.clone(),
        });
    }
    Ok(track.funding_goal / track.total_shares as f64)
}

/// Derive shares, cost and ownership for `amount` invested in `track`
///
/// Negative or non-finite amounts count as 0. Both validity rules are
/// checked independently so the caller can show every failed reason.
pub fn compute_investment_basics(
    track: &Track,
    amount: f64,
) -> Result<InvestmentBasics, InvestError> {
    let amount = sanitize_amount(amount);
    let share_price = share_price(track)?;

    let shares = (amount / share_price).floor() as u64;
    let actual_amount = shares as f64 * share_price;
    let ownership_percentage = shares as f64 / track.total_shares as f64 * 100.0;

    let mut issues = Vec::new();
    if amount < track.minimum_investment {
        issues.push(InvestmentIssue::BelowMinimum {
            minimum: track.minimum_investment,
        });
    }
    if shares > track.available_shares {
        issues.push(InvestmentIssue::InsufficientShares {
            requested: shares,
            available: track.available_shares,
        });
    }

    Ok(InvestmentBasics {
        amount,
        share_price,
        shares,
        actual_amount,
        ownership_percentage,
        is_valid: issues.is_empty(),
        issues,
    })
}

/// Result of the flat expected-ROI calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleEstimate {
    pub amount: f64,
    pub expected_return: f64,
    pub total_value: f64,
}

pub fn simple_estimate(track: &Track, amount: f64) -> SimpleEstimate {
    let amount = sanitize_amount(amount);
    let expected_return = amount * track.expected_roi / 100.0;
    SimpleEstimate {
        amount,
        expected_return,
        total_value: amount + expected_return,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingProgress {
    /// 0..=100
    pub funded_percentage: f64,
    pub shares_sold: u64,
    pub remaining_funding: f64,
}

pub fn funding_progress(track: &Track) -> FundingProgress {
    let funded_percentage = if track.funding_goal > 0.0 {
        (track.current_funding / track.funding_goal * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };
    FundingProgress {
        funded_percentage,
        shares_sold: track.total_shares.saturating_sub(track.available_shares),
        remaining_funding: (track.funding_goal - track.current_funding).max(0.0),
    }
}
