// Investment module
// Share math, return projections and the flat expected-ROI calculator

pub mod amount;
pub mod basics;
pub mod projection;

pub use amount::parse_amount;
pub use basics::{
    compute_investment_basics, funding_progress, simple_estimate, FundingProgress,
    InvestmentBasics, InvestmentIssue, SimpleEstimate,
};
pub use projection::{
    compute_projections, compute_projections_with, Projection, ProjectionModel, RiskLevel,
    Timeframe,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvestError {
    /// Zero shares or a non-positive funding goal, the share price is undefined
    #[error("track {track_id} is not open for investment")]
    NotInvestable { track_id: String },
}
