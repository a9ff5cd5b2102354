// Streaming revenue projections over fixed horizons
use serde::{Deserialize, Serialize};

use super::amount::sanitize_amount;
use super::basics::compute_investment_basics;
use super::InvestError;
use crate::models::{StreamingHistory, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeframe {
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
}

impl Timeframe {
    /// Ascending horizon order
    pub const ALL: [Timeframe; 5] = [
        Timeframe::ThreeMonths,
        Timeframe::SixMonths,
        Timeframe::OneYear,
        Timeframe::TwoYears,
        Timeframe::FiveYears,
    ];

    pub fn months(self) -> u32 {
        match self {
            Timeframe::ThreeMonths => 3,
            Timeframe::SixMonths => 6,
            Timeframe::OneYear => 12,
            Timeframe::TwoYears => 24,
            Timeframe::FiveYears => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::ThreeMonths => "3 Months",
            Timeframe::SixMonths => "6 Months",
            Timeframe::OneYear => "1 Year",
            Timeframe::TwoYears => "2 Years",
            Timeframe::FiveYears => "5 Years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Tunables of the projection model
///
/// Risk is a function of the horizon length only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionModel {
    /// Per-month multiplier applied to the base growth rate
    pub growth_decay: f64,
    /// Floor of the monthly growth factor
    pub min_monthly_growth: f64,
    /// Horizons up to this many months are high risk
    pub high_risk_max_months: u32,
    /// Horizons from this many months on are low risk
    pub low_risk_min_months: u32,
}

impl Default for ProjectionModel {
    fn default() -> Self {
        Self {
            growth_decay: 0.95,
            min_monthly_growth: 0.02,
            high_risk_max_months: 6,
            low_risk_min_months: 24,
        }
    }
}

impl ProjectionModel {
    /// Growth applied after the given 1-based month
    pub fn growth_factor(&self, growth_rate: f64, month: u32) -> f64 {
        (growth_rate * self.growth_decay.powi(month as i32)).max(self.min_monthly_growth)
    }

    /// Cumulative streams over `months`, starting from the historical average
    pub fn project_streams(&self, history: &StreamingHistory, months: u32) -> f64 {
        let mut total = 0.0;
        let mut monthly = history.average_streams_per_month;
        for month in 1..=months {
            total += monthly;
            monthly *= 1.0 + self.growth_factor(history.growth_rate, month);
        }
        total
    }

    pub fn risk_level(&self, months: u32) -> RiskLevel {
        if months <= self.high_risk_max_months {
            RiskLevel::High
        } else if months >= self.low_risk_min_months {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub timeframe: Timeframe,
    /// Display name of the horizon, e.g. "1 Year"
    pub label: &'static str,
    pub projected_streams: u64,
    pub projected_revenue: f64,
    pub investor_share: f64,
    /// Percent
    pub roi: f64,
    pub total_return: f64,
    pub risk_level: RiskLevel,
}

/// Projections for every [`Timeframe`] with the default model
pub fn compute_projections(
    track: &Track,
    investment_amount: f64,
) -> Result<Vec<Projection>, InvestError> {
    compute_projections_with(&ProjectionModel::default(), track, investment_amount)
}

/// Projections for every [`Timeframe`], ascending
///
/// Returns an empty list when nothing is invested.
pub fn compute_projections_with(
    model: &ProjectionModel,
    track: &Track,
    investment_amount: f64,
) -> Result<Vec<Projection>, InvestError> {
    let investment = sanitize_amount(investment_amount);
    if investment == 0.0 {
        return Ok(Vec::new());
    }

    let ownership = compute_investment_basics(track, investment)?.ownership_fraction();

    let projections = Timeframe::ALL
        .iter()
        .map(|&timeframe| {
            let months = timeframe.months();
            let total_streams = model.project_streams(&track.streaming, months);
            let projected_revenue = total_streams * track.streaming.revenue_per_stream;
            let investor_share = projected_revenue * ownership;

            Projection {
                timeframe,
                label: timeframe.label(),
                projected_streams: total_streams.round() as u64,
                projected_revenue,
                investor_share,
                roi: (investor_share - investment) / investment * 100.0,
                total_return: investment + investor_share,
                risk_level: model.risk_level(months),
            }
        })
        .collect();

    Ok(projections)
}
