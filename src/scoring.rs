use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPeriod {
    pub scoring_period_id: u64,
    pub started: DateTime<FixedOffset>,
    pub ends: DateTime<FixedOffset>,
    #[serde(default)]
    pub referral_code: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastPeriod {
    pub scoring_period_id: u64,
    pub started: DateTime<FixedOffset>,
    pub ends: DateTime<FixedOffset>,
    #[serde(default)]
    pub referral_code: Option<u64>,
    #[serde(default)]
    pub total_direct_score: f64,
    #[serde(default)]
    pub total_referral_score: f64,
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// The `scoringPeriodsFull` object of the founding members document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringPeriods {
    pub current_scoring_period: CurrentPeriod,
    #[serde(default)]
    pub last_period: Option<LastPeriod>,
}

/// Last fetched scoring data and the moment it goes stale.
#[derive(Debug)]
pub struct ScoringCache {
    data: Option<ScoringPeriods>,
    next_sync: Option<DateTime<Utc>>,
    refresh: Duration,
}

impl ScoringCache {
    pub fn new(refresh: std::time::Duration) -> Self {
        Self {
            data: None,
            next_sync: None,
            refresh: Duration::from_std(refresh).unwrap_or_else(|_| Duration::hours(1)),
        }
    }

    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match (&self.data, self.next_sync) {
            (Some(_), Some(next_sync)) => now >= next_sync,
            _ => true,
        }
    }

    pub fn store(&mut self, data: ScoringPeriods, now: DateTime<Utc>) {
        self.data = Some(data);
        self.next_sync = Some(now + self.refresh);
    }

    pub fn get(&self) -> Option<&ScoringPeriods> {
        self.data.as_ref()
    }
}
