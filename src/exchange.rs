use serde::Deserialize;

/// Status of an exchange that has been paid out.
pub const FINALIZED: &str = "FINALIZED";

/// Senders reported by `/cash` when no address is given.
pub const DEFAULT_SENDERS: [&str; 2] = [
    "5CiRcZCWKDDo4nu1TNXnRVYWichHHmyU6x1nCUeDwjCNQRCw",
    "5EiqT7y3DhzV4Sxuu2up2cAV6tow1nqUn1ntMAAJ3ynfMhHB",
];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub sender: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(rename = "amountUSD")]
    pub amount_usd: f64,
    #[serde(default)]
    pub log_time: String,
    pub status: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub total: f64,
    pub paid: f64,
    pub left: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CashReport {
    pub exchanges: Vec<Exchange>,
    pub totals: Totals,
}

impl CashReport {
    /// Keeps the exchanges sent by `sender` (or by one of the default senders),
    /// ordered by descending status string, and sums their USD amounts.
    pub fn build(exchanges: Vec<Exchange>, sender: Option<&str>) -> Self {
        let mut exchanges: Vec<Exchange> = exchanges
            .into_iter()
            .filter(|e| match sender {
                Some(sender) => e.sender == sender,
                None => DEFAULT_SENDERS.contains(&e.sender.as_str()),
            })
            .collect();
        // Plain string order: "PENDING" sorts before "FINALIZED".
        exchanges.sort_by(|a, b| b.status.cmp(&a.status));

        let totals = exchanges.iter().fold(Totals::default(), |mut acc, e| {
            acc.total += e.amount_usd;
            if e.status == FINALIZED {
                acc.paid += e.amount_usd;
            } else {
                acc.left += e.amount_usd;
            }
            acc
        });

        Self { exchanges, totals }
    }
}
