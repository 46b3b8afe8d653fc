use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{
    error::{BotError, Result},
    exchange::Exchange,
    scoring::ScoringPeriods,
};

/// Remote data the bot reports on.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn balance(&self) -> Result<f64>;

    async fn exchanges(&self) -> Result<Vec<Exchange>>;

    async fn scoring_periods(&self) -> Result<ScoringPeriods>;
}

/// Single GET returning the parsed body. No caching, no retry.
pub async fn fetch_json(client: &Client, url: &str) -> Result<Value> {
    let value = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;
    Ok(value)
}

pub struct HttpSource {
    client: Client,
    balance_url: String,
    status_url: String,
    scoring_url: String,
}

impl HttpSource {
    pub fn new(balance_url: String, status_url: String, scoring_url: String) -> Self {
        Self {
            client: Client::new(),
            balance_url,
            status_url,
            scoring_url,
        }
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn balance(&self) -> Result<f64> {
        parse_balance(fetch_json(&self.client, &self.balance_url).await?)
    }

    async fn exchanges(&self) -> Result<Vec<Exchange>> {
        parse_exchanges(fetch_json(&self.client, &self.status_url).await?)
    }

    async fn scoring_periods(&self) -> Result<ScoringPeriods> {
        parse_scoring_periods(fetch_json(&self.client, &self.scoring_url).await?)
    }
}

fn parse_balance(body: Value) -> Result<f64> {
    body.get("balance")
        .and_then(Value::as_f64)
        .ok_or_else(|| BotError::Malformed(format!("no numeric balance in {body}")))
}

fn parse_exchanges(mut body: Value) -> Result<Vec<Exchange>> {
    match body.get_mut("exchanges") {
        Some(exchanges) => Ok(serde_json::from_value(exchanges.take())?),
        None => Err(BotError::Malformed("no exchanges in status".to_owned())),
    }
}

fn parse_scoring_periods(mut body: Value) -> Result<ScoringPeriods> {
    match body.get_mut("scoringPeriodsFull") {
        Some(periods) => Ok(serde_json::from_value(periods.take())?),
        None => Err(BotError::Malformed(
            "no scoringPeriodsFull in document".to_owned(),
        )),
    }
}
