//! In-memory stand-ins for the chat and the remote endpoints.

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicI32, AtomicUsize, Ordering},
        Mutex,
    },
};
use teloxide::{
    types::{ChatId, MessageId},
    ApiError, RequestError,
};

use crate::{
    error::{BotError, Result},
    exchange::Exchange,
    scoring::ScoringPeriods,
    sender::ChatTransport,
    source::DataSource,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Sent(ChatId, String),
    Deleted(ChatId, MessageId),
}

#[derive(Default)]
pub struct FakeTransport {
    events: Mutex<Vec<Event>>,
    next_id: AtomicI32,
    fail_sends: bool,
    fail_deletes: bool,
}

impl FakeTransport {
    pub fn failing_sends() -> Self {
        Self {
            fail_sends: true,
            ..Default::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Default::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(ChatId, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Sent(chat, text) => Some((chat, text)),
                Event::Deleted(..) => None,
            })
            .collect()
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn send_html(&self, chat_id: ChatId, text: String) -> Result<MessageId> {
        if self.fail_sends {
            return Err(RequestError::Api(ApiError::BotBlocked).into());
        }
        self.events.lock().unwrap().push(Event::Sent(chat_id, text));
        Ok(MessageId(1000 + self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        if self.fail_deletes {
            return Err(RequestError::Api(ApiError::MessageToDeleteNotFound).into());
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::Deleted(chat_id, message_id));
        Ok(())
    }
}

/// Serves queued balances (the last one repeats) and fixed exchange and
/// scoring data. An empty queue or missing data answers with an error.
#[derive(Default)]
pub struct FakeSource {
    pub balances: Mutex<VecDeque<Result<f64>>>,
    pub last_balance: Mutex<Option<f64>>,
    pub exchanges: Vec<Exchange>,
    pub scoring: Option<ScoringPeriods>,
    pub balance_calls: AtomicUsize,
    pub scoring_calls: AtomicUsize,
}

impl FakeSource {
    pub fn with_balances(balances: impl IntoIterator<Item = f64>) -> Self {
        let source = Self::default();
        source.push_balances(balances);
        source
    }

    pub fn push_balances(&self, balances: impl IntoIterator<Item = f64>) {
        self.balances
            .lock()
            .unwrap()
            .extend(balances.into_iter().map(Ok));
    }

    pub fn push_failure(&self) {
        self.balances
            .lock()
            .unwrap()
            .push_back(Err(BotError::Malformed("unavailable".to_owned())));
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn balance(&self) -> Result<f64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.balances.lock().unwrap().pop_front();
        let mut last = self.last_balance.lock().unwrap();
        match next {
            Some(Ok(balance)) => {
                *last = Some(balance);
                Ok(balance)
            }
            Some(Err(err)) => Err(err),
            None => last
                .ok_or_else(|| BotError::Malformed("no balance queued".to_owned())),
        }
    }

    async fn exchanges(&self) -> Result<Vec<Exchange>> {
        Ok(self.exchanges.clone())
    }

    async fn scoring_periods(&self) -> Result<ScoringPeriods> {
        self.scoring_calls.fetch_add(1, Ordering::SeqCst);
        self.scoring
            .clone()
            .ok_or_else(|| BotError::Malformed("no scoring data".to_owned()))
    }
}
