use std::{collections::HashSet, time::Duration};
use teloxide::types::ChatId;

use crate::scoring::ScoringCache;

#[derive(Debug)]
pub struct State {
    /// Chats that asked for balance notifications.
    subscribers: HashSet<ChatId>,
    last_balance: f64,
    pub scoring: ScoringCache,
}

impl State {
    pub fn new(scoring_refresh: Duration) -> Self {
        Self {
            subscribers: HashSet::new(),
            last_balance: 0.0,
            scoring: ScoringCache::new(scoring_refresh),
        }
    }

    /// Returns false when the chat was already subscribed.
    pub fn subscribe(&mut self, chat_id: ChatId) -> bool {
        self.subscribers.insert(chat_id)
    }

    /// Returns false when the chat was not subscribed.
    pub fn unsubscribe(&mut self, chat_id: &ChatId) -> bool {
        self.subscribers.remove(chat_id)
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, chat_id: &ChatId) -> bool {
        self.subscribers.contains(chat_id)
    }

    pub fn subscribers(&self) -> Vec<ChatId> {
        self.subscribers.iter().copied().collect()
    }

    #[cfg(test)]
    pub fn last_balance(&self) -> f64 {
        self.last_balance
    }

    /// Stores `balance` as the last observed value and reports whether it
    /// differs from the previous one.
    pub fn observe_balance(&mut self, balance: f64) -> bool {
        if balance == self.last_balance {
            return false;
        }
        self.last_balance = balance;
        true
    }
}
