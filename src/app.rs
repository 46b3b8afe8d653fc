use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use teloxide::types::{ChatId, MessageId};
use tokio::sync::RwLock;

use crate::{
    command::Command,
    config::Config,
    error::Result,
    exchange::CashReport,
    format::{self, Locale},
    poller::{self, Scheduler},
    scoring::ScoringPeriods,
    sender::{ChatTransport, EphemeralSender, Lifetime},
    source::DataSource,
    state::State,
};

/// Everything a command handler needs, shared by the dispatcher and the
/// balance poll loop.
pub struct App {
    locale: Locale,
    state: Arc<RwLock<State>>,
    source: Arc<dyn DataSource>,
    sender: EphemeralSender,
    scheduler: Scheduler,
}

impl App {
    pub fn new(
        config: &Config,
        source: Arc<dyn DataSource>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        let locale = config.locale;
        let state = Arc::new(RwLock::new(State::new(config.scoring_refresh)));
        let sender = EphemeralSender::new(transport, config.reply_ttl);

        let scheduler = {
            let state = state.clone();
            let source = source.clone();
            let sender = sender.clone();
            Scheduler::new(config.poll_interval, move || {
                let state = state.clone();
                let source = source.clone();
                let sender = sender.clone();
                async move {
                    poller::poll_balance(&state, &*source, &sender, locale).await;
                }
            })
        };

        Self {
            locale,
            state,
            source,
            sender,
            scheduler,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &Arc<RwLock<State>> {
        &self.state
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Runs one command for `chat_id`. `source` is the message that carried
    /// the command; it is removed once the reply is out.
    pub async fn execute(
        &self,
        chat_id: ChatId,
        source: Option<MessageId>,
        mention: &str,
        command: Command,
    ) -> Result<()> {
        let locale = self.locale;
        let (text, lifetime) = match command {
            Command::Balance | Command::Start => {
                let balance = self.source.balance().await?;
                (
                    format::balance_reply(locale, mention, balance),
                    Lifetime::Ephemeral,
                )
            }
            Command::NotifyOff => {
                if self.state.write().await.unsubscribe(&chat_id) {
                    info!("Chat {} unsubscribed from balance notifications", chat_id.0);
                }
                (format::notify_off_reply(locale, mention), Lifetime::Ephemeral)
            }
            Command::Notify => {
                if self.state.write().await.subscribe(chat_id) {
                    info!("Chat {} subscribed to balance notifications", chat_id.0);
                }
                self.scheduler.start().await;
                (format::notify_on_reply(locale, mention), Lifetime::Ephemeral)
            }
            Command::React => (format::react_reply(locale), Lifetime::Keep),
            Command::Cash(sender) => {
                let exchanges = self.source.exchanges().await?;
                let report = CashReport::build(exchanges, sender.as_deref());
                (format::cash_report(&report), Lifetime::Keep)
            }
            Command::Scoring => match self.scoring_periods().await {
                Some(periods) => (
                    format::scoring_reply(locale, mention, &periods, Utc::now()),
                    Lifetime::Keep,
                ),
                None => {
                    debug!("No scoring data to answer {}", chat_id.0);
                    return Ok(());
                }
            },
        };

        self.sender.send(chat_id, text, source, lifetime).await?;
        Ok(())
    }

    /// Cached scoring data, refreshed from the remote document once stale.
    /// Stale data is kept when the refresh fails.
    pub async fn scoring_periods(&self) -> Option<ScoringPeriods> {
        let now = Utc::now();
        let stale = self.state.read().await.scoring.needs_refresh(now);
        if stale {
            match self.source.scoring_periods().await {
                Ok(periods) => self.state.write().await.scoring.store(periods, now),
                Err(err) => warn!("Could not load scoring periods: {}", err),
            }
        }
        self.state.read().await.scoring.get().cloned()
    }

    pub async fn shutdown(&self) {
        self.scheduler.stop().await;
    }
}
