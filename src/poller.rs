use log::{debug, info, warn};
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{
    format::{self, Locale},
    sender::{EphemeralSender, Lifetime},
    source::DataSource,
    state::State,
};

type TickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;
type OnTick = Arc<dyn Fn() -> TickFuture + Send + Sync>;

/// Runs a callback every `period` on a background task.
///
/// Idle until `start` is called. The first tick fires one full period after
/// the start, like a plain interval timer.
pub struct Scheduler {
    period: Duration,
    on_tick: OnTick,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Scheduler {
    pub fn new<F, Fut>(period: Duration, on_tick: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            period,
            on_tick: Arc::new(move || Box::pin(on_tick()) as TickFuture),
            handle: Mutex::new(None),
        }
    }

    /// Starts ticking. Returns false if the scheduler was already active.
    pub async fn start(&self) -> bool {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            return false;
        }

        let period = self.period;
        let on_tick = self.on_tick.clone();
        *handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                on_tick().await;
            }
        }));
        info!("Scheduler started with a period of {:?}", period);
        true
    }

    /// Stops ticking. A tick already running is aborted at its next await.
    pub async fn stop(&self) -> bool {
        match self.handle.lock().await.take() {
            Some(handle) => {
                handle.abort();
                info!("Scheduler stopped");
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub async fn is_active(&self) -> bool {
        self.handle.lock().await.is_some()
    }
}

/// One poll of the remote balance. When it moved since the last poll, every
/// subscribed chat gets a notification. Returns the number of chats notified.
pub async fn poll_balance(
    state: &RwLock<State>,
    source: &dyn DataSource,
    sender: &EphemeralSender,
    locale: Locale,
) -> usize {
    let balance = match source.balance().await {
        Ok(balance) => balance,
        Err(err) => {
            warn!("Balance poll failed: {}", err);
            return 0;
        }
    };

    let subscribers = {
        let mut state = state.write().await;
        if !state.observe_balance(balance) {
            debug!("Balance unchanged at {}", balance);
            return 0;
        }
        state.subscribers()
    };
    info!(
        "Balance changed to {}, notifying {} chats",
        balance,
        subscribers.len()
    );

    let text = format::balance_notification(locale, balance);
    let mut notified = 0;
    for chat_id in subscribers {
        match sender
            .send(chat_id, text.clone(), None, Lifetime::Ephemeral)
            .await
        {
            Ok(_) => notified += 1,
            Err(err) => warn!("Could not notify {}: {}", chat_id.0, err),
        }
    }
    notified
}
