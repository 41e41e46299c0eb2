//! Activity suggestions fetched after the user stops typing.
//!
//! Every input bumps a generation counter and aborts the timer that has not
//! fired yet. A fetch already sent is left to finish and its answer is dropped
//! when the generation moved on, so subscribers only ever see suggestions for
//! the latest input.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};

use crate::{client::api::SirenApi, models::activity::NafActivity};

pub const SUGGEST_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub query: String,
    pub generation: u64,
    pub items: Vec<NafActivity>,
}

pub struct SuggestionFeed {
    api: Arc<dyn SirenApi>,
    delay: Duration,
    latest: Arc<AtomicU64>,
    // the delay timer only; fetches run detached once it fires
    pending: Option<JoinHandle<()>>,
    output: Arc<watch::Sender<Suggestions>>,
}

impl SuggestionFeed {
    pub fn new(api: Arc<dyn SirenApi>) -> Self {
        Self::with_delay(api, SUGGEST_DELAY)
    }

    pub fn with_delay(api: Arc<dyn SirenApi>, delay: Duration) -> Self {
        let (output, _) = watch::channel(Suggestions::default());
        Self {
            api,
            delay,
            latest: Arc::new(AtomicU64::new(0)),
            pending: None,
            output: Arc::new(output),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Suggestions> {
        self.output.subscribe()
    }

    /// Must be called from within a tokio runtime.
    pub fn input(&mut self, text: &str) {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = self.pending.take() {
            previous.abort();
        }

        let query = text.trim().to_string();
        if query.is_empty() {
            self.output.send_replace(Suggestions { query, generation, items: Vec::new() });
            return;
        }

        let api = self.api.clone();
        let latest = self.latest.clone();
        let output = self.output.clone();
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(fetch(api, query, generation, latest, output));
        }));
    }
}

async fn fetch(
    api: Arc<dyn SirenApi>,
    query: String,
    generation: u64,
    latest: Arc<AtomicU64>,
    output: Arc<watch::Sender<Suggestions>>,
) {
    let result = api.suggest_activities(&query).await;

    if latest.load(Ordering::SeqCst) != generation {
        tracing::debug!("Suggestions périmées pour '{}' ignorées", query);
        return;
    }
    match result {
        Ok(items) => {
            output.send_replace(Suggestions { query, generation, items });
        }
        Err(e) => {
            tracing::warn!("⚠️ Suggestions indisponibles pour '{}': {}", query, e);
            output.send_replace(Suggestions { query, generation, items: Vec::new() });
        }
    }
}

impl Drop for SuggestionFeed {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}
