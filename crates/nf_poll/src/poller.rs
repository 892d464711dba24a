use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{watch, Mutex as AsyncMutex, OwnedMutexGuard};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use nf_core::{Article, NewsSource, Snapshot};

struct Inner {
    source: Arc<dyn NewsSource>,
    fallback: Vec<Article>,
    state: watch::Sender<Snapshot>,
    busy: Arc<AsyncMutex<()>>,
    epoch: AtomicU64,
}

/// Periodic fetcher with graceful degradation. Whatever the upstream does,
/// consumers always see a usable article set: live data after a good cycle,
/// the injected fallback list after a bad one. The timer is an owned
/// resource: `start` spawns it, `stop` cancels it, dropping the poller
/// stops it as well.
pub struct NewsPoller {
    inner: Arc<Inner>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl NewsPoller {
    pub fn new(source: Arc<dyn NewsSource>, fallback: Vec<Article>) -> Self {
        let (state, _) = watch::channel(Snapshot::default());
        Self {
            inner: Arc::new(Inner {
                source,
                fallback,
                state,
                busy: Arc::new(AsyncMutex::new(())),
                epoch: AtomicU64::new(0),
            }),
            timer: Mutex::new(None),
        }
    }

    /// Begin polling: one cycle right away, then one per `every`. Calling
    /// `start` while already running is a no-op.
    pub fn start(&self, every: Duration) {
        let mut timer = self.timer.lock().unwrap();
        if timer.as_ref().map_or(false, |handle| !handle.is_finished()) {
            debug!("⏲️ Poller already running, start ignored");
            return;
        }

        let inner = self.inner.clone();
        info!("⏲️ Polling {} every {:?}", inner.source.name(), every);
        *timer = Some(tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                run_cycle(&inner, "scheduled").await;
            }
        }));
    }

    /// Cancel the timer. A cycle already in flight is not interrupted, but
    /// its result is discarded instead of applied; a cycle accepted but not
    /// yet begun never fetches at all.
    pub fn stop(&self) {
        let mut timer = self.timer.lock().unwrap();
        let handle = match timer.take() {
            Some(handle) => handle,
            None => return,
        };
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        handle.abort();

        // A stopped feed never reports loading.
        self.inner.state.send_if_modified(|snapshot| {
            if snapshot.is_loading {
                snapshot.is_loading = false;
                true
            } else {
                false
            }
        });
        info!("⏹️ Polling stopped");
    }

    /// Run one out-of-band cycle without touching the schedule. Returns
    /// false when the poller is stopped or a fetch is already in flight.
    pub fn refresh_now(&self) -> bool {
        // Captured before anything else: a stop() that lands between here
        // and the spawned task's first poll must invalidate the cycle.
        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        if !self.is_running() {
            debug!("🔄 Manual refresh ignored, poller is stopped");
            return false;
        }
        let guard = match self.inner.busy.clone().try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("🔄 Manual refresh ignored, a fetch is already in flight");
                return false;
            }
        };

        let inner = self.inner.clone();
        tokio::spawn(async move {
            execute_cycle(&inner, epoch, guard).await;
        });
        true
    }

    /// Run exactly one cycle to completion and return the resulting
    /// snapshot. Works whether or not the timer is running.
    pub async fn fetch_once(&self) -> Snapshot {
        let guard = self.inner.busy.clone().lock_owned().await;
        let epoch = self.inner.epoch.load(Ordering::SeqCst);
        execute_cycle(&self.inner, epoch, guard).await;
        self.snapshot()
    }

    /// Current point-in-time view of the feed.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.state.borrow().clone()
    }

    /// Watch the feed: the receiver is notified once per applied state
    /// change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.timer
            .lock()
            .unwrap()
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for NewsPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One poll cycle, skipped when another is still in flight.
async fn run_cycle(inner: &Inner, trigger: &'static str) {
    match inner.busy.clone().try_lock_owned() {
        Ok(guard) => {
            let epoch = inner.epoch.load(Ordering::SeqCst);
            execute_cycle(inner, epoch, guard).await;
        }
        Err(_) => debug!(
            "⏭️ Skipping {} cycle, previous fetch still in flight",
            trigger
        ),
    }
}

/// The cycle itself, run under the in-flight guard. `started_epoch` is
/// captured by the caller at the moment the cycle is accepted and
/// re-checked inside each publish, so a result that lands after `stop` is
/// thrown away rather than applied.
async fn execute_cycle(inner: &Inner, started_epoch: u64, _guard: OwnedMutexGuard<()>) {
    let accepted = inner.state.send_if_modified(|snapshot| {
        if inner.epoch.load(Ordering::SeqCst) != started_epoch {
            return false;
        }
        snapshot.is_loading = true;
        true
    });
    if !accepted {
        debug!("🚮 Poller stopped before the cycle began, fetch skipped");
        return;
    }

    let fetched = inner.source.fetch().await;
    let now = Utc::now();

    match &fetched {
        Ok(articles) => info!(
            "📰 {} delivered {} articles",
            inner.source.name(),
            articles.len()
        ),
        Err(err) => warn!("⚠️ Fetch failed ({}), serving the fallback list", err),
    }

    let applied = inner.state.send_if_modified(|snapshot| {
        if inner.epoch.load(Ordering::SeqCst) != started_epoch {
            return false;
        }
        snapshot.is_loading = false;
        snapshot.last_updated_at = Some(now);
        match fetched {
            Ok(articles) => {
                snapshot.articles = articles;
                snapshot.last_error = None;
            }
            Err(err) => {
                snapshot.articles = inner.fallback.clone();
                snapshot.last_error = Some(err);
            }
        }
        true
    });

    if !applied {
        debug!("🚮 Poller stopped mid-cycle, result discarded");
    }
}
