use std::{
    sync::{Arc, Mutex},
    thread::JoinHandle,
    time::Duration,
};

use jiff::{Timestamp, Zoned};
use tracing::{debug, warn};

use crate::{error::Error, view::TwoDayView, Clock};

/// Spawns a worker that refreshes `board` every `policy.interval`.
///
/// The worker only holds a weak handle and exits once the last `Arc` to the
/// board is dropped.
pub fn spawn_refresher<C>(
    board: Arc<Mutex<StatusBoard>>,
    clock: C,
    policy: RefreshPolicy,
) -> std::io::Result<JoinHandle<()>>
where
    C: Clock + 'static,
{
    std::thread::Builder::new()
        .name("StatusBoard::refresh()".to_string())
        .spawn({
            let board = Arc::downgrade(&board);
            move || loop {
                std::thread::sleep(policy.interval);
                let Some(board) = board.upgrade() else {
                    debug!("Status board dropped; stopping refresher");
                    return;
                };
                let mut board = board.lock().unwrap();
                if let Err(e) = board.refresh(clock.now()) {
                    warn!(?e, "Failed to refresh status board");
                }
            }
        })
}

#[derive(Debug, Clone)]
pub struct RefreshPolicy {
    pub interval: Duration,
}
impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

/// Fires on the first poll and then once at least `interval` has passed.
#[derive(Debug, Clone)]
pub struct Refresher {
    prev: Option<Timestamp>,
    interval: Duration,
}
impl Refresher {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            prev: None,
            interval: policy.interval,
        }
    }

    pub fn poll(&mut self, now: &Zoned) -> bool {
        let now = now.timestamp();
        let should_fire = match self.prev {
            Some(prev) => {
                let elapsed = now.as_millisecond() - prev.as_millisecond();
                // A clock stepping backwards also fires
                elapsed < 0 || self.interval.as_millis() <= elapsed as u128
            }
            None => true,
        };
        if should_fire {
            self.prev = Some(now);
        }
        should_fire
    }
}

/// Latest view handed to whatever renders it.
#[derive(Debug)]
pub struct StatusBoard {
    refresher: Refresher,
    view: Option<TwoDayView>,
}
impl StatusBoard {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            refresher: Refresher::new(policy),
            view: None,
        }
    }

    /// Recomputes the view if the refresher fires for `now`.
    pub fn refresh(&mut self, now: Zoned) -> Result<bool, Error> {
        if !self.refresher.poll(&now) {
            return Ok(false);
        }
        let view = TwoDayView::at(&now)?;
        debug!(now = %view.now, current = ?view.current.as_ref().map(|b| b.block), next = view.next.block, "Refreshed status board");
        self.view = Some(view);
        Ok(true)
    }

    pub fn view(&self) -> Option<&TwoDayView> {
        self.view.as_ref()
    }
}
