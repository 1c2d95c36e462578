//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use crate::core::lifecycle::StopToken;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a blocking task that polls the terminal for events and sends them
/// through the returned channel.  The task exits once `stop` is cancelled or
/// the receiver is dropped; `poll_rate` bounds how long that takes.
pub fn spawn_event_reader(poll_rate: Duration, stop: StopToken) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !stop.is_cancelled() {
            match event::poll(poll_rate) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    tracing::warn!("terminal poll failed: {e}");
                    break;
                }
            }
            let app_event = match event::read() {
                Ok(CtEvent::Key(k)) => AppEvent::Key(k),
                // Nothing reacts to bare pointer motion.
                Ok(CtEvent::Mouse(m)) if m.kind == MouseEventKind::Moved => continue,
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    break;
                }
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
        tracing::debug!("event reader stopped");
    });

    rx
}

/// `first` followed by everything already queued behind it, in arrival
/// order.  Never waits.
pub fn drain_pending(first: AppEvent, rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut batch = vec![first];
    while let Ok(event) = rx.try_recv() {
        batch.push(event);
    }
    batch
}
