//! Terminal events: polling, normalization, and the outcome of mapping them

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// The event payload components see
#[derive(Debug, Clone)]
pub enum EventKind {
    Key(KeyEvent),
    /// Clicks, drags and releases (scroll is split out)
    Mouse(MouseEvent),
    /// Wheel movement; positive delta scrolls down
    Scroll { column: u16, row: u16, delta: isize },
    Resize(u16, u16),
}

#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub poll_timeout: Duration,
    /// Pause between bursts, roughly one frame
    pub loop_sleep: Duration,
    /// Events forwarded per burst before yielding
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            loop_sleep: Duration::from_millis(16),
            max_batch: 32,
        }
    }
}

/// Keep the terminal events the app reacts to.
///
/// Key releases and repeats are dropped so every binding fires once per
/// press. Bare pointer motion is dropped too: with mouse capture on it
/// arrives on every cell crossed, and only button drags matter here.
pub fn classify(event: event::Event) -> Option<RawEvent> {
    match event {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Some(RawEvent::Key(key)),
        event::Event::Mouse(mouse) if mouse.kind != MouseEventKind::Moved => {
            Some(RawEvent::Mouse(mouse))
        }
        event::Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
        _ => None,
    }
}

/// Spawn the crossterm polling task; it stops on cancel or when the
/// receiver is gone.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    config: PollerConfig,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("Event poller started");
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    // Leave nothing queued for the shell once raw mode is off
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    info!("Event poller stopped");
                    return;
                }
                _ = tokio::time::sleep(config.loop_sleep) => {
                    for _ in 0..config.max_batch {
                        if !event::poll(config.poll_timeout).unwrap_or(false) {
                            break;
                        }
                        let Some(raw) = event::read().ok().and_then(classify) else {
                            continue;
                        };
                        if tx.send(raw).is_err() {
                            debug!("Event receiver dropped, poller exiting");
                            return;
                        }
                    }
                }
            }
        }
    })
}

/// Split wheel movement out of mouse events
pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: 1,
            },
            MouseEventKind::ScrollUp => EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta: -1,
            },
            _ => EventKind::Mouse(mouse),
        },
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}

/// Result of mapping an event into actions plus a render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    /// Re-render even if no action changes state (e.g. cursor moved)
    pub needs_render: bool,
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn action(action: A) -> Self {
        Self {
            actions: vec![action],
            needs_render: false,
        }
    }

    /// Collect the output of a component's `handle_event`
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && !self.needs_render
    }
}
