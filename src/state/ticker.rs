use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

pub const CLOCK_PERIOD: Duration = Duration::from_millis(250);
pub const ANIMATION_PERIOD: Duration = Duration::from_millis(300);

/// Sends the same UI event on a fixed period until the receiver goes away.
/// Deadlines live in view state; this only wakes the main loop to check them.
pub struct Ticker {
    period: Duration,
    event: UiEvent,
    ui_events: mpsc::Sender<UiEvent>,
}

impl Ticker {
    pub fn clock(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { period: CLOCK_PERIOD, event: UiEvent::ClockTick, ui_events }
    }

    pub fn animation(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { period: ANIMATION_PERIOD, event: UiEvent::AnimationTick, ui_events }
    }

    pub async fn run(self) {
        let mut ticks = interval(self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // Skip the immediate first tick; startup is driven by AppStarted.
        ticks.tick().await;

        loop {
            ticks.tick().await;
            if self.ui_events.send(self.event.clone()).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clock_ticker_emits_clock_ticks() {
        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(Ticker::clock(tx).run());
        let event = rx.recv().await;
        assert!(matches!(event, Some(UiEvent::ClockTick)));
        task.abort();
    }

    #[tokio::test]
    async fn ticker_stops_when_receiver_is_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        // Completes instead of looping forever.
        Ticker::animation(tx).run().await;
    }
}
