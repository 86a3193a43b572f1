use std::time::{Duration, Instant};

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

const STEP: Duration = Duration::from_secs(1);

/// Countdown shown after a submission.
///
/// `seconds_left` drops by one per elapsed second. The redirect fires exactly
/// once, when the count reaches zero.
#[derive(Debug, Clone)]
pub struct ThankYouState {
    start_seconds: u64,
    seconds_left: u64,
    last_step: Option<Instant>,
    redirected: bool,

    pub container_focus: FocusFlag,
    pub last_area: Rect,
}

impl ThankYouState {
    pub fn new(start_seconds: u64) -> Self {
        Self {
            start_seconds,
            seconds_left: start_seconds,
            last_step: None,
            redirected: false,
            container_focus: FocusFlag::named("thank_you"),
            last_area: Rect::default(),
        }
    }

    #[cfg(test)]
    pub fn seconds_left(&self) -> u64 {
        self.seconds_left
    }

    /// Whether the countdown still needs ticks.
    pub fn is_counting(&self) -> bool {
        self.last_step.is_some() && !self.redirected
    }

    /// Restarts the countdown from the configured start.
    pub fn start(&mut self, now: Instant) {
        self.seconds_left = self.start_seconds;
        self.last_step = Some(now);
        self.redirected = false;
    }

    /// Stops the countdown without redirecting.
    pub fn stop(&mut self) {
        self.last_step = None;
    }

    /// Advances the countdown. Returns `true` exactly once, on the tick that
    /// reaches zero.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(mut last_step) = self.last_step else {
            return false;
        };
        if self.redirected {
            return false;
        }
        while self.seconds_left > 0 && now.saturating_duration_since(last_step) >= STEP {
            self.seconds_left -= 1;
            last_step += STEP;
        }
        self.last_step = Some(last_step);
        if self.seconds_left == 0 {
            self.redirected = true;
            return true;
        }
        false
    }

    /// Marks the redirect as taken (early exit via Enter/Esc).
    pub fn finish(&mut self) -> bool {
        if self.redirected {
            return false;
        }
        self.redirected = true;
        true
    }

    pub fn message(&self) -> String {
        let unit = if self.seconds_left == 1 { "second" } else { "seconds" };
        format!(
            "We appreciate your feedback. Returning to the home page in {} {unit}.",
            self.seconds_left
        )
    }
}

impl HasFocus for ThankYouState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(&self.container_focus);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}
