//! UI event bus: global pointer subscriptions and next-frame tasks.
//!
//! Components that need to observe input outside their own area (for example
//! a dropdown that closes on an outside click) subscribe here instead of
//! relying on the focused-component routing in `MainView`. The runtime reads
//! the subscriber list on every left mouse-down and turns each entry into a
//! `Msg::GlobalPointerDown` for its owner.
//!
//! Next-frame tasks cover work that must wait until the widget it targets has
//! been drawn at least once (moving focus into a list that only exists while
//! open). The runtime drains them after each draw. Tasks are cancellable, so
//! a component that closes before the frame runs leaves nothing behind.

use feedback_types::{FrameAction, WidgetKey};
use tracing::trace;

/// Handle to a pointer-down subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Handle to a scheduled next-frame task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameTaskId(u64);

#[derive(Debug, Clone)]
struct PointerSubscription {
    id: ListenerId,
    widget: WidgetKey,
}

#[derive(Debug, Clone)]
struct FrameTask {
    id: FrameTaskId,
    widget: WidgetKey,
    action: FrameAction,
}

#[derive(Debug, Default)]
pub struct UiEventBus {
    next_id: u64,
    pointer_down: Vec<PointerSubscription>,
    frame_tasks: Vec<FrameTask>,
}

impl UiEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Subscribes `widget` to global pointer-down events.
    ///
    /// A widget holds at most one subscription; subscribing again returns the
    /// existing handle instead of stacking a duplicate.
    pub fn subscribe_pointer_down(&mut self, widget: &WidgetKey) -> ListenerId {
        if let Some(existing) = self.pointer_down.iter().find(|sub| &sub.widget == widget) {
            return existing.id;
        }
        let id = ListenerId(self.allocate_id());
        trace!(widget = %widget, "pointer-down listener registered");
        self.pointer_down.push(PointerSubscription {
            id,
            widget: widget.clone(),
        });
        id
    }

    /// Removes a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        let before = self.pointer_down.len();
        self.pointer_down.retain(|sub| sub.id != id);
        if self.pointer_down.len() != before {
            trace!(?id, "pointer-down listener released");
        }
    }

    /// Widgets currently listening for pointer-down events, in subscription order.
    pub fn pointer_down_subscribers(&self) -> Vec<WidgetKey> {
        self.pointer_down.iter().map(|sub| sub.widget.clone()).collect()
    }

    pub fn listener_count(&self) -> usize {
        self.pointer_down.len()
    }

    #[cfg(test)]
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.pointer_down.iter().any(|sub| sub.id == id)
    }

    /// Schedules `action` for `widget` to run after the next draw.
    pub fn schedule_next_frame(&mut self, widget: &WidgetKey, action: FrameAction) -> FrameTaskId {
        let id = FrameTaskId(self.allocate_id());
        self.frame_tasks.push(FrameTask {
            id,
            widget: widget.clone(),
            action,
        });
        id
    }

    /// Cancels a scheduled task. Tasks that already ran are ignored.
    pub fn cancel(&mut self, id: FrameTaskId) {
        self.frame_tasks.retain(|task| task.id != id);
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, id: FrameTaskId) -> bool {
        self.frame_tasks.iter().any(|task| task.id == id)
    }

    pub fn has_frame_tasks(&self) -> bool {
        !self.frame_tasks.is_empty()
    }

    /// Drains the tasks due this frame.
    pub fn take_frame_tasks(&mut self) -> Vec<(WidgetKey, FrameAction)> {
        self.frame_tasks.drain(..).map(|task| (task.widget, task.action)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribing_twice_keeps_a_single_listener() {
        let mut bus = UiEventBus::new();
        let key = WidgetKey::new("lookup");
        let first = bus.subscribe_pointer_down(&key);
        let second = bus.subscribe_pointer_down(&key);
        assert_eq!(first, second);
        assert_eq!(bus.listener_count(), 1);

        bus.unsubscribe(first);
        assert_eq!(bus.listener_count(), 0);
        assert!(!bus.is_subscribed(first));
        // releasing again is harmless
        bus.unsubscribe(first);
    }

    #[test]
    fn cancelled_tasks_are_not_drained() {
        let mut bus = UiEventBus::new();
        let key = WidgetKey::new("lookup");
        let cancelled = bus.schedule_next_frame(&key, FrameAction::FocusList);
        let kept = bus.schedule_next_frame(&key, FrameAction::FocusList);
        bus.cancel(cancelled);
        assert!(!bus.is_scheduled(cancelled));
        assert!(bus.is_scheduled(kept));

        let due = bus.take_frame_tasks();
        assert_eq!(due, vec![(key, FrameAction::FocusList)]);
        assert!(!bus.has_frame_tasks());
    }
}
