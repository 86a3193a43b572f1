use std::cell::RefCell;
use std::rc::Rc;

use feedback_types::TypeOptions;
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;

use crate::ui::components::type_select::{TypeSelectProps, TypeSelectState};

/// Message shown when submit is attempted with an empty value.
pub const EMPTY_VALUE_ERROR: &str = "Please enter a value before submitting.";

/// The caller-owned copy of the selector's values. The selector's change
/// callbacks write here; the form feeds it back after each event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub kind: String,
    pub value: String,
}

/// A submission accepted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub kind: String,
    pub value: String,
}

/// State for the feedback form on the home route.
#[derive(Debug)]
pub struct FeedbackState {
    draft: Rc<RefCell<FeedbackDraft>>,
    pub type_select: TypeSelectState,
    /// Inline validation message under the selector.
    pub error: Option<String>,

    pub container_focus: FocusFlag,
    pub f_submit: FocusFlag,

    pub last_area: Rect,
    pub submit_area: Rect,
}

impl FeedbackState {
    pub fn new(options: TypeOptions, dom_id: Option<&str>) -> Self {
        let draft = Rc::new(RefCell::new(FeedbackDraft {
            kind: options.first().value.clone(),
            value: String::new(),
        }));

        let kind_sink = Rc::clone(&draft);
        let value_sink = Rc::clone(&draft);
        let mut props = TypeSelectProps::new()
            .options(options)
            .selected_value(draft.borrow().kind.clone())
            .on_type_change(move |kind| kind_sink.borrow_mut().kind = kind.to_string())
            .text_value("")
            .on_value_change(move |value| value_sink.borrow_mut().value = value.to_string());
        if let Some(dom_id) = dom_id {
            props = props.dom_id(dom_id);
        }

        Self {
            draft,
            type_select: TypeSelectState::new(props),
            error: None,
            container_focus: FocusFlag::named("feedback"),
            f_submit: FocusFlag::named("feedback.submit"),
            last_area: Rect::default(),
            submit_area: Rect::default(),
        }
    }

    pub fn draft(&self) -> FeedbackDraft {
        self.draft.borrow().clone()
    }

    /// Feeds the draft back into the selector. Call after every event the
    /// selector handled.
    pub fn sync_from_draft(&mut self) {
        let FeedbackDraft { kind, value } = self.draft();
        if !value.trim().is_empty() {
            self.error = None;
        }
        self.type_select.set_selected_value(Some(kind));
        self.type_select.set_text_value(Some(value));
    }

    /// Validates and consumes the draft. An empty (after trimming) value sets
    /// the inline error and yields nothing.
    pub fn submit(&mut self) -> Option<Submission> {
        let FeedbackDraft { kind, value } = self.draft();
        let value = value.trim();
        if value.is_empty() {
            self.error = Some(EMPTY_VALUE_ERROR.to_string());
            return None;
        }
        let submission = Submission {
            kind,
            value: value.to_string(),
        };
        self.draft.borrow_mut().value.clear();
        self.error = None;
        self.sync_from_draft();
        Some(submission)
    }
}

impl HasFocus for FeedbackState {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        builder.widget(&self.type_select);
        builder.leaf_widget(&self.f_submit);
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::events::UiEventBus;

    #[test]
    fn selector_changes_flow_through_the_draft() {
        let mut bus = UiEventBus::new();
        let mut state = FeedbackState::new(TypeOptions::default(), Some("lookup"));
        assert!(state.type_select.is_type_controlled());
        assert!(state.type_select.is_text_controlled());

        state.type_select.open(&mut bus);
        state.type_select.commit_index(1, &mut bus);
        state.type_select.insert_char('7');
        assert_eq!(state.type_select.trigger_label(), "Customer ID");
        assert_eq!(state.type_select.text_value(), "");

        state.sync_from_draft();
        assert_eq!(state.type_select.trigger_label(), "Ticket ID");
        assert_eq!(state.type_select.text_value(), "7");
        assert_eq!(
            state.draft(),
            FeedbackDraft {
                kind: "ticketID".into(),
                value: "7".into()
            }
        );
    }

    #[test]
    fn blank_submission_is_rejected_inline() {
        let mut state = FeedbackState::new(TypeOptions::default(), None);
        state.type_select.paste("   ");
        state.sync_from_draft();

        assert_eq!(state.submit(), None);
        assert_eq!(state.error.as_deref(), Some(EMPTY_VALUE_ERROR));

        state.type_select.insert_char('x');
        state.sync_from_draft();
        assert!(state.error.is_none());
    }

    #[test]
    fn submission_is_trimmed_and_clears_the_text() {
        let mut state = FeedbackState::new(TypeOptions::default(), None);
        state.type_select.paste("  CUST-001 ");
        state.sync_from_draft();

        let submission = state.submit().expect("accepted");
        assert_eq!(submission.kind, "customerID");
        assert_eq!(submission.value, "CUST-001");
        assert_eq!(state.type_select.text_value(), "");
        assert_eq!(state.type_select.trigger_label(), "Customer ID");
    }
}
