//! The booking state machine.
//!
//! [`reduce`] is the whole transition table as a pure function;
//! [`BookingFlowController`] wraps it with a clock and a notifier so a
//! presentation layer only has to forward events and read state back.

use crate::adapters::SystemClock;
use crate::core::calendar::{CalendarGrid, CalendarMonth};
use crate::core::form;
use crate::core::payload::{self, BookingRecord, MessageTemplate};
use crate::core::slots;
use crate::domain::model::{
    BookingSelection, BookingStep, ClosedDays, ContactDetails, ContactField, TimeFormat, TimeSlot,
};
use crate::domain::ports::{Clock, OutboundNotifier};
use crate::utils::error::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

/// Business rules the flow is evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRules {
    pub closed_days: ClosedDays,
    pub time_format: TimeFormat,
    pub week_start: Weekday,
    pub template: MessageTemplate,
}

impl Default for FlowRules {
    fn default() -> Self {
        Self {
            closed_days: ClosedDays::default(),
            time_format: TimeFormat::default(),
            week_start: Weekday::Sun,
            template: MessageTemplate::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Move the visible month by this many months.
    NavigateMonth(i32),
    SelectDate(NaiveDate),
    /// Pick a slot by its label, in either 12h or 24h form.
    SelectTime(String),
    EditContact(ContactField, String),
    Back,
    Submit,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingState {
    step: BookingStep,
    view_month: CalendarMonth,
    selection: BookingSelection,
    contact: ContactDetails,
}

impl BookingState {
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            step: BookingStep::Selection,
            view_month: CalendarMonth::of(today),
            selection: BookingSelection::default(),
            contact: ContactDetails::default(),
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn view_month(&self) -> CalendarMonth {
        self.view_month
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }
}

/// Result of applying one action.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: BookingState,
    /// Set only by a successful submit.
    pub record: Option<BookingRecord>,
}

/// Dates strictly before today are past; today itself is still bookable.
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

pub fn is_selectable(date: NaiveDate, today: NaiveDate, rules: &FlowRules) -> bool {
    !is_past(date, today) && !rules.closed_days.contains(date.weekday())
}

pub fn reduce(
    state: &BookingState,
    action: Action,
    rules: &FlowRules,
    now: NaiveDateTime,
) -> Transition {
    let today = now.date();
    let mut next = state.clone();
    let mut record = None;

    match (state.step, action) {
        (_, Action::NavigateMonth(offset)) => {
            next.view_month = state.view_month.shifted(offset);
        }
        (BookingStep::Selection, Action::SelectDate(date)) => {
            if is_selectable(date, today, rules) {
                next.selection.pick_date(date);
            } else {
                tracing::debug!("Ignoring unselectable date {}", date);
            }
        }
        (BookingStep::Selection, Action::SelectTime(label)) => {
            let slot = state.selection.date().and_then(|date| {
                slots::find_slot(date, &rules.closed_days, rules.time_format, &label)
            });
            match slot {
                Some(slot) => {
                    next.selection.pick_time(slot);
                    next.step = BookingStep::Details;
                }
                None => tracing::debug!("Ignoring time '{}' outside the offered slots", label),
            }
        }
        (BookingStep::Details, Action::EditContact(field, value)) => {
            next.contact.set(field, value);
        }
        (BookingStep::Details, Action::Back) => {
            next.step = BookingStep::Selection;
        }
        (BookingStep::Details, Action::Submit) => {
            if form::is_submittable(&state.contact) {
                match payload::assemble(&state.selection, &state.contact, now, &rules.template) {
                    Ok(assembled) => {
                        record = Some(assembled);
                        next.step = BookingStep::Success;
                    }
                    Err(e) => tracing::warn!("Submission rejected: {}", e),
                }
            } else {
                tracing::debug!(
                    "Submit ignored, missing: {}",
                    form::missing_fields(&state.contact).join(", ")
                );
            }
        }
        (BookingStep::Success, Action::Reset) => {
            next.step = BookingStep::Selection;
            next.selection = BookingSelection::default();
            next.contact = ContactDetails::default();
        }
        (step, action) => {
            tracing::debug!("Action {:?} is not available in step {}", action, step);
        }
    }

    Transition {
        state: next,
        record,
    }
}

/// Render hints for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub selectable: bool,
    pub selected: bool,
    pub today: bool,
}

pub struct BookingFlowController<N: OutboundNotifier, C: Clock = SystemClock> {
    state: BookingState,
    rules: FlowRules,
    notifier: N,
    clock: C,
}

impl<N: OutboundNotifier, C: Clock> BookingFlowController<N, C> {
    pub fn new(rules: FlowRules, notifier: N, clock: C) -> Self {
        let state = BookingState::initial(clock.now().date());
        Self {
            state,
            rules,
            notifier,
            clock,
        }
    }

    /// Apply one action and return the resulting step. A produced record
    /// is handed to the notifier before this returns; its outcome is not
    /// observed.
    pub fn dispatch(&mut self, action: Action) -> BookingStep {
        let now = self.clock.now();
        let Transition { state, record } = reduce(&self.state, action, &self.rules, now);
        self.state = state;

        if let Some(record) = record {
            tracing::info!(
                "📅 Booking submitted: {} on {} at {}",
                record.name(),
                record.date(),
                record.time()
            );
            self.notifier.send(record);
        }

        self.state.step
    }

    pub fn navigate_month(&mut self, offset: i32) -> BookingStep {
        self.dispatch(Action::NavigateMonth(offset))
    }

    pub fn select_date(&mut self, date: NaiveDate) -> BookingStep {
        self.dispatch(Action::SelectDate(date))
    }

    pub fn select_time(&mut self, label: impl Into<String>) -> BookingStep {
        self.dispatch(Action::SelectTime(label.into()))
    }

    pub fn edit_contact(&mut self, field: ContactField, value: impl Into<String>) -> BookingStep {
        self.dispatch(Action::EditContact(field, value.into()))
    }

    pub fn back(&mut self) -> BookingStep {
        self.dispatch(Action::Back)
    }

    pub fn submit(&mut self) -> BookingStep {
        self.dispatch(Action::Submit)
    }

    pub fn reset(&mut self) -> BookingStep {
        self.dispatch(Action::Reset)
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    pub fn step(&self) -> BookingStep {
        self.state.step
    }

    pub fn view_month(&self) -> CalendarMonth {
        self.state.view_month
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.state.selection
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.state.contact
    }

    pub fn rules(&self) -> &FlowRules {
        &self.rules
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn grid(&self) -> Result<CalendarGrid> {
        self.state.view_month.grid(self.rules.week_start)
    }

    /// The grid with per-day render hints; padding stays `None`.
    pub fn day_cells(&self) -> Result<Vec<Option<DayCell>>> {
        let today = self.clock.now().date();
        let selected = self.state.selection.date();
        let grid = self.grid()?;

        Ok(grid
            .cells()
            .iter()
            .map(|cell| {
                cell.map(|date| DayCell {
                    date,
                    selectable: is_selectable(date, today, &self.rules),
                    selected: selected == Some(date),
                    today: date == today,
                })
            })
            .collect())
    }

    /// Slots for the selected date, or none when no date is picked.
    pub fn slots(&self) -> Vec<TimeSlot> {
        match self.state.selection.date() {
            Some(date) => slots::slots_for(date, &self.rules.closed_days, self.rules.time_format),
            None => Vec::new(),
        }
    }

    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        is_selectable(date, self.clock.now().date(), &self.rules)
    }

    pub fn can_submit(&self) -> bool {
        self.state.step == BookingStep::Details && form::is_submittable(&self.state.contact)
    }

    /// `"Oct 19, 10:00am"` once both date and time are picked.
    pub fn summary(&self) -> Option<String> {
        let date = self.state.selection.date()?;
        let time = self.state.selection.time()?;
        Some(format!("{}, {}", date.format("%b %-d"), time.label()))
    }
}
