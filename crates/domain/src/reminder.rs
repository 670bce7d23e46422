use crate::{
    recurrence::{next_occurrence, Frequency},
    shared::entity::{Entity, ID},
};
use chrono::{Datelike, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Grace period after a firing instant within which the firing condition is
/// still considered met. Must be at least as long as the sweep tick period,
/// otherwise firings can fall between two ticks.
pub const NOTIFICATION_TOLERANCE_MILLIS: i64 = 60 * 1000;

/// A `Reminder` is a scheduled payment or task obligation owned by a `User`,
/// optionally linked to one of their `Client`s. The sweep job notifies the
/// configured recipients when an occurrence falls due, and recurring series
/// advance occurrence by occurrence through the completion workflow.
#[derive(Debug, Clone)]
pub struct Reminder {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub description: String,
    pub client_id: Option<ID>,
    /// Due date of the currently pending occurrence, not the series start
    pub due_date: i64,
    pub frequency: Frequency,
    pub amount_cents: Option<i64>,
    pub status: ReminderStatus,
    pub notify_user: bool,
    pub notify_client: bool,
    pub user_notification_message: Option<String>,
    pub client_notification_message: Option<String>,
    /// When > 0, an additional notice fires this many days before `due_date`
    pub advance_notification_days: i64,
    pub repeat_until: Option<i64>,
    /// Timestamp of the most recent notification sent for the current
    /// occurrence. Never refers to an already rolled-over occurrence.
    pub last_notified: Option<i64>,
    /// Precomputed due date of the next occurrence, `None` for `once`
    /// reminders and for series that have reached `repeat_until`
    pub next_due_date: Option<i64>,
    pub created: i64,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", status)
    }
}

#[derive(Error, Debug)]
pub enum InvalidReminderStatusError {
    #[error("Invalid reminder status specified: {0}")]
    Malformed(String),
}

impl FromStr for ReminderStatus {
    type Err = InvalidReminderStatusError;

    fn from_str(status: &str) -> Result<Self, Self::Err> {
        match status.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidReminderStatusError::Malformed(status.to_string())),
        }
    }
}

/// Outcome of evaluating a `Reminder` against a wall-clock instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEvaluation {
    pub fire_advance: bool,
    pub fire_due: bool,
    pub already_fired_advance: bool,
    pub already_fired_due: bool,
}

impl ReminderEvaluation {
    pub fn should_fire(&self) -> bool {
        self.fire_advance || self.fire_due
    }
}

impl Reminder {
    /// The instant at which the advance notice fires, when one is configured
    pub fn advance_notice_at(&self) -> Option<i64> {
        if self.advance_notification_days > 0 {
            Some(self.due_date - self.advance_notification_days * DAY_MILLIS)
        } else {
            None
        }
    }

    /// Decides whether the due-date and/or advance notification should fire
    /// at `now`.
    ///
    /// A firing is eligible inside a tolerance window starting at its target
    /// instant, never before it, and is suppressed once `last_notified` falls
    /// in the same UTC calendar minute as that instant. There is no catch-up:
    /// an instant whose window has passed unnotified stays unnotified.
    pub fn evaluate(&self, now: i64) -> ReminderEvaluation {
        let days_left = days_until(self.due_date, now);

        let already_fired_due = matches!(
            self.last_notified,
            Some(last) if same_calendar_minute(last, self.due_date)
        );
        let due_eligible = days_left == 0 && within_tolerance(self.due_date, now);

        let (fire_advance, already_fired_advance) = match self.advance_notice_at() {
            Some(notice_at) => {
                let already_fired = matches!(
                    self.last_notified,
                    Some(last) if same_calendar_minute(last, notice_at)
                );
                let eligible = days_left == self.advance_notification_days
                    && within_tolerance(notice_at, now);
                (eligible && !already_fired, already_fired)
            }
            None => (false, false),
        };

        ReminderEvaluation {
            fire_advance,
            fire_due: due_eligible && !already_fired_due,
            already_fired_advance,
            already_fired_due,
        }
    }

    /// Due date of the occurrence following the current one, honoring
    /// `repeat_until`
    pub fn compute_next_due_date(&self, now: i64) -> Option<i64> {
        next_occurrence(self.due_date, self.frequency, self.repeat_until, now)
    }

    /// Creates the successor occurrence spawned when a recurring reminder is
    /// completed. All notification settings carry over, the due date becomes
    /// `next_due` and the successor gets its own freshly computed
    /// `next_due_date`.
    pub fn spawn_successor(&self, next_due: i64, now: i64) -> Self {
        Self {
            id: Default::default(),
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            client_id: self.client_id.clone(),
            due_date: next_due,
            frequency: self.frequency,
            amount_cents: self.amount_cents,
            status: ReminderStatus::Pending,
            notify_user: self.notify_user,
            notify_client: self.notify_client,
            user_notification_message: self.user_notification_message.clone(),
            client_notification_message: self.client_notification_message.clone(),
            advance_notification_days: self.advance_notification_days,
            repeat_until: self.repeat_until,
            last_notified: None,
            next_due_date: next_occurrence(next_due, self.frequency, self.repeat_until, now),
            created: now,
        }
    }
}

fn within_tolerance(target: i64, now: i64) -> bool {
    target <= now && now <= target + NOTIFICATION_TOLERANCE_MILLIS
}

/// Whole days from `now` until `due`, rounded up. A due date later today
/// counts as one day away until the instant itself is reached.
fn days_until(due: i64, now: i64) -> i64 {
    let diff = due - now;
    let days = diff / DAY_MILLIS;
    if diff % DAY_MILLIS > 0 {
        days + 1
    } else {
        days
    }
}

fn same_calendar_minute(a: i64, b: i64) -> bool {
    let a = Utc.timestamp_millis(a);
    let b = Utc.timestamp_millis(b);
    a.year() == b.year()
        && a.month() == b.month()
        && a.day() == b.day()
        && a.hour() == b.hour()
        && a.minute() == b.minute()
}

#[cfg(test)]
mod test {
    use super::*;

    fn reminder_factory(due_date: i64, advance_days: i64) -> Reminder {
        Reminder {
            id: Default::default(),
            user_id: Default::default(),
            title: "Station rent".into(),
            description: "Monthly chair rental".into(),
            client_id: None,
            due_date,
            frequency: Frequency::Monthly,
            amount_cents: Some(45_000),
            status: ReminderStatus::Pending,
            notify_user: true,
            notify_client: false,
            user_notification_message: None,
            client_notification_message: None,
            advance_notification_days: advance_days,
            repeat_until: None,
            last_notified: None,
            next_due_date: None,
            created: 0,
        }
    }

    fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> i64 {
        Utc.ymd(year, month, day)
            .and_hms(hour, min, sec)
            .timestamp_millis()
    }

    #[test]
    fn fires_due_notification_within_tolerance_window() {
        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(due, 0);

        for now in [due, due + 1000, due + NOTIFICATION_TOLERANCE_MILLIS] {
            let eval = reminder.evaluate(now);
            assert!(eval.fire_due, "should fire at {}", now);
            assert!(!eval.fire_advance);
            assert!(!eval.already_fired_due);
        }
    }

    #[test]
    fn never_fires_before_due_date() {
        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(due, 0);

        let eval = reminder.evaluate(due - 1);
        assert!(!eval.fire_due);
        assert!(!eval.fire_advance);
    }

    #[test]
    fn idempotent_once_last_notified_is_recorded() {
        // A second evaluation in the same calendar minute reports the
        // firing as already done once last_notified is persisted
        let due = ts(2024, 4, 15, 9, 0, 0);
        let mut reminder = reminder_factory(due, 0);

        let first = reminder.evaluate(due + 5_000);
        assert!(first.fire_due);
        assert!(!first.already_fired_due);

        reminder.last_notified = Some(due + 5_000);
        let second = reminder.evaluate(due + 20_000);
        assert!(!second.fire_due);
        assert!(second.already_fired_due);
    }

    #[test]
    fn advance_and_due_are_mutually_exclusive() {
        // With advance days configured the two firings target different
        // whole-day distances and can never both be set
        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(due, 3);

        let instants = [
            due - 3 * DAY_MILLIS,
            due - 3 * DAY_MILLIS + 30_000,
            due - DAY_MILLIS,
            due,
            due + 30_000,
            due + NOTIFICATION_TOLERANCE_MILLIS,
        ];
        for now in instants {
            let eval = reminder.evaluate(now);
            assert!(
                !(eval.fire_advance && eval.fire_due),
                "both firings set at {}",
                now
            );
        }
    }

    #[test]
    fn fires_advance_notice_at_configured_distance() {
        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(due, 3);

        let eval = reminder.evaluate(due - 3 * DAY_MILLIS + 10_000);
        assert!(eval.fire_advance);
        assert!(!eval.fire_due);
    }

    #[test]
    fn advance_notice_deduplicates_by_calendar_minute() {
        let due = ts(2024, 4, 15, 9, 0, 0);
        let mut reminder = reminder_factory(due, 3);
        let notice_at = due - 3 * DAY_MILLIS;

        reminder.last_notified = Some(notice_at + 15_000);
        let eval = reminder.evaluate(notice_at + 40_000);
        assert!(!eval.fire_advance);
        assert!(eval.already_fired_advance);
        // The due firing three days later is unaffected by the advance dedup
        assert!(!eval.already_fired_due);
    }

    #[test]
    fn missed_window_is_not_caught_up() {
        // Intended behavior, not a bug: a sweeper outage longer than the
        // tolerance window permanently misses the occurrence.
        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(due, 0);
        assert!(reminder.last_notified.is_none());

        let eval = reminder.evaluate(due + NOTIFICATION_TOLERANCE_MILLIS + 1);
        assert!(!eval.fire_due);
        assert!(!eval.already_fired_due);
    }

    #[test]
    fn no_advance_notice_when_days_is_zero() {
        let due = ts(2024, 4, 15, 9, 0, 0);
        let reminder = reminder_factory(due, 0);
        assert_eq!(reminder.advance_notice_at(), None);

        let eval = reminder.evaluate(due - 3 * DAY_MILLIS);
        assert!(!eval.fire_advance);
    }

    #[test]
    fn successor_carries_settings_and_advances_series() {
        let due = ts(2024, 1, 31, 12, 0, 0);
        let now = ts(2024, 1, 31, 13, 0, 0);
        let mut reminder = reminder_factory(due, 3);
        reminder.last_notified = Some(due + 10_000);
        let next_due = reminder.compute_next_due_date(now).unwrap();
        assert_eq!(next_due, ts(2024, 2, 29, 12, 0, 0));

        let successor = reminder.spawn_successor(next_due, now);
        assert_ne!(successor.id, reminder.id);
        assert_eq!(successor.due_date, next_due);
        assert_eq!(successor.status, ReminderStatus::Pending);
        assert_eq!(successor.last_notified, None);
        assert_eq!(successor.advance_notification_days, 3);
        assert_eq!(
            successor.next_due_date,
            Some(ts(2024, 3, 29, 12, 0, 0))
        );
    }

    #[test]
    fn days_until_rounds_up_partial_days() {
        let due = ts(2024, 4, 15, 9, 0, 0);
        assert_eq!(days_until(due, due), 0);
        assert_eq!(days_until(due, due + 30_000), 0);
        assert_eq!(days_until(due, due - 1), 1);
        assert_eq!(days_until(due, due - DAY_MILLIS), 1);
        assert_eq!(days_until(due, due - DAY_MILLIS - 1), 2);
        assert_eq!(days_until(due, due - 3 * DAY_MILLIS), 3);
    }
}
