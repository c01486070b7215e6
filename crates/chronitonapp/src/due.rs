//! # Due-Date Classification
//!
//! An Event is *due* when its next-due date has arrived, or falls within a lookahead
//! horizon, and it has not been done since that date:
//!
//! 1. No `next_date` → not due.
//! 2. `next_date` set, never done (`last_date` is `None`) → due.
//! 3. `last_date >= next_date` → not due; the current due date is already satisfied.
//! 4. Otherwise due iff `next_date` falls on or before the last instant of the day
//!    `today + within_days`.
//!
//! Day boundaries come from the caller's calendar (the time zone of `now`), not from
//! 24-hour windows: at 23:30 an Event due at 00:10 the next morning is *not* due with
//! `within_days = 0`. `within_days = 0` means "due today or overdue".
//!
//! The badge count (`count_due_events`) uses this same rule across every Event.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};

use crate::model::Event;

/// Classify `event` against the local clock.
pub fn is_due(event: &Event, within_days: u32) -> bool {
    is_due_at(event, within_days, &Local::now())
}

/// Classify `event` against an explicit clock reading.
pub fn is_due_at<Tz: TimeZone>(event: &Event, within_days: u32, now: &DateTime<Tz>) -> bool {
    let Some(next) = event.next_date else {
        return false;
    };

    let Some(last) = event.last_date else {
        return true;
    };

    if last >= next {
        return false;
    }

    next < horizon_end(now, within_days)
}

/// First instant *after* the horizon: midnight starting the day following
/// `today + within_days`, in the time zone of `now`.
pub fn horizon_end<Tz: TimeZone>(now: &DateTime<Tz>, within_days: u32) -> DateTime<Utc> {
    let boundary_day = now
        .date_naive()
        .checked_add_days(Days::new(u64::from(within_days) + 1));

    match boundary_day {
        Some(day) => start_of_day(&now.timezone(), day),
        None => DateTime::<Utc>::MAX_UTC,
    }
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Utc> {
    let midnight = day.and_hms_opt(0, 0, 0).unwrap_or_default();
    // A DST gap can swallow midnight; the day then starts an hour later.
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + chrono::Duration::hours(1)))
                .earliest()
        })
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 15, 0, 0).unwrap()
    }

    fn event(last: Option<DateTime<Utc>>, next: Option<DateTime<Utc>>) -> Event {
        let mut e = Event::new("Oil", Uuid::new_v4());
        e.last_date = last;
        e.next_date = next;
        e
    }

    #[test]
    fn test_no_next_date_is_never_due() {
        let e = event(Some(now() - Duration::days(30)), None);
        assert!(!is_due_at(&e, 365, &now()));
    }

    #[test]
    fn test_due_today_never_done() {
        let e = event(None, Some(now()));
        assert!(is_due_at(&e, 0, &now()));
    }

    #[test]
    fn test_never_done_ignores_horizon() {
        let e = event(None, Some(now() + Duration::days(40)));
        assert!(is_due_at(&e, 0, &now()));
    }

    #[test]
    fn test_done_after_overdue_date_is_not_due() {
        let e = event(
            Some(now() - Duration::days(1)),
            Some(now() - Duration::days(5)),
        );
        assert!(!is_due_at(&e, 0, &now()));
    }

    #[test]
    fn test_done_on_due_date_is_not_due() {
        let e = event(Some(now()), Some(now()));
        assert!(!is_due_at(&e, 7, &now()));
    }

    #[test]
    fn test_within_horizon() {
        let e = event(None, Some(now() + Duration::days(3)));
        assert!(is_due_at(&e, 7, &now()));

        let e = event(
            Some(now() - Duration::days(20)),
            Some(now() + Duration::days(3)),
        );
        assert!(is_due_at(&e, 7, &now()));
    }

    #[test]
    fn test_beyond_horizon() {
        let e = event(
            Some(now() - Duration::days(20)),
            Some(now() + Duration::days(10)),
        );
        assert!(!is_due_at(&e, 7, &now()));
    }

    #[test]
    fn test_overdue_is_due() {
        let e = event(
            Some(now() - Duration::days(60)),
            Some(now() - Duration::days(2)),
        );
        assert!(is_due_at(&e, 0, &now()));
    }

    #[test]
    fn test_horizon_uses_calendar_days() {
        let last = Some(now() - Duration::days(100));

        // Late tonight: due today
        let tonight = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();
        assert!(is_due_at(&event(last, Some(tonight)), 0, &now()));

        // Just after midnight: tomorrow, only within a one-day horizon
        let tomorrow = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        assert!(!is_due_at(&event(last, Some(tomorrow)), 0, &now()));
        assert!(is_due_at(&event(last, Some(tomorrow)), 1, &now()));
    }

    #[test]
    fn test_horizon_follows_clock_time_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 23:30 local on March 10th
        let local_now = plus_two.with_ymd_and_hms(2024, 3, 10, 23, 30, 0).unwrap();
        let last = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

        // 23:59 local, still today
        let late = Utc.with_ymd_and_hms(2024, 3, 10, 21, 59, 0).unwrap();
        assert!(is_due_at(&event(last, Some(late)), 0, &local_now));

        // 00:00 local on the 11th, which is still the 10th in UTC
        let midnight = Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap();
        assert!(!is_due_at(&event(last, Some(midnight)), 0, &local_now));
        assert!(is_due_at(&event(last, Some(midnight)), 1, &local_now));
    }

    #[test]
    fn test_horizon_end_value() {
        let end = horizon_end(&now(), 2);
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 13, 0, 0, 0).unwrap());
    }
}
