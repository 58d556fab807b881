//! Timer Hooks
//!
//! Browser timers owned by an effect. The effect's previous value is the
//! running timer, so replacing or disposing the effect cancels it.

use gloo_timers::callback::{Interval, Timeout};
use leptos::prelude::*;

use crate::dates::{now, remaining_time};

/// Live "time left" text for `expiry`, refreshed every second.
///
/// `None` when there is no expiry or it has passed. The interval stops at
/// that point, when `expiry` changes and when the owner is disposed.
pub fn use_countdown(expiry: Signal<Option<String>>) -> Signal<Option<String>> {
    let (remaining, set_remaining) = signal(None::<String>);
    let lapsed = Memo::new(move |_| remaining.with(Option::is_none));

    Effect::new(move |previous: Option<Option<Interval>>| {
        drop(previous);
        lapsed.track();

        let expiry = expiry.get();
        let left = time_left(expiry.as_deref());
        let running = left.is_some();
        set_remaining.set(left);
        // no timer once lapsed; the previous one was dropped above
        let expiry = expiry.filter(|_| running)?;

        Some(Interval::new(1_000, move || {
            set_remaining.set(time_left(Some(&expiry)));
        }))
    });

    remaining.into()
}

fn time_left(expiry: Option<&str>) -> Option<String> {
    expiry.and_then(|expiry| remaining_time(expiry, now()))
}

/// `source`, delayed until it has been quiet for `ms` milliseconds
pub fn use_debounced<T>(source: Signal<T>, ms: u32) -> Signal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (value, set_value) = signal(source.get_untracked());

    Effect::new(move |previous: Option<Timeout>| {
        // dropping the pending timeout cancels it
        drop(previous);
        let next = source.get();
        Timeout::new(ms, move || set_value.set(next))
    });

    value.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use any_spawner::Executor;

    fn setup() -> Owner {
        let _ = Executor::init_futures_executor();
        let owner = Owner::new();
        owner.set();
        owner
    }

    #[test]
    fn test_countdown_without_expiry_is_none() {
        let _owner = setup();
        let expiry = RwSignal::new(None::<String>);
        let countdown = use_countdown(expiry.into());
        Executor::poll_local();

        assert_eq!(countdown.get_untracked(), None);
    }

    #[test]
    fn test_lapsed_pin_stops_counting() {
        let _owner = setup();
        let expiry = RwSignal::new(Some("2020-01-01T00:00:00Z".to_string()));
        let countdown = use_countdown(expiry.into());
        Executor::poll_local();
        assert_eq!(countdown.get_untracked(), None);

        // still lapsed after the expiry changes to another past date
        expiry.set(Some("2021-06-01".to_string()));
        Executor::poll_local();
        assert_eq!(countdown.get_untracked(), None);

        expiry.set(None);
        Executor::poll_local();
        assert_eq!(countdown.get_untracked(), None);
    }

    #[test]
    fn test_time_left() {
        assert_eq!(time_left(None), None);
        assert_eq!(time_left(Some("2020-01-01")), None);
        assert_eq!(time_left(Some("no es una fecha")), None);
        assert!(time_left(Some("2999-01-01T00:00:00Z")).is_some());
    }
}
