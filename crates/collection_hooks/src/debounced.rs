//! `use_debounced`: trailing-edge debounce of a signal.

use std::time::Duration;

use collection_state::{DebounceConfig, Debouncer};
use leptos::*;

type CancelTimer = Box<dyn FnOnce()>;

/// Follows `value`, updating only after it has been stable for `config.delay_ms`.
///
/// Pending updates are dropped when the owning scope is cleaned up.
pub fn use_debounced<T: Clone + 'static>(value: Signal<T>, config: DebounceConfig) -> Signal<T> {
    debounce_with(value, config, |fire, delay| {
        match set_timeout_with_handle(fire, delay) {
            Ok(handle) => Some(Box::new(move || handle.clear()) as CancelTimer),
            Err(err) => {
                logging::warn!("debounce timer failed: {err:?}");
                None
            }
        }
    })
}

/// [`use_debounced`] over an arbitrary timer: `schedule(fire, delay)` arranges for `fire` to run
/// after `delay` and may return a canceller.
fn debounce_with<T, S>(value: Signal<T>, config: DebounceConfig, schedule: S) -> Signal<T>
where
    T: Clone + 'static,
    S: Fn(Box<dyn FnOnce()>, Duration) -> Option<CancelTimer> + 'static,
{
    let output = create_rw_signal(value.get_untracked());
    let debouncer = store_value(Debouncer::new(config));
    let timer = store_value(None::<CancelTimer>);
    let delay = Duration::from_millis(config.delay_ms);

    create_effect(move |previous: Option<()>| {
        let next = value.get();
        if previous.is_none() {
            return;
        }
        let Some(ticket) = debouncer.try_update_value(|d| d.schedule(next)) else {
            return;
        };
        let fire: Box<dyn FnOnce()> = Box::new(move || {
            if let Some(settled) = debouncer.try_update_value(|d| d.fire(ticket)).flatten() {
                output.set(settled);
            }
        });
        let cancel = schedule(fire, delay);
        if let Some(Some(stale)) = timer.try_update_value(|t| std::mem::replace(t, cancel)) {
            stale();
        }
    });

    on_cleanup(move || {
        debouncer.try_update_value(|d| d.cancel());
        if let Some(Some(cancel)) = timer.try_update_value(Option::take) {
            cancel();
        }
    });

    output.into()
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use pretty_assertions::assert_eq;

    use super::*;

    type Timers = Rc<RefCell<Vec<Box<dyn FnOnce()>>>>;

    fn run_all(timers: &Timers) {
        let due: Vec<_> = timers.borrow_mut().drain(..).collect();
        for fire in due {
            fire();
        }
    }

    #[test]
    fn only_the_latest_value_settles() {
        let _ = create_runtime();
        let timers: Timers = Rc::default();
        let input = create_rw_signal(String::from("s"));
        let queued = Rc::clone(&timers);
        let settled = debounce_with(input.into(), DebounceConfig::default(), move |fire, _| {
            queued.borrow_mut().push(fire);
            None
        });

        assert_eq!(settled.get_untracked(), "s");
        input.set("sh".to_string());
        input.set("shoe".to_string());
        assert_eq!(settled.get_untracked(), "s");
        assert_eq!(timers.borrow().len(), 2);

        run_all(&timers);
        assert_eq!(settled.get_untracked(), "shoe");
    }

    #[test]
    fn superseded_timers_are_cancelled() {
        let _ = create_runtime();
        let timers: Timers = Rc::default();
        let cancelled = Rc::new(Cell::new(0));
        let input = create_rw_signal(0u32);
        let (queued, counter) = (Rc::clone(&timers), Rc::clone(&cancelled));
        let settled = debounce_with(
            input.into(),
            DebounceConfig { delay_ms: 50 },
            move |fire, delay| {
                assert_eq!(delay, Duration::from_millis(50));
                queued.borrow_mut().push(fire);
                let counter = Rc::clone(&counter);
                Some(Box::new(move || counter.set(counter.get() + 1)) as CancelTimer)
            },
        );

        input.set(1);
        input.set(2);
        input.set(3);
        assert_eq!(cancelled.get(), 2);

        run_all(&timers);
        assert_eq!(settled.get_untracked(), 3);
    }
}
