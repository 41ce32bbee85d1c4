//! Clone-mutate-set helpers shared by every hook.

use leptos::*;

/// Applies `mutate` to a copy of the signal value and writes it back when it reports a change.
///
/// Returns `false` without running `mutate` once the signal has been disposed.
pub(crate) fn commit<T, F>(signal: RwSignal<T>, mutate: F) -> bool
where
    T: Clone + 'static,
    F: FnOnce(&mut T) -> bool,
{
    let Some(mut next) = signal.try_get_untracked() else {
        return false;
    };
    let changed = mutate(&mut next);
    if changed {
        signal.set(next);
    }
    changed
}

/// Fallible variant of [`commit`]; the signal is untouched on `Err`.
pub(crate) fn try_commit<T, E, F>(signal: RwSignal<T>, mutate: F) -> Result<bool, E>
where
    T: Clone + 'static,
    F: FnOnce(&mut T) -> Result<bool, E>,
{
    let Some(mut next) = signal.try_get_untracked() else {
        return Ok(false);
    };
    let changed = mutate(&mut next)?;
    if changed {
        signal.set(next);
    }
    Ok(changed)
}
