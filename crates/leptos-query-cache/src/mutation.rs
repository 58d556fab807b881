//! Mutation Hook
//!
//! Runs a write operation at most once at a time per hook instance.

use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

/// In-flight flag shared by every dispatch of one mutation
#[derive(Clone, Debug, Default)]
pub struct MutationGate {
    busy: Arc<AtomicBool>,
}

impl MutationGate {
    /// Claim the gate; false while a previous call is still pending
    pub fn try_begin(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn finish(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Handle returned by [`use_mutation`]
pub struct Mutation<I: 'static> {
    pending: RwSignal<bool>,
    run: StoredValue<Rc<dyn Fn(I)>, LocalStorage>,
}

impl<I: 'static> Clone for Mutation<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: 'static> Copy for Mutation<I> {}

impl<I: 'static> Mutation<I> {
    /// True while a dispatched call has not settled; bind to `disabled`
    pub fn pending(&self) -> Signal<bool> {
        self.pending.into()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Start the mutation unless one is already pending
    pub fn dispatch(&self, input: I) {
        if let Some(run) = self.run.try_get_value() {
            run(input);
        }
    }
}

/// Wrap `mutate` so it can be dispatched from event handlers.
///
/// `on_settled` receives the input and the outcome once the call finishes;
/// errors never propagate past it.
pub fn use_mutation<I, O, E, F, Fut, S>(mutate: F, on_settled: S) -> Mutation<I>
where
    I: Clone + 'static,
    O: 'static,
    E: 'static,
    F: Fn(I) -> Fut + 'static,
    Fut: Future<Output = Result<O, E>> + 'static,
    S: Fn(I, Result<O, E>) + 'static,
{
    let pending = RwSignal::new(false);
    let gate = MutationGate::default();
    let mutate = Rc::new(mutate);
    let on_settled = Rc::new(on_settled);

    let run: Rc<dyn Fn(I)> = Rc::new(move |input: I| {
        if !gate.try_begin() {
            debug!("mutation already pending, dispatch ignored");
            return;
        }
        pending.set(true);

        let gate = gate.clone();
        let mutate = mutate.clone();
        let on_settled = on_settled.clone();
        spawn_local(async move {
            let result = mutate(input.clone()).await;
            gate.finish();
            // the owning view may be gone by now
            let _ = pending.try_set(false);
            on_settled(input, result);
        });
    });

    Mutation {
        pending,
        run: StoredValue::new_local(run),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use any_spawner::Executor;
    use std::cell::RefCell;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_gate_rejects_second_call_while_pending() {
        let gate = MutationGate::default();
        assert!(gate.try_begin());
        assert!(gate.is_busy());
        assert!(!gate.try_begin());

        gate.finish();
        assert!(!gate.is_busy());
        assert!(gate.try_begin());
    }

    #[test]
    fn test_gate_is_shared_between_clones() {
        let gate = MutationGate::default();
        let other = gate.clone();
        assert!(gate.try_begin());
        assert!(!other.try_begin());
        other.finish();
        assert!(gate.try_begin());
    }

    #[test]
    fn test_dispatch_while_pending_runs_once() {
        let _ = Executor::init_futures_executor();
        let owner = Owner::new();
        owner.set();

        let calls = Arc::new(AtomicUsize::new(0));
        let settled = Rc::new(RefCell::new(Vec::new()));

        let mutation = use_mutation(
            {
                let calls = calls.clone();
                move |id: u32| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    std::future::ready(Ok::<u32, String>(id))
                }
            },
            {
                let settled = settled.clone();
                move |_, result: Result<u32, String>| settled.borrow_mut().push(result)
            },
        );

        mutation.dispatch(1);
        assert!(mutation.pending().get_untracked());
        mutation.dispatch(2);
        Executor::poll_local();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*settled.borrow(), vec![Ok(1)]);
        assert!(!mutation.pending().get_untracked());

        // settled, so the next dispatch goes through
        mutation.dispatch(3);
        Executor::poll_local();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*settled.borrow(), vec![Ok(1), Ok(3)]);
    }
}
