//! Latest-wins guard for overlapping asynchronous operations.
//!
//! Every submitted operation is tagged with a [`Generation`]. When it settles,
//! its outcome is delivered to the success callback only if no newer operation
//! has been submitted in the meantime; everything else goes to the discard
//! callback. Completion order is irrelevant, only submission order counts.
//!
//! ```text
//! submit(A) ─→ g1 ──────────────────────────── settles ─→ discard (superseded)
//! submit(B) ─→ g2 ───────── settles ─→ accept
//! ```
//!
//! The guard owns the state it protects. The generation counter and that
//! state share one lock, so "is this still the latest?" and "apply the
//! payload" happen atomically with respect to new submissions.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinError;

/// Position of an operation in submission order. Starts at 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a settled operation was not delivered to the success callback.
#[derive(Debug)]
pub enum Discard<E> {
    /// Succeeded, but a newer operation had been submitted.
    Superseded {
        generation: Generation,
        latest: Generation,
    },
    /// The operation itself failed.
    Failed {
        generation: Generation,
        superseded: bool,
        reason: E,
    },
    /// The operation panicked or was cancelled by the runtime.
    Aborted {
        generation: Generation,
        superseded: bool,
        reason: String,
    },
}

impl<E> Discard<E> {
    pub fn generation(&self) -> Generation {
        match self {
            Discard::Superseded { generation, .. }
            | Discard::Failed { generation, .. }
            | Discard::Aborted { generation, .. } => *generation,
        }
    }

    /// True when a newer operation existed at settle time.
    pub fn is_superseded(&self) -> bool {
        match self {
            Discard::Superseded { .. } => true,
            Discard::Failed { superseded, .. } | Discard::Aborted { superseded, .. } => *superseded,
        }
    }
}

/// Outcome of matching a settled operation against the counter.
#[derive(Debug)]
pub enum Settlement<T, E> {
    Accepted { generation: Generation, value: T },
    Discarded(Discard<E>),
}

/// Monotonic generation counter.
///
/// Only tracks the newest *submitted* generation; it does not remember which
/// generations were applied.
#[derive(Debug, Default)]
pub struct Generations {
    latest: Generation,
}

impl Generations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next generation. It becomes the latest immediately.
    pub fn issue(&mut self) -> Generation {
        self.latest = self.latest.next();
        self.latest
    }

    pub fn latest(&self) -> Generation {
        self.latest
    }

    /// Generation the next call to [`issue`](Self::issue) will return.
    pub fn peek_next(&self) -> Generation {
        self.latest.next()
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.latest
    }

    /// Classify the outcome of `generation`.
    ///
    /// A failure is never accepted, even from the latest generation.
    pub fn settle<T, E>(&self, generation: Generation, outcome: Result<T, E>) -> Settlement<T, E> {
        let superseded = !self.is_current(generation);
        match outcome {
            Ok(value) if !superseded => Settlement::Accepted { generation, value },
            Ok(_) => Settlement::Discarded(Discard::Superseded {
                generation,
                latest: self.latest,
            }),
            Err(reason) => Settlement::Discarded(Discard::Failed {
                generation,
                superseded,
                reason,
            }),
        }
    }
}

type AcceptFn<S, T> = dyn Fn(&mut S, Generation, T) + Send + Sync;
type DiscardFn<S, E> = dyn Fn(&mut S, Discard<E>) + Send + Sync;

struct Guarded<S> {
    generations: Generations,
    state: S,
}

struct Shared<S, T, E> {
    guarded: Mutex<Guarded<S>>,
    on_accept: Box<AcceptFn<S, T>>,
    on_discard: Box<DiscardFn<S, E>>,
}

impl<S, T, E> Shared<S, T, E> {
    fn settle(&self, generation: Generation, outcome: Result<Result<T, E>, JoinError>) {
        let mut guarded = self.guarded.lock();
        let Guarded { generations, state } = &mut *guarded;

        let settlement = match outcome {
            Ok(result) => generations.settle(generation, result),
            Err(join_error) => Settlement::Discarded(Discard::Aborted {
                generation,
                superseded: !generations.is_current(generation),
                reason: join_error.to_string(),
            }),
        };

        match settlement {
            Settlement::Accepted { generation, value } => (self.on_accept)(state, generation, value),
            Settlement::Discarded(discard) => (self.on_discard)(state, discard),
        }
    }
}

/// Routes the outcomes of submitted operations to exactly one of two callbacks.
///
/// Callbacks run with the guard's lock held and receive the guarded state
/// mutably. They must not call back into the same guard.
pub struct LatestWins<S, T, E> {
    shared: Arc<Shared<S, T, E>>,
    runtime: Handle,
}

impl<S, T, E> Clone for LatestWins<S, T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            runtime: self.runtime.clone(),
        }
    }
}

impl<S, T, E> LatestWins<S, T, E>
where
    S: Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Create a guard whose operations run on `runtime`.
    pub fn new(
        runtime: Handle,
        state: S,
        on_accept: impl Fn(&mut S, Generation, T) + Send + Sync + 'static,
        on_discard: impl Fn(&mut S, Discard<E>) + Send + Sync + 'static,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                guarded: Mutex::new(Guarded {
                    generations: Generations::new(),
                    state,
                }),
                on_accept: Box::new(on_accept),
                on_discard: Box::new(on_discard),
            }),
            runtime,
        }
    }

    /// Submit an operation; it becomes the latest generation.
    pub fn submit<F>(&self, operation: F) -> Generation
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let generation = self.shared.guarded.lock().generations.issue();
        self.spawn(generation, operation);
        generation
    }

    /// Update the guarded state and optionally submit an operation, atomically.
    ///
    /// `prepare` receives the state and the generation the operation would be
    /// tagged with. Returning `None` submits nothing and leaves the counter
    /// untouched.
    pub fn submit_with<F, P>(&self, prepare: P) -> Option<Generation>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        P: FnOnce(&mut S, Generation) -> Option<F>,
    {
        let (generation, operation) = {
            let mut guarded = self.shared.guarded.lock();
            let Guarded { generations, state } = &mut *guarded;
            let operation = prepare(state, generations.peek_next())?;
            (generations.issue(), operation)
        };

        self.spawn(generation, operation);
        Some(generation)
    }

    /// Read the guarded state.
    pub fn with_state<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        read(&self.shared.guarded.lock().state)
    }

    /// Newest generation submitted so far.
    pub fn latest(&self) -> Generation {
        self.shared.guarded.lock().generations.latest()
    }

    fn spawn<F>(&self, generation: Generation, operation: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let shared = Arc::clone(&self.shared);
        // Separate task: a panicking operation still settles, as a JoinError.
        let task = self.runtime.spawn(operation);
        self.runtime.spawn(async move {
            let outcome = task.await;
            shared.settle(generation, outcome);
        });
    }
}
