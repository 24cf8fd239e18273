//! One-shot bite notifier
//!
//! Listeners are registered up front and called at most once, the first time
//! `fire_once` runs. Later calls are no-ops.

use tracing::debug;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut() + Send + Sync>;

/// Observer list with a fired latch
#[derive(Default)]
pub struct BiteNotifier {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
    fired: bool,
}

impl std::fmt::Debug for BiteNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiteNotifier")
            .field("listeners", &self.listeners.len())
            .field("fired", &self.fired)
            .finish()
    }
}

impl BiteNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut() + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if the id was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Call every listener once. Returns true only on the call that fired.
    pub fn fire_once(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        debug!(listeners = self.listeners.len(), "bite event fired");
        for (_, listener) in self.listeners.iter_mut() {
            listener();
        }
        true
    }
}
