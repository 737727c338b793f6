use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tracks which observation of a page is the live one.
///
/// Each new observation advances the shared generation, so tokens handed
/// out earlier stop being current. An in-flight fetch holds its token and
/// checks it before every state commit; a stale token means the result is
/// dropped with no side effect. "Last requested identifier wins",
/// independent of the order results arrive in.
#[derive(Debug, Default)]
pub struct MountGuard {
    generation: Arc<AtomicU64>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate all outstanding tokens and return a fresh, current one.
    pub fn issue(&self) -> LivenessToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LivenessToken {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Invalidate all outstanding tokens without issuing a new one, e.g.
    /// when the page is torn down.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct LivenessToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LivenessToken {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}
