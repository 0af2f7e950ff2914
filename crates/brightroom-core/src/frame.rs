//! Coalescing of redraw requests onto animation frames.
//!
//! Layout changes may happen several times per frame (a rotate click, a load
//! completing, a resize). Only one frame callback is kept outstanding; later
//! requests piggyback on it.

/// Tracks the single outstanding frame request, identified by handle `H`
/// (the id returned by `requestAnimationFrame` in the browser).
#[derive(Debug)]
pub struct RedrawScheduler<H> {
    pending: Option<H>,
    requests: u64,
    draws: u64,
}

impl<H> Default for RedrawScheduler<H> {
    fn default() -> Self {
        Self {
            pending: None,
            requests: 0,
            draws: 0,
        }
    }
}

impl<H: Copy> RedrawScheduler<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a redraw request. Returns true if the caller must schedule a
    /// frame, false if one is already outstanding.
    pub fn request(&mut self) -> bool {
        self.requests += 1;
        self.pending.is_none()
    }

    /// Record the handle of the frame just scheduled.
    pub fn scheduled(&mut self, handle: H) {
        self.pending = Some(handle);
    }

    /// The frame callback ran. Returns whether it was still expected; a
    /// callback for a cancelled frame returns false and must not draw.
    pub fn fire(&mut self) -> bool {
        if self.pending.take().is_some() {
            self.draws += 1;
            true
        } else {
            false
        }
    }

    /// Forget the outstanding frame, returning its handle for cancellation.
    pub fn cancel(&mut self) -> Option<H> {
        self.pending.take()
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Total requests and actual draws, for diagnostics.
    pub fn stats(&self) -> (u64, u64) {
        (self.requests, self.draws)
    }
}
