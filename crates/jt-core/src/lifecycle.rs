//! Mount/dispose bookkeeping for components that own frame loops and GPU state.
//!
//! Mounting may be asynchronous (adapter/device requests on the web), so a
//! component can be disposed while it is still mounting. [`Lifecycle`] makes
//! the late arrival observable, and [`FrameSlot`] tracks the one outstanding
//! frame request so a stop always leaves nothing scheduled.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Mounting,
    Mounted,
    Disposed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `Idle -> Mounting`. Returns `false` if mounting already started or the
    /// component is disposed.
    pub fn begin_mount(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Mounting;
        true
    }

    /// `Mounting -> Mounted`. Returns `false` when disposed in the meantime:
    /// the caller then owns the freshly built resources and must release them.
    pub fn finish_mount(&mut self) -> bool {
        match self.phase {
            Phase::Mounting => {
                self.phase = Phase::Mounted;
                true
            }
            _ => false,
        }
    }

    /// Move to `Disposed`. Returns `true` only on the first call.
    pub fn dispose(&mut self) -> bool {
        if self.phase == Phase::Disposed {
            return false;
        }
        self.phase = Phase::Disposed;
        true
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.phase, Phase::Mounting | Phase::Mounted)
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }
}

/// The single outstanding frame request of a self-rescheduling loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSlot {
    pending: Option<i32>,
    stopped: bool,
}

impl FrameSlot {
    /// Record a new request handle. Returns `false` (and records nothing) once
    /// stopped; the caller must cancel the handle it just obtained.
    pub fn schedule(&mut self, handle: i32) -> bool {
        if self.stopped {
            return false;
        }
        self.pending = Some(handle);
        true
    }

    /// Called at the top of the frame callback. Returns whether the loop should
    /// run this frame.
    pub fn fire(&mut self) -> bool {
        self.pending = None;
        !self.stopped
    }

    /// Stop the loop. Returns the outstanding handle to cancel, if any.
    pub fn stop(&mut self) -> Option<i32> {
        self.stopped = true;
        self.pending.take()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pending(&self) -> Option<i32> {
        self.pending
    }
}

/// How a page is being hidden, from `PageTransitionEvent.persisted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Entering the back/forward cache; the page may be shown again as-is.
    Cached,
    Unload,
}

impl PageHide {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            Self::Cached
        } else {
            Self::Unload
        }
    }

    /// Only a real unload releases the views; a cached page keeps them.
    pub fn tears_down(self) -> bool {
        self == Self::Unload
    }
}
