use super::state::Theme;
use std::sync::{Arc, Mutex, PoisonError};

/// Progress of a theme transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    /// Transitions are suppressed; the swap waits for the next frame.
    Scheduled,
    /// The theme is applied; transitions come back on the following frame.
    Swapped,
    /// Transitions are enabled again.
    Finished,
    /// A later theme change took over before this one finished.
    Superseded,
}

/// Handle to one `set_theme` call.
///
/// Clones share the same phase. A newer `set_theme` call supersedes every
/// unfinished transition, and a superseded transition's pending frame
/// callbacks do nothing.
#[derive(Debug, Clone)]
pub struct ThemeTransition {
    theme: Theme,
    started_at: i64,
    phase: Arc<Mutex<TransitionPhase>>,
}

impl ThemeTransition {
    pub(crate) fn new(theme: Theme, started_at: i64) -> Self {
        Self {
            theme,
            started_at,
            phase: Arc::new(Mutex::new(TransitionPhase::Scheduled)),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Clock reading taken when the transition was requested.
    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    pub fn phase(&self) -> TransitionPhase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == TransitionPhase::Finished
    }

    pub fn is_superseded(&self) -> bool {
        self.phase() == TransitionPhase::Superseded
    }

    /// Move from `from` to `to`. Fails if the transition is elsewhere,
    /// in particular once it has been superseded.
    pub(crate) fn advance(&self, from: TransitionPhase, to: TransitionPhase) -> bool {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase != from {
            return false;
        }
        *phase = to;
        true
    }

    pub(crate) fn supersede(&self) {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        if *phase != TransitionPhase::Finished {
            *phase = TransitionPhase::Superseded;
        }
    }
}
