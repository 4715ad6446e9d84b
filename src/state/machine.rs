use super::error::{StateError, StateResult};
use super::event::StateTransition;
use super::{GestureEvent, GestureState};

/// Validates gesture transitions for a single pointer.
///
/// A gesture only starts from `Idle`, and every gesture ends on release.
#[derive(Debug, Default)]
pub struct GestureMachine {
    state: GestureState,
    last_transition: Option<StateTransition>,
}

impl GestureMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn last_transition(&self) -> Option<StateTransition> {
        self.last_transition
    }

    pub fn can_transition(&self, event: GestureEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: GestureEvent) -> Option<GestureState> {
        use GestureEvent::*;
        match (self.state, event) {
            (GestureState::Idle, BeginDraw) => Some(GestureState::Drawing),
            (GestureState::Idle, BeginMove) => Some(GestureState::Moving),
            (GestureState::Idle, BeginResize) => Some(GestureState::Resizing),
            (GestureState::Drawing | GestureState::Moving | GestureState::Resizing, Release) => {
                Some(GestureState::Idle)
            }
            (_, Reset) => Some(GestureState::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: GestureEvent) -> StateResult<GestureState> {
        tracing::trace!(from = ?self.state, event = ?event, "request gesture transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::warn!(from = ?from, event = ?event, "invalid gesture transition requested");
            StateError::InvalidGestureTransition { from, event }
        })?;

        self.last_transition = Some(StateTransition::new(self.state, event, next));
        self.state = next;
        Ok(self.state)
    }
}

impl std::fmt::Display for GestureMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GestureState::{:?}", self.state)
    }
}
