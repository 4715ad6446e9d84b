use super::model::GestureState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    BeginDraw,
    BeginMove,
    BeginResize,
    Release,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: GestureState,
    pub event: GestureEvent,
    pub to: GestureState,
}

impl StateTransition {
    pub const fn new(from: GestureState, event: GestureEvent, to: GestureState) -> Self {
        Self { from, event, to }
    }
}
