/// How pointer gestures are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Draw,
    Interact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
}

impl GestureState {
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
