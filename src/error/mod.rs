use crate::editor::ToolError;
use crate::geometry::ColorParseError;
use crate::processing::{ApiError, CommitError};
use crate::session::SessionError;
use crate::state::StateError;
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Commit(#[from] CommitError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
