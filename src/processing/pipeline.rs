use std::sync::Arc;

use thiserror::Error;

use super::api::{ApiError, ApplyShapeCommand, Credential, ImageApi, ImageRef};
use crate::editor::tools::{Shape, ToolKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    ReloadCredentials,
}

impl std::fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReloadCredentials => f.write_str("sign in again to refresh your session"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("nothing to apply: draw at least one shape first")]
    NothingToApply,
    #[error("authentication missing: sign in before applying drawings")]
    MissingCredential,
    #[error("session expired; {recovery}")]
    AuthExpired {
        recovery: RecoveryAction,
        applied: usize,
    },
    #[error("failed to apply {kind} (shape {}): {detail}", .index + 1)]
    RemoteApply {
        index: usize,
        kind: ToolKind,
        detail: String,
    },
    #[error("drawings applied but the image list could not be loaded: {detail}")]
    ImageList { detail: String, applied: usize },
    #[error("a commit is already in progress")]
    Busy,
    #[error("commit worker stopped before reporting a result")]
    WorkerStopped,
}

impl CommitError {
    pub const fn recovery(&self) -> Option<RecoveryAction> {
        match self {
            Self::AuthExpired { recovery, .. } => Some(*recovery),
            _ => None,
        }
    }

    /// Leading shapes the service had already drawn when the commit failed.
    pub const fn applied(&self) -> usize {
        match self {
            Self::RemoteApply { index, .. } => *index,
            Self::AuthExpired { applied, .. } | Self::ImageList { applied, .. } => *applied,
            _ => 0,
        }
    }

    /// Rejected locally, before any request was sent.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::NothingToApply | Self::MissingCredential | Self::Busy)
    }

    const fn auth_expired(applied: usize) -> Self {
        Self::AuthExpired {
            recovery: RecoveryAction::ReloadCredentials,
            applied,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub success: bool,
    pub applied: usize,
    pub original: ImageRef,
    pub new_image: Option<ImageRef>,
    pub refresh_gallery: bool,
}

/// Replays an authored shape list against the image service, one shape at a time.
#[derive(Clone)]
pub struct CommitPipeline {
    api: Arc<dyn ImageApi>,
    image: ImageRef,
}

impl std::fmt::Debug for CommitPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitPipeline")
            .field("image", &self.image)
            .finish_non_exhaustive()
    }
}

impl CommitPipeline {
    pub fn new(api: Arc<dyn ImageApi>, image: ImageRef) -> Self {
        Self { api, image }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Checks that run before any request is made.
    pub fn validate(shapes: &[Shape], credential: Option<&Credential>) -> Result<(), CommitError> {
        if shapes.is_empty() {
            return Err(CommitError::NothingToApply);
        }
        if credential.is_none() {
            return Err(CommitError::MissingCredential);
        }
        Ok(())
    }

    /// Applies `shapes` in order and stops at the first failure. Shapes applied
    /// before a failure stay applied on the server; [`CommitError::applied`]
    /// says how many.
    ///
    /// With `create_copy` set and no `image_id` in any draw response, the new
    /// copy is taken to be the first entry of `list_images`. That is only
    /// correct while the service lists images most recent first; a listing in
    /// any other order silently resolves to the wrong image.
    pub fn commit(
        &self,
        shapes: &[Shape],
        create_copy: bool,
        credential: Option<&Credential>,
    ) -> Result<CommitResult, CommitError> {
        Self::validate(shapes, credential)?;
        let credential = credential.ok_or(CommitError::MissingCredential)?;

        // Once the service names the copy it produced, later shapes are drawn
        // onto that copy instead of spawning one copy per shape.
        let mut target = self.image.id;
        let mut copy_flag = create_copy;
        let mut produced: Option<ImageRef> = None;

        for (index, shape) in shapes.iter().enumerate() {
            let command = ApplyShapeCommand::from_shape(shape, copy_flag);
            let response = self
                .api
                .apply_shape(credential, target, &command)
                .map_err(|err| remote_failure(index, shape.kind(), err))?;
            tracing::debug!(
                index,
                kind = %shape.kind(),
                image_id = target,
                processed = %response.processed_filename,
                "shape applied"
            );
            if copy_flag {
                if let Some(image_id) = response.image_id {
                    produced = Some(ImageRef::new(image_id, response.processed_filename));
                    target = image_id;
                    copy_flag = false;
                }
            }
        }

        let new_image = match (create_copy, produced) {
            (false, _) => None,
            (true, Some(image)) => Some(image),
            (true, None) => self.newest_image(credential, shapes.len())?,
        };
        tracing::info!(
            applied = shapes.len(),
            original = self.image.id,
            new_image = ?new_image.as_ref().map(|image| image.id),
            "commit finished"
        );
        Ok(CommitResult {
            success: true,
            applied: shapes.len(),
            original: self.image.clone(),
            new_image,
            refresh_gallery: true,
        })
    }

    /// First entry of the image list; the service lists most recent first.
    fn newest_image(
        &self,
        credential: &Credential,
        applied: usize,
    ) -> Result<Option<ImageRef>, CommitError> {
        let images = self.api.list_images(credential).map_err(|err| match err {
            ApiError::Unauthorized => CommitError::auth_expired(applied),
            other => CommitError::ImageList {
                detail: other.detail(),
                applied,
            },
        })?;
        if images.is_empty() {
            tracing::warn!("image list empty after commit; copy could not be resolved");
        }
        Ok(images.first().map(ImageRef::from))
    }
}

fn remote_failure(index: usize, kind: ToolKind, err: ApiError) -> CommitError {
    match err {
        ApiError::Unauthorized => {
            tracing::warn!(index, "credential rejected while applying shapes");
            CommitError::auth_expired(index)
        }
        other => {
            tracing::warn!(index, %kind, error = %other, "shape apply failed; aborting commit");
            CommitError::RemoteApply {
                index,
                kind,
                detail: other.detail(),
            }
        }
    }
}
