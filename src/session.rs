//! One annotation session over one stored image.

use std::sync::Arc;

use thiserror::Error;

use crate::config::AppConfig;
use crate::editor::{DrawingSurface, InteractionController, PointerOutcome, ShapeStyle, ToolKind};
use crate::geometry::{ImageBounds, SurfaceMapping};
use crate::notification::{NoticeLevel, Notifier};
use crate::processing::{
    CommitError, CommitOutcome, CommitPipeline, CommitWorker, Credential, HttpImageApi, ImageApi,
    ImageRef,
};
use crate::state::EditorMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("drawings are being applied; wait for the commit to finish")]
    Busy,
    #[error(transparent)]
    Commit(#[from] CommitError),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Owns the controller, the host's drawing surface and the commit in flight.
/// While a commit runs the session is `processing`: pointer input is ignored
/// and clearing, tool switches, re-applying and closing are refused.
pub struct EditorSession<S: DrawingSurface, N: Notifier> {
    image: ImageRef,
    controller: InteractionController,
    surface: S,
    api: Arc<dyn ImageApi>,
    notifier: N,
    commit: Option<InFlightCommit>,
}

struct InFlightCommit {
    worker: CommitWorker,
    create_copy: bool,
    shapes: usize,
}

impl<S: DrawingSurface, N: Notifier> EditorSession<S, N> {
    pub fn new(
        image: ImageRef,
        api: Arc<dyn ImageApi>,
        surface: S,
        notifier: N,
        style: ShapeStyle,
    ) -> Self {
        tracing::debug!(image_id = image.id, "editor session opened");
        Self {
            image,
            controller: InteractionController::new(style),
            surface,
            api,
            notifier,
            commit: None,
        }
    }

    /// Session talking to the configured HTTP service.
    pub fn from_config(config: &AppConfig, image: ImageRef, surface: S, notifier: N) -> Self {
        let api = HttpImageApi::new(config.api_base_url.clone(), config.request_timeout());
        Self::new(image, Arc::new(api), surface, notifier, config.default_style())
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn is_processing(&self) -> bool {
        self.commit.is_some()
    }

    /// The image finished loading: size the surface to its natural pixels.
    pub fn on_image_loaded(&mut self, bounds: ImageBounds) -> bool {
        self.surface.resize(bounds);
        self.redraw()
    }

    pub fn set_surface_mapping(&mut self, mapping: SurfaceMapping) {
        self.controller.set_surface_mapping(mapping);
    }

    pub fn redraw(&mut self) -> bool {
        self.controller.render(&mut self.surface)
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> PointerOutcome {
        if self.is_processing() {
            return PointerOutcome::Unchanged;
        }
        let outcome = self.controller.pointer_down(x, y);
        self.after(outcome)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> PointerOutcome {
        if self.is_processing() {
            return PointerOutcome::Unchanged;
        }
        let outcome = self.controller.pointer_move(x, y);
        self.after(outcome)
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> PointerOutcome {
        if self.is_processing() {
            return PointerOutcome::Unchanged;
        }
        let outcome = self.controller.pointer_up(x, y);
        self.after(outcome)
    }

    pub fn pointer_leave(&mut self) -> PointerOutcome {
        if self.is_processing() {
            return PointerOutcome::Unchanged;
        }
        let outcome = self.controller.pointer_leave();
        self.after(outcome)
    }

    /// Answer to a [`PointerOutcome::RequestText`]. Ignored while processing;
    /// starting a commit already withdrew the request.
    pub fn submit_text(&mut self, content: Option<&str>) -> PointerOutcome {
        if self.is_processing() {
            return PointerOutcome::Unchanged;
        }
        let outcome = self.controller.submit_text(content);
        self.after(outcome)
    }

    pub fn select_tool(&mut self, tool: ToolKind) -> SessionResult<()> {
        self.ensure_idle()?;
        let outcome = self.controller.select_tool(tool);
        self.after(outcome);
        Ok(())
    }

    pub fn set_mode(&mut self, mode: EditorMode) {
        let outcome = self.controller.set_mode(mode);
        self.after(outcome);
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.controller.set_style(style);
    }

    pub fn clear_canvas(&mut self) -> SessionResult<()> {
        self.ensure_idle()?;
        let outcome = self.controller.clear_canvas();
        self.after(outcome);
        Ok(())
    }

    /// Starts committing the current shapes. Local checks fail here, before
    /// any request is made; remote results arrive through [`Self::poll_commit`].
    pub fn apply(&mut self, create_copy: bool, credential: Option<&Credential>) -> SessionResult<()> {
        if self.is_processing() {
            return Err(CommitError::Busy.into());
        }
        if let Err(err) = CommitPipeline::validate(self.controller.shapes(), credential) {
            self.notifier.notify(NoticeLevel::Error, &err.to_string());
            return Err(err.into());
        }
        let credential = credential.cloned().ok_or(CommitError::MissingCredential)?;
        if self.controller.cancel_text_request() {
            tracing::debug!("pending text request dropped by apply");
        }
        let shapes = self.controller.shapes();

        tracing::info!(
            image_id = self.image.id,
            shapes = shapes.len(),
            create_copy,
            "applying drawings"
        );
        let pipeline = CommitPipeline::new(Arc::clone(&self.api), self.image.clone());
        let worker = CommitWorker::spawn(pipeline, shapes.to_vec(), create_copy, credential);
        self.commit = Some(InFlightCommit {
            worker,
            create_copy,
            shapes: shapes.len(),
        });
        Ok(())
    }

    /// Collects a finished commit, if any. Call on every UI tick while
    /// [`Self::is_processing`] is true.
    pub fn poll_commit(&mut self) -> Option<CommitOutcome> {
        let outcome = self.commit.as_ref()?.worker.try_result()?;
        if let Some(commit) = self.commit.take() {
            self.finish_commit(&commit, &outcome);
        }
        Some(outcome)
    }

    /// Blocks until the running commit finishes.
    pub fn wait_commit(&mut self) -> Option<CommitOutcome> {
        let commit = self.commit.take()?;
        let outcome = commit.worker.wait();
        self.finish_commit(&commit, &outcome);
        Some(outcome)
    }

    /// Closing mid-commit is refused.
    pub fn request_close(&self) -> SessionResult<()> {
        self.ensure_idle()
    }

    fn finish_commit(&mut self, commit: &InFlightCommit, outcome: &CommitOutcome) {
        match outcome {
            Ok(result) => {
                let filename = result
                    .new_image
                    .as_ref()
                    .map_or(result.original.filename.as_str(), |image| {
                        image.filename.as_str()
                    });
                self.notifier.notify(
                    NoticeLevel::Info,
                    &format!("Applied {} drawing(s). File: {filename}", result.applied),
                );
                if let Some(image) = &result.new_image {
                    self.image = image.clone();
                }
                let outcome = self.controller.clear_canvas();
                self.after(outcome);
            }
            Err(err) => {
                tracing::warn!(error = %err, applied = err.applied(), "commit failed");
                let message = self.settle_failed_commit(commit, err);
                self.notifier.notify(NoticeLevel::Error, &message);
            }
        }
    }

    /// Removes what the service already drew so a retry does not draw it
    /// twice, and describes what is left on the canvas.
    fn settle_failed_commit(&mut self, commit: &InFlightCommit, err: &CommitError) -> String {
        let applied = err.applied().min(commit.shapes);
        if applied == commit.shapes {
            let outcome = self.controller.clear_canvas();
            self.after(outcome);
            return format!(
                "Applied {applied} drawing(s), but the new image could not be identified: {err}. \
                 Refresh the gallery to find it."
            );
        }
        // A retry with a copy requested starts again from the original image,
        // so every shape is still needed there.
        if applied > 0 && !commit.create_copy {
            let outcome = self.controller.discard_applied(applied);
            self.after(outcome);
            let remaining = self.controller.shapes().len();
            return format!(
                "Failed to apply drawing: {err}. {applied} drawing(s) were already applied; \
                 the remaining {remaining} were kept."
            );
        }
        format!(
            "Failed to apply drawing: {err}. All {} drawing(s) were kept.",
            commit.shapes
        )
    }

    fn ensure_idle(&self) -> SessionResult<()> {
        if self.is_processing() {
            tracing::debug!("request refused while processing");
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    fn after(&mut self, outcome: PointerOutcome) -> PointerOutcome {
        if outcome == PointerOutcome::Redraw {
            self.redraw();
        }
        outcome
    }
}
