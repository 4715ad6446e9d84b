//! Remote image-processing contract and the commit pipeline that replays
//! authored shapes against it.

pub mod api;
pub mod http;
pub mod pipeline;
pub mod worker;

pub use api::{
    ApiError, ApplyResponse, ApplyShapeCommand, Credential, ImageApi, ImageRecord, ImageRef,
    ShapeGeometry,
};
pub use http::HttpImageApi;
pub use pipeline::{CommitError, CommitPipeline, CommitResult, RecoveryAction};
pub use worker::{CommitOutcome, CommitWorker, COMMIT_POLL_INTERVAL};
