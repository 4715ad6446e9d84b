use std::time::Duration;

use serde::Deserialize;

use super::api::{ApiError, ApplyResponse, ApplyShapeCommand, Credential, ImageApi, ImageRecord};

const USER_AGENT: &str = "gallery-annotator";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// [`ImageApi`] over the gallery backend's HTTP endpoints.
#[derive(Clone)]
pub struct HttpImageApi {
    agent: ureq::Agent,
    base_url: String,
}

impl std::fmt::Debug for HttpImageApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpImageApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn draw_url(&self, image_id: u64) -> String {
        format!("{}/image/{image_id}/draw", self.base_url)
    }

    fn images_url(&self) -> String {
        format!("{}/my-images", self.base_url)
    }
}

impl ImageApi for HttpImageApi {
    fn apply_shape(
        &self,
        credential: &Credential,
        image_id: u64,
        command: &ApplyShapeCommand,
    ) -> Result<ApplyResponse, ApiError> {
        let mut request = self
            .agent
            .post(&self.draw_url(image_id))
            .set("Authorization", &credential.bearer_header());
        for (name, value) in command.query_pairs() {
            request = request.query(name, &value);
        }
        tracing::debug!(image_id, shape = %command.shape_type, "posting draw command");

        let response = request.call().map_err(map_error)?;
        response
            .into_json::<ApplyResponse>()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    fn list_images(&self, credential: &Credential) -> Result<Vec<ImageRecord>, ApiError> {
        let response = self
            .agent
            .get(&self.images_url())
            .set("Authorization", &credential.bearer_header())
            .call()
            .map_err(map_error)?;
        response
            .into_json::<Vec<ImageRecord>>()
            .map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }
}

fn map_error(err: ureq::Error) -> ApiError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            status_error(status, &body)
        }
        ureq::Error::Transport(transport) => ApiError::Transport(transport.to_string()),
    }
}

/// Error for a non-2xx response. A 401 always means the credential is no
/// longer accepted, whatever the body says.
fn status_error(status: u16, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        _ => ApiError::Rejected {
            status,
            detail: error_detail(status, body),
        },
    }
}

/// Server-provided `detail`, or a generic message naming the status.
fn error_detail(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body).map(|body| body.detail) {
        Ok(serde_json::Value::String(detail)) if !detail.trim().is_empty() => detail,
        Ok(serde_json::Value::Null) | Ok(serde_json::Value::String(_)) | Err(_) => {
            format!("request failed with status {status}")
        }
        Ok(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_status_maps_to_credential_error() {
        assert_eq!(
            status_error(401, r#"{"detail": "Token expired"}"#),
            ApiError::Unauthorized
        );
        assert_eq!(status_error(401, ""), ApiError::Unauthorized);
    }

    #[test]
    fn other_statuses_are_rejections_carrying_detail() {
        assert_eq!(
            status_error(403, r#"{"detail": "Not your image"}"#),
            ApiError::Rejected {
                status: 403,
                detail: "Not your image".to_string(),
            }
        );
        assert_eq!(
            status_error(500, "oops"),
            ApiError::Rejected {
                status: 500,
                detail: "request failed with status 500".to_string(),
            }
        );
    }

    #[test]
    fn detail_string_is_surfaced_verbatim() {
        assert_eq!(
            error_detail(400, r#"{"detail": "Image not found"}"#),
            "Image not found"
        );
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let detail = error_detail(422, r#"{"detail": [{"loc": ["query", "start_x"]}]}"#);
        assert!(detail.contains("start_x"));
    }

    #[test]
    fn missing_detail_falls_back_to_generic_message() {
        assert_eq!(error_detail(500, "Internal Server Error"), "request failed with status 500");
        assert_eq!(error_detail(502, r#"{"detail": ""}"#), "request failed with status 502");
    }

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let api = HttpImageApi::new("http://localhost:8000/", Duration::from_secs(5));
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.draw_url(7), "http://localhost:8000/image/7/draw");
        assert_eq!(api.images_url(), "http://localhost:8000/my-images");
    }
}
