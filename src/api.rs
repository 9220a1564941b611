//! Narrow request/response contracts for the external collaborators:
//! the summarization service, the resume persistence backend, and the
//! payment verification endpoint.
//!
//! Only the wire types live on every target; the fetch glue is wasm-only.
//! Every transport or non-2xx failure collapses into one generic
//! [`ApiError`] — callers retry, they do not branch on causes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Input to `POST /api/summarize`: the draft's skills, comma-joined.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummarizeRequest {
    pub skills: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Response of `POST /api/resumes`: an opaque identifier used later for
/// payment status checks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SaveResumeResponse {
    pub id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerifyPaymentRequest {
    pub reference: String,
}

/// `paid == true` authorizes unlocking the PDF export.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VerifyPaymentResponse {
    pub paid: bool,
}

/// One generic failure condition for all collaborator calls.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError(pub String);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// localStorage key the identity provider's bearer token is stored under.
/// The token is opaque here: never decoded, only forwarded.
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[cfg(target_arch = "wasm32")]
mod fetch {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::*;

    /// Development default; deployments serve the API from the same origin.
    const DEV_API_BASE: &str = "http://localhost:5000";

    fn api_base() -> String {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| DEV_API_BASE.to_string())
    }

    /// The bearer token left behind by the external login flow, if any.
    pub fn auth_token() -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(AUTH_TOKEN_KEY).ok()?
    }

    fn js_err(context: &str, e: JsValue) -> ApiError {
        ApiError(format!("{context}: {e:?}"))
    }

    async fn post_json(path: &str, body: String, bearer: Option<&str>) -> Result<String, ApiError> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&JsValue::from_str(&body));

        let url = format!("{}{}", api_base(), path);
        let request =
            Request::new_with_str_and_init(&url, &opts).map_err(|e| js_err("bad request", e))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| js_err("headers", e))?;
        if let Some(token) = bearer {
            request
                .headers()
                .set("Authorization", &format!("Bearer {token}"))
                .map_err(|e| js_err("headers", e))?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| js_err("network error", e))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|e| js_err("unexpected fetch result", e))?;

        if !resp.ok() {
            return Err(ApiError(format!("request failed with status {}", resp.status())));
        }

        let text_promise = resp.text().map_err(|e| js_err("read body", e))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| js_err("read body", e))?;
        text.as_string()
            .ok_or_else(|| ApiError("response body was not text".into()))
    }

    /// `POST /api/summarize` — turn the joined skills string into a summary.
    pub async fn summarize(request: &SummarizeRequest) -> Result<SummarizeResponse, ApiError> {
        let body = serde_json::to_string(request).map_err(|e| ApiError(e.to_string()))?;
        let json = post_json("/api/summarize", body, None).await?;
        serde_json::from_str(&json).map_err(|e| ApiError(format!("bad summarize response: {e}")))
    }

    /// `POST /api/resumes` — persist the finished draft for the logged-in
    /// user. Requires a bearer token.
    pub async fn save_resume(
        draft: &crate::form::state::ResumeDraft,
        token: &str,
    ) -> Result<SaveResumeResponse, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError(e.to_string()))?;
        let json = post_json("/api/resumes", body, Some(token)).await?;
        serde_json::from_str(&json).map_err(|e| ApiError(format!("bad save response: {e}")))
    }

    /// `POST /api/payments/verify` — ask the backend whether the checkout
    /// reference was actually paid.
    pub async fn verify_payment(
        request: &VerifyPaymentRequest,
        token: &str,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        let body = serde_json::to_string(request).map_err(|e| ApiError(e.to_string()))?;
        let json = post_json("/api/payments/verify", body, Some(token)).await?;
        serde_json::from_str(&json).map_err(|e| ApiError(format!("bad verify response: {e}")))
    }
}

#[cfg(target_arch = "wasm32")]
pub use fetch::{auth_token, save_resume, summarize, verify_payment};
