use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::model::{
    ClientConfig, DecisionPayload, InboxItem, LetterMetadata, QrDecisionPayload, RequestDetail,
    RequestSummary,
};

use super::error::ApiError;

/// The backend operations the inbox needs. One request per call: no retry,
/// no timeout, no queueing.
pub trait InboxApi: Send + Sync {
    /// `GET /approvalrequests/inbox`
    fn fetch_inbox(&self) -> Result<Vec<InboxItem>, ApiError>;

    /// `PUT /approvalrequests/{id}/approve`
    fn submit_decision(
        &self,
        approval_request_id: u64,
        payload: &DecisionPayload,
    ) -> Result<(), ApiError>;

    /// `GET /Barcode/generate-qr?flowId={id}`, raw PNG bytes
    fn fetch_qr(&self, flow_id: u64) -> Result<Vec<u8>, ApiError>;

    /// `GET /approvalrequests/{id}`
    fn fetch_detail(&self, approval_request_id: u64) -> Result<RequestDetail, ApiError>;

    /// `POST /approvalrequests/approval-via-qr`
    fn submit_qr_decision(&self, payload: &QrDecisionPayload) -> Result<(), ApiError>;
}

/// Blocking HTTP implementation of [`InboxApi`]
#[derive(Debug, Clone)]
pub struct HttpInboxApi {
    http: Client,
    base_url: String,
}

impl HttpInboxApi {
    /// Build a client for the configured server. The bearer header is fixed
    /// at construction; a credential changed on disk needs a new client.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        if let Some(token) = config.credentials.bearer() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        // No deadline; the blocking client would otherwise default to 30s
        let http = Client::builder()
            .default_headers(headers)
            .timeout(None::<Duration>)
            .build()?;

        Ok(HttpInboxApi {
            http,
            base_url: config.server.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send and map non-2xx into [`ApiError::Status`]
    fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        tracing::debug!(path, "sending request");
        let response = request.send().map_err(|e| {
            tracing::warn!(path, error = %e, "request failed without response");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_else(|e| {
            tracing::debug!(path, error = %e, "could not read error body");
            String::new()
        });
        tracing::warn!(path, status = status.as_u16(), "backend rejected request");
        Err(ApiError::Status {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }

    /// Raw body of a GET, for binary downloads
    fn get_bytes(&self, path: &str, accept: &'static str) -> Result<Vec<u8>, ApiError> {
        let request = self.http.get(self.url(path)).header(header::ACCEPT, accept);
        let bytes = self.send(request, path)?.bytes()?;
        tracing::debug!(path, size = bytes.len(), "downloaded");
        Ok(bytes.to_vec())
    }

    /// `GET /approvalrequests`: every request visible to the caller
    pub fn fetch_requests(&self) -> Result<Vec<RequestSummary>, ApiError> {
        self.get_json("approvalrequests")
    }

    /// `GET /letters/metadata/{id}`
    pub fn fetch_letter_metadata(
        &self,
        approval_request_id: u64,
    ) -> Result<LetterMetadata, ApiError> {
        self.get_json(&format!("letters/metadata/{}", approval_request_id))
    }

    /// `GET /letters/{id}/download`, the approval letter PDF
    pub fn download_letter(&self, approval_request_id: u64) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(
            &format!("letters/{}/download", approval_request_id),
            "application/pdf",
        )
    }

    /// `GET /Attachments/{id}/download`
    pub fn download_attachment(&self, attachment_id: u64) -> Result<Vec<u8>, ApiError> {
        self.get_bytes(
            &format!("Attachments/{}/download", attachment_id),
            "application/octet-stream",
        )
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path)), path)?;
        let bytes = response.bytes()?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }
}

impl InboxApi for HttpInboxApi {
    fn fetch_inbox(&self) -> Result<Vec<InboxItem>, ApiError> {
        let items: Vec<InboxItem> = self.get_json("approvalrequests/inbox")?;
        tracing::info!(count = items.len(), "fetched inbox");
        Ok(items)
    }

    fn submit_decision(
        &self,
        approval_request_id: u64,
        payload: &DecisionPayload,
    ) -> Result<(), ApiError> {
        let path = format!("approvalrequests/{}/approve", approval_request_id);
        // Body is either empty or the updated request; neither is needed
        self.send(self.http.put(self.url(&path)).json(payload), &path)?;
        tracing::info!(
            approval_request_id,
            status = payload.status.label(),
            "decision accepted"
        );
        Ok(())
    }

    fn fetch_qr(&self, flow_id: u64) -> Result<Vec<u8>, ApiError> {
        let path = "Barcode/generate-qr";
        let request = self
            .http
            .get(self.url(path))
            .query(&[("flowId", flow_id)])
            .header(header::ACCEPT, "image/png");
        let response = self.send(request, path)?;
        let bytes = response.bytes()?;
        tracing::debug!(flow_id, size = bytes.len(), "fetched qr image");
        Ok(bytes.to_vec())
    }

    fn fetch_detail(&self, approval_request_id: u64) -> Result<RequestDetail, ApiError> {
        self.get_json(&format!("approvalrequests/{}", approval_request_id))
    }

    fn submit_qr_decision(&self, payload: &QrDecisionPayload) -> Result<(), ApiError> {
        let path = "approvalrequests/approval-via-qr";
        self.send(self.http.post(self.url(path)).json(payload), path)?;
        tracing::info!(flow_id = payload.flow_id, "qr decision accepted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(base_url: &str, token: Option<&str>) -> ClientConfig {
        let mut config = ClientConfig::default();
        config.server.base_url = base_url.to_string();
        config.credentials.token = token.map(str::to_string);
        config
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let api = HttpInboxApi::new(&config_with("http://host/api/", None)).unwrap();
        assert_eq!(api.base_url(), "http://host/api");
        assert_eq!(
            api.url("/approvalrequests/inbox"),
            "http://host/api/approvalrequests/inbox"
        );
        assert_eq!(api.url("Barcode/generate-qr"), "http://host/api/Barcode/generate-qr");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = HttpInboxApi::new(&config_with("http://host", Some("abc\ndef"))).unwrap_err();
        assert!(matches!(err, ApiError::InvalidCredential(_)));
    }
}
