use std::time::Duration;

use reqwest::{multipart, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::errors::AppError;
use crate::infrastructure::storage::SessionStore;
use crate::infrastructure::utils::image::ProfilePhoto;
use crate::infrastructure::utils::wire::error_message;
use crate::interfaces::middlewares::session::{Access, SessionPolicy};

/// Thin JSON client for the ULINK backend.
///
/// Every request passes through the [`SessionPolicy`]; no request is retried.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    policy: SessionPolicy,
}

impl ApiClient {
    pub fn new(base_url: Url, timeout: Duration, session: SessionStore) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(ApiClient {
            http,
            base_url: with_trailing_slash(base_url),
            policy: SessionPolicy::new(session),
        })
    }

    pub fn session(&self) -> &SessionStore {
        self.policy.session()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::InvalidInput(format!("Invalid request path {}: {}", path, e)))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, access: Access) -> Result<T, AppError> {
        let request = self.request(Method::GET, path)?;
        let response = self.execute(request, access).await?;
        decode(response).await
    }

    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B, access: Access) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path)?.json(body);
        let response = self.execute(request, access).await?;
        decode(response).await
    }

    /// Sends a request whose success body carries nothing the caller needs.
    pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>, access: Access) -> Result<(), AppError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.request(method, path)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(request, access).await.map(|_| ())
    }

    /// Multipart upload with the photo in the `file` part.
    pub async fn upload<T: DeserializeOwned>(&self, path: &str, photo: &ProfilePhoto, access: Access) -> Result<T, AppError> {
        let part = multipart::Part::bytes(photo.bytes.clone())
            .file_name(photo.file_name.clone())
            .mime_str(photo.mime_type)?;
        let form = multipart::Form::new().part("file", part);

        let request = self.request(Method::POST, path)?.multipart(form);
        let response = self.execute(request, access).await?;
        decode(response).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let url = self.url(path)?;
        Ok(self.http.request(method, url))
    }

    async fn execute(&self, request: RequestBuilder, access: Access) -> Result<Response, AppError> {
        let request = self.policy.authorize(request, access).build()?;
        tracing::debug!(method = %request.method(), path = %request.url().path(), "Sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        self.policy.inspect(status, access)?;

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| error_message(&value));
        tracing::debug!(status = status.as_u16(), ?message, "Request failed");

        Err(AppError::Request {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidResponse(e.to_string()))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
