use reqwest::{RequestBuilder, StatusCode};

use crate::errors::AppError;
use crate::infrastructure::storage::SessionStore;

/// Whether a request runs under the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Login, registration and password reset: no token is attached and a
    /// 401 is an ordinary failure.
    Public,
    Authenticated,
}

/// Applied around every request sent by the API client.
///
/// Attaches `Authorization: Bearer <token>` while a token is stored, and ends
/// the session when the backend answers 401 to an authenticated call.
#[derive(Clone)]
pub struct SessionPolicy {
    session: SessionStore,
}

impl SessionPolicy {
    pub fn new(session: SessionStore) -> Self {
        SessionPolicy { session }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn authorize(&self, request: RequestBuilder, access: Access) -> RequestBuilder {
        if access == Access::Public {
            return request;
        }
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => {
                tracing::debug!("No session token, sending request without Authorization");
                request
            }
        }
    }

    pub fn inspect(&self, status: StatusCode, access: Access) -> Result<(), AppError> {
        if access == Access::Authenticated && status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected the session token, clearing session");
            self.session.clear();
            return Err(AppError::SessionExpired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::infrastructure::storage::MemoryStore;

    fn policy() -> SessionPolicy {
        let session = SessionStore::new(Arc::new(MemoryStore::new()), chrono::Duration::days(7));
        session.start("tok", "1").unwrap();
        SessionPolicy::new(session)
    }

    fn auth_header(request: RequestBuilder) -> Option<String> {
        let request = request.build().unwrap();
        request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[test]
    fn attaches_bearer_only_to_authenticated_requests() {
        let policy = policy();
        let client = reqwest::Client::new();

        let authed = policy.authorize(client.get("http://localhost/x"), Access::Authenticated);
        assert_eq!(auth_header(authed).as_deref(), Some("Bearer tok"));

        let public = policy.authorize(client.get("http://localhost/x"), Access::Public);
        assert_eq!(auth_header(public), None);
    }

    #[test]
    fn unauthorized_clears_session() {
        let policy = policy();

        assert!(policy.inspect(StatusCode::BAD_REQUEST, Access::Authenticated).is_ok());
        assert!(policy.session().is_authenticated());

        assert!(policy.inspect(StatusCode::UNAUTHORIZED, Access::Public).is_ok());
        assert!(policy.session().is_authenticated());

        let err = policy.inspect(StatusCode::UNAUTHORIZED, Access::Authenticated).unwrap_err();
        assert!(err.is_session_expired());
        assert!(!policy.session().is_authenticated());
        assert_eq!(policy.session().uid(), None);
    }
}
