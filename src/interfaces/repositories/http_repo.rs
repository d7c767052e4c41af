use crate::infrastructure::http::ApiClient;

/// Repository backed by the ULINK REST API.
#[derive(Clone)]
pub struct HttpRepo {
    pub client: ApiClient,
}

impl HttpRepo {
    pub fn new(client: ApiClient) -> Self {
        HttpRepo { client }
    }
}

/// Percent-encodes a single path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}
