//! Blocking HTTP client for the content service.

use std::{fmt, time::Duration};

use serde::de::DeserializeOwned;

use crate::{
    normalize_topic_key, subtopic_or_default, validate_generate, ContentError, ContentStore,
    GenerateRequest, GenerateResponse, PopularTopic, SaveRequest, SaveResponse, TopicContent,
};

/// Content store backed by the HTTP content service.
pub struct HttpContentStore {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpContentStore {
    /// Default timeout applied to every request.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a client for the service rooted at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// Root URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, payload: String) -> Result<T, ContentError> {
        let response = self
            .agent
            .post(&self.url(path))
            .header("Content-Type", "application/json")
            .send(payload.as_bytes())
            .map_err(classify)?;
        read_json(response)
    }
}

impl fmt::Debug for HttpContentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpContentStore")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn classify(error: ureq::Error) -> ContentError {
    match error {
        ureq::Error::StatusCode(429) => ContentError::RateLimited,
        ureq::Error::StatusCode(503) => ContentError::Unavailable,
        ureq::Error::StatusCode(status) => ContentError::Status(status),
        other => ContentError::Transport(other.to_string()),
    }
}

fn read_json<T: DeserializeOwned>(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<T, ContentError> {
    let body = response.body_mut().read_to_string().map_err(classify)?;
    serde_json::from_str(&body).map_err(|error| ContentError::Malformed(error.to_string()))
}

fn encode_path_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            encoded.push(c);
        } else {
            let mut buffer = [0_u8; 4];
            for byte in c.encode_utf8(&mut buffer).bytes() {
                encoded.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    encoded
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ContentError> {
    serde_json::to_string(value).map_err(|error| ContentError::Malformed(error.to_string()))
}

impl ContentStore for HttpContentStore {
    fn fetch(&self, topic: &str, subtopic: &str) -> Result<Option<TopicContent>, ContentError> {
        let key = normalize_topic_key(topic);
        let url = self.url(&format!("/content/{}", encode_path_segment(&key)));
        let response = self
            .agent
            .get(&url)
            .query("subtopic", subtopic_or_default(subtopic))
            .call()
            .map_err(classify)?;
        read_json(response)
    }

    fn save(&self, request: &SaveRequest) -> Result<u64, ContentError> {
        let reply: SaveResponse = self.post("/content", to_json(request)?)?;
        if reply.success {
            Ok(reply.id)
        } else {
            Err(ContentError::Malformed("save was not acknowledged".to_owned()))
        }
    }

    fn generate(&self, request: &GenerateRequest) -> Result<TopicContent, ContentError> {
        validate_generate(request)?;
        let reply: GenerateResponse = self.post("/generate", to_json(request)?)?;
        match reply {
            GenerateResponse {
                success: true,
                content: Some(content),
                ..
            } => Ok(content),
            _ => Err(ContentError::Malformed(
                "generation reply carried no content".to_owned(),
            )),
        }
    }

    fn popular_topics(&self, limit: usize) -> Result<Vec<PopularTopic>, ContentError> {
        let response = self
            .agent
            .get(&self.url("/popular-topics"))
            .call()
            .map_err(classify)?;
        let mut topics: Vec<PopularTopic> = read_json(response)?;
        topics.truncate(limit);
        Ok(topics)
    }
}
