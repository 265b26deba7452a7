use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use thiserror::Error;
use tracing::debug;

use super::extract::extract_passage;

pub const DEFAULT_ENDPOINT: &str = "https://bible.oremus.org/";

/// Class attribute of the element that wraps the passage on provider pages.
pub const PASSAGE_CONTAINER_CLASS: &str = "bibletext";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("passage request failed")]
    Http(#[from] reqwest::Error),

    #[error("passage provider returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("no passage text found for {reference}")]
    EmptyPassage { reference: String },
}

/// Anything that can turn a canonical reference into passage text.
pub trait PassageSource {
    fn fetch(&self, reference: &str) -> Result<String, FetchError>;
}

pub struct HttpPassageSource {
    client: Client,
    endpoint: String,
}

impl HttpPassageSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PassageSource for HttpPassageSource {
    fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        let reference = reference.trim_matches('\t');
        debug!(endpoint = %self.endpoint, reference, "requesting passage");

        let response = self
            .client
            .post(&self.endpoint)
            .form(&passage_form(reference))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: self.endpoint.clone(),
            });
        }

        let body = response.text()?;
        let passage = extract_passage(&body, PASSAGE_CONTAINER_CLASS);
        if passage.trim().is_empty() {
            return Err(FetchError::EmptyPassage {
                reference: reference.to_string(),
            });
        }

        debug!(reference, bytes = passage.len(), "passage extracted");
        Ok(passage)
    }
}

/// Form fields for a bare passage: no verse numbers, footnotes, headings,
/// or navigation.
fn passage_form(reference: &str) -> [(&'static str, &str); 7] {
    [
        ("passage", reference),
        ("vnum", "no"),
        ("fnote", "no"),
        ("heading", "no"),
        ("show_ref", "no"),
        ("show_adj", "no"),
        ("omithidden", "yes"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passage_form_requests_plain_text() {
        let form = passage_form("John 3:16");
        assert_eq!(form[0], ("passage", "John 3:16"));
        assert!(
            form[1..]
                .iter()
                .all(|(key, value)| *value == "no" || (*key == "omithidden" && *value == "yes"))
        );
    }

    #[test]
    fn http_source_keeps_its_endpoint() {
        let source = HttpPassageSource::new("http://localhost:9/", Duration::from_millis(50))
            .expect("client should build");
        assert_eq!(source.endpoint(), "http://localhost:9/");
    }
}
