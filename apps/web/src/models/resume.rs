use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder stored when the form omits the age field entirely.
pub const AGE_PLACEHOLDER: &str = "N/A";

fn default_age() -> String {
    AGE_PLACEHOLDER.to_string()
}

/// The five free-form inputs submitted through the résumé form.
///
/// Nothing is required or validated. A field that is present but empty stays empty;
/// only a missing `age` falls back to [`AGE_PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub education: String,
    #[serde(default = "default_age")]
    pub age: String,
}

/// Everything remembered about one browser session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Last submitted form, used to pre-fill the form on reload.
    pub fields: Option<ResumeFields>,
    /// Last cleaned generation, used by the preview and the PDF download.
    pub resume_text: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl SessionData {
    /// Cleaned text of the last generation, if one produced anything.
    pub fn resume_text(&self) -> Option<&str> {
        self.resume_text.as_deref().filter(|text| !text.is_empty())
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: std::time::Duration) -> bool {
        match (self.updated_at, chrono::Duration::from_std(ttl)) {
            (Some(updated_at), Ok(ttl)) => now - updated_at > ttl,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header::CONTENT_TYPE, Method, Request},
        Form,
    };

    /// Decodes a urlencoded body the same way the `/generate/` handler does.
    async fn parse_form(body: &str) -> ResumeFields {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/generate/")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        let Form(fields) = Form::<ResumeFields>::from_request(request, &())
            .await
            .unwrap();
        fields
    }

    #[tokio::test]
    async fn test_missing_age_uses_placeholder() {
        let fields = parse_form("name=Ada&skills=Rust").await;
        assert_eq!(fields.age, AGE_PLACEHOLDER);
        assert_eq!(fields.experience, "");
        assert_eq!(fields.education, "");
    }

    #[tokio::test]
    async fn test_empty_age_stays_empty() {
        let fields = parse_form("name=Ada&age=").await;
        assert_eq!(fields.age, "");
    }

    #[tokio::test]
    async fn test_form_values_are_url_decoded() {
        let fields = parse_form("name=Ada+Lovelace&skills=C%2B%2B%2C+Rust&education=%C3%89cole").await;
        assert_eq!(fields.name, "Ada Lovelace");
        assert_eq!(fields.skills, "C++, Rust");
        assert_eq!(fields.education, "École");
    }

    #[test]
    fn test_resume_text_ignores_empty_generation() {
        let data = SessionData {
            resume_text: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(data.resume_text(), None);
    }

    #[test]
    fn test_expiry_uses_last_update() {
        let now = Utc::now();
        let data = SessionData {
            updated_at: Some(now - chrono::Duration::seconds(120)),
            ..Default::default()
        };
        assert!(data.is_expired(now, std::time::Duration::from_secs(60)));
        assert!(!data.is_expired(now, std::time::Duration::from_secs(600)));
        assert!(!SessionData::default().is_expired(now, std::time::Duration::from_secs(1)));
    }
}
