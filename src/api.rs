//! HTTP client for the SkillStack backend
//!
//! One `ApiClient` is built from the configuration and handed to whatever
//! needs backend data; nothing here is global.

use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiError, Result, ValidationError};
use crate::models::{
    Event, NewEvent, NewSkill, Recommendation, Skill, SkillPatch, SummarizeRequest,
    SummarizeResponse,
};

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    #[serde(default)]
    deleted: bool,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== EVENTS =====

    /// `GET /events/`, optionally restricted to an inclusive date range
    pub async fn list_events(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<Event>> {
        let mut request = self.client.get(self.url("/events/"));

        if let Some((start, end)) = range {
            if start > end {
                return Err(ValidationError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                }
                .into());
            }
            request = request.query(&[
                ("start", start.format("%Y-%m-%d").to_string()),
                ("end", end.format("%Y-%m-%d").to_string()),
            ]);
        }

        let response = request.send().await.map_err(|e| self.connection_error(e))?;
        let events: Vec<Event> = Self::parse(response, "events").await?;

        tracing::info!(count = events.len(), "loaded events");
        Ok(events)
    }

    pub async fn create_event(&self, event: &NewEvent) -> Result<Event> {
        let response = self
            .client
            .post(self.url("/events/"))
            .json(event)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let created: Event = Self::parse(response, "event").await?;
        tracing::info!(id = %created.id, date = ?created.date, "created event");
        Ok(created)
    }

    pub async fn delete_event(&self, id: &str) -> Result<()> {
        self.delete(&format!("/events/{}", id), "event", id).await
    }

    // ===== SKILLS =====

    pub async fn list_skills(&self) -> Result<Vec<Skill>> {
        let response = self
            .client
            .get(self.url("/skills/"))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let skills: Vec<Skill> = Self::parse(response, "skills").await?;
        tracing::info!(count = skills.len(), "loaded skills");
        Ok(skills)
    }

    pub async fn create_skill(&self, skill: &NewSkill) -> Result<Skill> {
        skill.validate()?;

        let response = self
            .client
            .post(self.url("/skills/"))
            .json(skill)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let created: Skill = Self::parse(response, "skill").await?;
        tracing::info!(id = %created.id, name = %created.name, "created skill");
        Ok(created)
    }

    pub async fn update_skill(&self, id: &str, patch: &SkillPatch) -> Result<Skill> {
        patch.validate()?;

        let response = self
            .client
            .patch(self.url(&format!("/skills/{}", id)))
            .json(patch)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let updated: Skill = Self::parse(response, &format!("skill {}", id)).await?;
        tracing::info!(id = %updated.id, "updated skill");
        Ok(updated)
    }

    pub async fn delete_skill(&self, id: &str) -> Result<()> {
        self.delete(&format!("/skills/{}", id), "skill", id).await
    }

    // ===== AI =====

    /// `GET /ai/recommend/?q=..&top_k=..`
    pub async fn recommend(&self, query: &str, top_k: u32) -> Result<Vec<Recommendation>> {
        let response = self
            .client
            .get(self.url("/ai/recommend/"))
            .query(&[("q", query.to_string()), ("top_k", top_k.to_string())])
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        Self::parse(response, "recommendations").await
    }

    /// `POST /ai/summarize/`; `None` when the backend had nothing to say
    pub async fn summarize(
        &self,
        text: &str,
        max_sentences: u32,
        use_openai: bool,
    ) -> Result<Option<String>> {
        let body = SummarizeRequest {
            text: text.to_string(),
            max_sentences,
            use_openai,
        };

        let response = self
            .client
            .post(self.url("/ai/summarize/"))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let summary: SummarizeResponse = Self::parse(response, "summary").await?;
        Ok(summary.summary.filter(|s| !s.trim().is_empty()))
    }

    // ===== HELPERS =====

    async fn delete(&self, path: &str, kind: &str, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| self.connection_error(e))?;

        let result: DeleteResponse = Self::parse(response, &format!("{} {}", kind, id)).await?;
        if !result.deleted {
            tracing::warn!(kind, id, "backend did not confirm deletion");
        }

        tracing::info!(kind, id, "deleted");
        Ok(())
    }

    async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        let status = response.status();
        let body = response.text().await.map_err(ApiError::NetworkError)?;

        if status == StatusCode::NOT_FOUND {
            tracing::warn!(what, "backend returned 404");
            return Err(ApiError::NotFound(what.to_string()).into());
        }

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), what, "backend request failed");
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body: preview(&body),
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!("failed to parse {}: {}", what, e)).into()
        })
    }

    fn connection_error(&self, err: reqwest::Error) -> crate::error::SkillStackError {
        if err.is_connect() || err.is_timeout() {
            tracing::warn!(url = %self.base_url, "backend unreachable");
            ApiError::ConnectionFailed {
                url: self.base_url.clone(),
                reason: err.to_string(),
            }
            .into()
        } else {
            ApiError::NetworkError(err).into()
        }
    }
}

fn preview(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalized() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/events/"), "http://localhost:8000/events/");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short"), "short");

        let long = "é".repeat(250);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
    }

    /// Serve one canned HTTP response on a local port and return its base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_list_events_404_is_not_found() {
        let url = serve_once("404 Not Found", r#"{"detail":"Not Found"}"#).await;
        let client = ApiClient::new(&url);

        let err = client.list_events(None).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::SkillStackError::Api(ApiError::NotFound(ref what)) if what == "events"
        ));
    }

    #[tokio::test]
    async fn test_create_event_404_is_not_found() {
        let url = serve_once("404 Not Found", "{}").await;
        let client = ApiClient::new(&url);
        let day = NaiveDate::from_ymd_opt(2024, 1, 12).unwrap();
        let event = NewEvent::new("Scales", day, None, None, None).unwrap();

        let err = client.create_event(&event).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::SkillStackError::Api(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_404_names_the_record() {
        let url = serve_once("404 Not Found", "{}").await;
        let client = ApiClient::new(&url);

        let err = client.delete_skill("42").await.unwrap_err();
        assert_eq!(err.to_string(), "API error: Not found: skill 42");
    }

    #[tokio::test]
    async fn test_server_error_is_request_failed() {
        let url = serve_once("500 Internal Server Error", "boom").await;
        let client = ApiClient::new(&url);

        let err = client.list_skills().await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::SkillStackError::Api(ApiError::RequestFailed { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_events_parsed_from_backend() {
        let url = serve_once(
            "200 OK",
            r#"[{"id": 1, "date": "2024-01-10", "title": "Scales", "duration_minutes": 20}]"#,
        )
        .await;
        let client = ApiClient::new(&url);

        let events = client.list_events(None).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "1");
    }

    #[tokio::test]
    async fn test_invalid_range_rejected_before_request() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let err = client.list_events(Some((start, end))).await.unwrap_err();
        assert!(err.to_string().contains("Invalid date range"));
    }

    #[tokio::test]
    async fn test_invalid_skill_rejected_before_request() {
        let client = ApiClient::new("http://127.0.0.1:9");
        let err = client.create_skill(&NewSkill::default()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::SkillStackError::Validation(ValidationError::EmptySkillName)
        ));
    }
}
