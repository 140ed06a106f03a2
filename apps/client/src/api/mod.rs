//! HTTP client for the NAVIQ API.
//!
//! Every method is exactly one request: no retries, no caching, no timeout.
//! A non-2xx status becomes `ApiError::Status` carrying the server's `error`
//! message, or `HTTP error! status: <code>` when the body has none.

pub mod types;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use self::types::{
    Ack, Health, InsightCategory, InsightGroups, InsightInput, Insight, InterviewQuestion,
    QuestionInput, Roadmap, RoadmapGoal, Role, RoleInput, StudyTopic, StudyTopicInput,
};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Text(String),
    Detailed { message: String },
}

/// Message for a failed response: the body's `error` field when there is one.
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            error: ErrorField::Text(message),
        })
        | Ok(ErrorBody {
            error: ErrorField::Detailed { message },
        }) if !message.trim().is_empty() => message,
        _ => format!("HTTP error! status: {status}"),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(status.as_u16(), &body);
            warn!("{url} returned {status}: {message}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        debug!("{url} returned {status} ({} bytes)", body.len());
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.client.get(self.endpoint_url(path))).await
    }

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.get("/health").await
    }

    // ── Roles ────────────────────────────────────

    pub async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        self.get("/api/roles").await
    }

    pub async fn role(&self, id: i64) -> Result<Role, ApiError> {
        self.get(&format!("/api/roles/{id}")).await
    }

    pub async fn create_role(&self, input: &RoleInput) -> Result<Ack, ApiError> {
        self.send(self.client.post(self.endpoint_url("/api/roles")).json(input))
            .await
    }

    pub async fn update_role(&self, id: i64, input: &RoleInput) -> Result<Ack, ApiError> {
        self.send(self.client.put(self.endpoint_url(&format!("/api/roles/{id}"))).json(input))
            .await
    }

    pub async fn delete_role(&self, id: i64) -> Result<Ack, ApiError> {
        self.send(self.client.delete(self.endpoint_url(&format!("/api/roles/{id}"))))
            .await
    }

    // ── Interview questions ──────────────────────

    pub async fn interview_questions(&self, role: &str) -> Result<Vec<InterviewQuestion>, ApiError> {
        self.get(&format!("/api/interview?role={}", urlencoding::encode(role)))
            .await
    }

    pub async fn create_question(&self, input: &QuestionInput) -> Result<Ack, ApiError> {
        self.send(self.client.post(self.endpoint_url("/api/interview")).json(input))
            .await
    }

    pub async fn update_question(&self, id: i64, input: &QuestionInput) -> Result<Ack, ApiError> {
        self.send(
            self.client
                .put(self.endpoint_url(&format!("/api/interview/{id}")))
                .json(input),
        )
        .await
    }

    pub async fn delete_question(&self, id: i64) -> Result<Ack, ApiError> {
        self.send(self.client.delete(self.endpoint_url(&format!("/api/interview/{id}"))))
            .await
    }

    // ── Roadmaps ─────────────────────────────────

    pub async fn roadmap(&self, goal: &str, days: u32) -> Result<Roadmap, ApiError> {
        self.get(&format!(
            "/api/roadmap?goal={}&days={days}",
            urlencoding::encode(goal)
        ))
        .await
    }

    pub async fn roadmap_goals(&self) -> Result<Vec<RoadmapGoal>, ApiError> {
        self.get("/api/roadmap/goals").await
    }

    // ── Study ────────────────────────────────────

    pub async fn study_topics(&self) -> Result<Vec<StudyTopic>, ApiError> {
        self.get("/api/study").await
    }

    pub async fn create_study_topic(&self, input: &StudyTopicInput) -> Result<Ack, ApiError> {
        self.send(self.client.post(self.endpoint_url("/api/study")).json(input))
            .await
    }

    pub async fn delete_study_topic(&self, id: i64) -> Result<Ack, ApiError> {
        self.send(self.client.delete(self.endpoint_url(&format!("/api/study/{id}"))))
            .await
    }

    // ── Insights ─────────────────────────────────

    pub async fn insights(&self) -> Result<InsightGroups, ApiError> {
        self.get("/api/insights").await
    }

    pub async fn insights_in(&self, category: InsightCategory) -> Result<Vec<Insight>, ApiError> {
        self.get(&format!("/api/insights?category={category}")).await
    }

    pub async fn create_insight(&self, input: &InsightInput) -> Result<Ack, ApiError> {
        self.send(self.client.post(self.endpoint_url("/api/insights")).json(input))
            .await
    }

    pub async fn update_insight(&self, id: i64, input: &InsightInput) -> Result<Ack, ApiError> {
        self.send(
            self.client
                .put(self.endpoint_url(&format!("/api/insights/{id}")))
                .json(input),
        )
        .await
    }

    pub async fn delete_insight(&self, id: i64) -> Result<Ack, ApiError> {
        self.send(self.client.delete(self.endpoint_url(&format!("/api/insights/{id}"))))
            .await
    }
}

/// The reads the page runtime needs. `ApiClient` is the real implementation;
/// tests drive the runtime with an in-memory one.
#[async_trait]
pub trait CareerApi: Send + Sync {
    async fn roles(&self) -> Result<Vec<Role>, ApiError>;
    async fn interview_questions(&self, role: &str) -> Result<Vec<InterviewQuestion>, ApiError>;
    async fn roadmap_goals(&self) -> Result<Vec<RoadmapGoal>, ApiError>;
    async fn roadmap(&self, goal: &str, days: u32) -> Result<Roadmap, ApiError>;
    async fn study_topics(&self) -> Result<Vec<StudyTopic>, ApiError>;
    async fn insights(&self) -> Result<InsightGroups, ApiError>;
}

#[async_trait]
impl CareerApi for ApiClient {
    async fn roles(&self) -> Result<Vec<Role>, ApiError> {
        ApiClient::roles(self).await
    }

    async fn interview_questions(&self, role: &str) -> Result<Vec<InterviewQuestion>, ApiError> {
        ApiClient::interview_questions(self, role).await
    }

    async fn roadmap_goals(&self) -> Result<Vec<RoadmapGoal>, ApiError> {
        ApiClient::roadmap_goals(self).await
    }

    async fn roadmap(&self, goal: &str, days: u32) -> Result<Roadmap, ApiError> {
        ApiClient::roadmap(self, goal, days).await
    }

    async fn study_topics(&self) -> Result<Vec<StudyTopic>, ApiError> {
        ApiClient::study_topics(self).await
    }

    async fn insights(&self) -> Result<InsightGroups, ApiError> {
        ApiClient::insights(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, RawQuery},
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn serve(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        ApiClient::new(format!("http://{addr}/"))
    }

    fn mock_router() -> Router {
        Router::new()
            .route(
                "/api/roles",
                get(|| async {
                    Json(json!([{"id": 1, "name": "Cloud Architect", "icon": "cloud", "color": "#000"}]))
                })
                .post(|Json(body): Json<Value>| async move {
                    if body.get("name").is_none() {
                        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Name is required"})));
                    }
                    (StatusCode::CREATED, Json(json!({"id": 11, "message": "Role created successfully"})))
                }),
            )
            .route(
                "/api/roles/:id",
                get(|Path(id): Path<i64>| async move {
                    (
                        StatusCode::NOT_FOUND,
                        Json(json!({"error": format!("Role {id} not found"), "code": "NOT_FOUND"})),
                    )
                }),
            )
            .route(
                "/api/roadmap",
                get(|RawQuery(query): RawQuery| async move {
                    Json(json!({
                        "goal": query.unwrap_or_default(),
                        "days": 30,
                        "overview": "",
                        "milestones": [
                            {"title": "A", "duration": "Days 1-15", "startDay": 1, "endDay": 15},
                            {"title": "B", "duration": "Days 16-30", "startDay": 16, "endDay": 30}
                        ],
                        "weeks": []
                    }))
                }),
            )
            .route(
                "/api/interview",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route(
                "/api/insights",
                get(|RawQuery(query): RawQuery| async move {
                    if query.as_deref() == Some("category=market") {
                        return (
                            StatusCode::OK,
                            Json(json!([
                                {"id": 5, "label": "Open roles", "value": "1.2k", "meta": "this month"},
                                {"id": 6, "label": "Median salary"}
                            ])),
                        );
                    }
                    (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": {"message": "Maintenance"}})))
                }),
            )
            .route("/api/study", post(|| async { "not json" }))
    }

    #[test]
    fn test_error_message_prefers_body_field() {
        assert_eq!(error_message(404, r#"{"error": "Role not found"}"#), "Role not found");
        assert_eq!(
            error_message(502, r#"{"error": {"message": "Gateway down"}}"#),
            "Gateway down"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(500, "<html>oops</html>"), "HTTP error! status: 500");
        assert_eq!(error_message(503, r#"{"detail": "x"}"#), "HTTP error! status: 503");
        assert_eq!(error_message(400, r#"{"error": ""}"#), "HTTP error! status: 400");
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.endpoint_url("/health"), "http://localhost:5000/health");
    }

    #[tokio::test]
    async fn test_roles_round_trip_through_http() {
        let client = serve(mock_router()).await;
        let roles = client.roles().await.unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].name, "Cloud Architect");
    }

    #[tokio::test]
    async fn test_roadmap_query_is_percent_encoded() {
        let client = serve(mock_router()).await;
        let roadmap = client.roadmap("Cloud Architect", 30).await.unwrap();
        // The mock echoes the raw query string back as the goal.
        assert_eq!(roadmap.goal, "goal=Cloud%20Architect&days=30");
        assert_eq!(roadmap.milestones.len(), 2);
    }

    #[tokio::test]
    async fn test_status_error_uses_error_field() {
        let client = serve(mock_router()).await;
        let err = client.role(7).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Role 7 not found");
    }

    #[tokio::test]
    async fn test_status_error_without_json_body() {
        let client = serve(mock_router()).await;
        let err = client.interview_questions("Web Developer").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn test_nested_error_message() {
        let client = serve(mock_router()).await;
        let err = client.insights().await.unwrap_err();
        assert_eq!(err.to_string(), "Maintenance");
    }

    #[tokio::test]
    async fn test_insights_in_category_is_a_flat_list() {
        let client = serve(mock_router()).await;
        let market = client.insights_in(InsightCategory::Market).await.unwrap();
        assert_eq!(market.len(), 2);
        assert_eq!(market[0].label, "Open roles");
        assert_eq!(market[0].value, "1.2k");
        assert_eq!(market[1].meta, "");

        let err = client.insights_in(InsightCategory::Velocity).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_post_sends_json_and_reads_ack() {
        let client = serve(mock_router()).await;
        let ack = client
            .create_role(&RoleInput {
                name: Some("SRE".into()),
                ..RoleInput::default()
            })
            .await
            .unwrap();
        assert_eq!(ack.id, Some(11));

        let err = client.create_role(&RoleInput::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }

    #[tokio::test]
    async fn test_success_with_bad_body_is_decode_error() {
        let client = serve(mock_router()).await;
        let err = client
            .create_study_topic(&StudyTopicInput {
                title: "Rust".into(),
                ..StudyTopicInput::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(format!("http://{addr}"));
        let err = client.health().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
