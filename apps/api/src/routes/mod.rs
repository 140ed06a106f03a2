pub mod health;

use axum::{
    routing::{get, put},
    Router,
};

use crate::insights::handlers as insights;
use crate::interview::handlers as interview;
use crate::roadmap::handlers as roadmap;
use crate::roles::handlers as roles;
use crate::state::AppState;
use crate::study::handlers as study;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Roles
        .route("/api/roles", get(roles::handle_list_roles).post(roles::handle_create_role))
        .route(
            "/api/roles/:id",
            get(roles::handle_get_role)
                .put(roles::handle_update_role)
                .delete(roles::handle_delete_role),
        )
        // Interview questions
        .route(
            "/api/interview",
            get(interview::handle_questions_for_role).post(interview::handle_create_question),
        )
        .route(
            "/api/interview/:id",
            put(interview::handle_update_question).delete(interview::handle_delete_question),
        )
        .route("/api/interview/role/:id", get(interview::handle_questions_by_role_id))
        // Roadmaps
        .route("/api/roadmap", get(roadmap::handle_roadmap))
        .route("/api/roadmap/goals", get(roadmap::handle_goals))
        // Study
        .route("/api/study", get(study::handle_list_topics).post(study::handle_create_topic))
        .route("/api/study/:id", axum::routing::delete(study::handle_delete_topic))
        // Insights
        .route(
            "/api/insights",
            get(insights::handle_insights).post(insights::handle_create_insight),
        )
        .route(
            "/api/insights/:id",
            put(insights::handle_update_insight).delete(insights::handle_delete_insight),
        )
        // Legacy paths still used by older front-ends
        .route("/interview", get(interview::handle_questions_for_role))
        .route("/roadmap", get(roadmap::handle_roadmap))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seeded_memory_pool;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> Router {
        build_router(AppState {
            db: seeded_memory_pool().await,
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_list_roles() {
        let app = app().await;
        let (status, body) = get_json(&app, "/api/roles").await;
        assert_eq!(status, StatusCode::OK);
        let roles = body.as_array().unwrap();
        assert_eq!(roles.len(), 10);
        assert!(roles[0]["id"].is_i64());
        assert!(roles[0]["color"].as_str().unwrap().starts_with('#'));
    }

    #[tokio::test]
    async fn test_interview_requires_role() {
        let app = app().await;
        let (status, body) = get_json(&app, "/api/interview").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Role parameter is required");
    }

    #[tokio::test]
    async fn test_interview_cards_use_camel_case() {
        let app = app().await;
        let (status, body) = get_json(&app, "/api/interview?role=Python%20Developer").await;
        assert_eq!(status, StatusCode::OK);
        let cards = body.as_array().unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0]["difficulty"], "Intermediate");
        assert!(cards.iter().any(|c| c.get("followUp").is_some()));
    }

    #[tokio::test]
    async fn test_legacy_interview_path() {
        let app = app().await;
        let (status, body) = get_json(&app, "/interview?role=Web%20Developer").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cloud_architect_roadmap_over_thirty_days() {
        let app = app().await;
        let (status, body) = get_json(&app, "/api/roadmap?goal=Cloud%20Architect&days=30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["goal"], "Cloud Architect");
        assert_eq!(body["days"], 30);

        let milestones = body["milestones"].as_array().unwrap();
        assert_eq!(milestones.len(), 4);
        assert_eq!(milestones[0]["duration"], "Days 1-7");
        assert_eq!(milestones[3]["duration"], "Days 22-30");
        assert_eq!(milestones[3]["endDay"], 30);
        assert_eq!(body["weeks"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_roadmap_bad_days_falls_back() {
        let app = app().await;
        let (status, body) = get_json(&app, "/roadmap?goal=Data%20Scientist&days=lots").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["days"], 30);
    }

    #[tokio::test]
    async fn test_roadmap_unknown_goal() {
        let app = app().await;
        let (status, body) = get_json(&app, "/api/roadmap?goal=Astronaut").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Roadmap not found for this goal");
    }

    #[tokio::test]
    async fn test_roadmap_goals() {
        let app = app().await;
        let (_, body) = get_json(&app, "/api/roadmap/goals").await;
        assert_eq!(body.as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_insights_grouped_and_filtered() {
        let app = app().await;
        let (_, grouped) = get_json(&app, "/api/insights").await;
        let keys: Vec<_> = grouped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(grouped["readiness"].as_array().unwrap().len(), 3);

        let (status, flat) = get_json(&app, "/api/insights?category=velocity").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(flat.as_array().unwrap().len(), 3);

        let (status, _) = get_json(&app, "/api/insights?category=vibes").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_role_lifecycle() {
        let app = app().await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/roles",
            Some(json!({"name": "Site Reliability Engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["message"], "Role created successfully");
        let id = created["id"].as_i64().unwrap();

        let (_, role) = get_json(&app, &format!("/api/roles/{id}")).await;
        assert_eq!(role["icon"], "code");
        assert_eq!(role["color"], "#7f9a7d");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/roles",
            Some(json!({"name": "Site Reliability Engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, Method::PUT, &format!("/api/roles/{id}"), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::DELETE, &format!("/api/roles/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = get_json(&app, &format!("/api/roles/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_role_requires_name() {
        let app = app().await;
        let (status, body) = send(&app, Method::POST, "/api/roles", Some(json!({"name": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name is required");
    }

    #[tokio::test]
    async fn test_create_question_validates_difficulty() {
        let app = app().await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/interview",
            Some(json!({"role_id": 1, "question": "Why?", "difficulty": "Expert"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/interview",
            Some(json!({"role_id": 9999, "question": "Why?"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_study_topic_with_resources() {
        let app = app().await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/study",
            Some(json!({
                "title": "Observability",
                "resources": [{"title": "Tracing 101"}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (_, topics) = get_json(&app, "/api/study").await;
        let topic = topics
            .as_array()
            .unwrap()
            .iter()
            .find(|t| t["id"] == id)
            .unwrap()
            .clone();
        assert_eq!(topic["icon"], "book");
        assert_eq!(topic["resources"][0]["type"], "Docs");
    }

    #[tokio::test]
    async fn test_insight_update_and_delete() {
        let app = app().await;
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/insights",
            Some(json!({"category": "Market", "label": "Remote share", "value": "41%"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/insights/{id}"),
            Some(json!({"value": "44%"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, market) = get_json(&app, "/api/insights?category=market").await;
        assert!(market.as_array().unwrap().iter().any(|i| i["value"] == "44%"));

        let (status, _) = send(&app, Method::DELETE, &format!("/api/insights/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &format!("/api/insights/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
