pub mod insight;
pub mod interview;
pub mod roadmap;
pub mod role;
pub mod study;

use serde::Serialize;

/// Acknowledgement body returned by create/update/delete endpoints.
#[derive(Debug, Serialize)]
pub struct Ack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub message: String,
}

impl Ack {
    pub fn created(id: i64, what: &str) -> Self {
        Ack {
            id: Some(id),
            message: format!("{what} created successfully"),
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Ack {
            id: None,
            message: message.into(),
        }
    }
}
