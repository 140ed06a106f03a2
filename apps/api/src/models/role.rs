use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_ICON: &str = "code";
pub const DEFAULT_COLOR: &str = "#7f9a7d";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub created_at: NaiveDateTime,
}

/// Body of `POST /api/roles`. `name` is optional here so a missing name is
/// reported as a validation error rather than a JSON rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewRole {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Body of `PUT /api/roles/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl RoleUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.icon.is_none() && self.color.is_none()
    }
}
