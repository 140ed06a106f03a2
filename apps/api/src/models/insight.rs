use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Readiness,
    Velocity,
    Market,
}

impl InsightCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            InsightCategory::Readiness => "readiness",
            InsightCategory::Velocity => "velocity",
            InsightCategory::Market => "market",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "readiness" => Ok(InsightCategory::Readiness),
            "velocity" => Ok(InsightCategory::Velocity),
            "market" => Ok(InsightCategory::Market),
            other => Err(format!(
                "Unknown category '{other}': expected readiness, velocity, or market"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InsightRow {
    pub id: i64,
    pub category: String,
    pub label: String,
    pub value: String,
    pub meta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightCard {
    pub id: i64,
    pub label: String,
    pub value: String,
    pub meta: String,
}

impl From<InsightRow> for InsightCard {
    fn from(row: InsightRow) -> Self {
        InsightCard {
            id: row.id,
            label: row.label,
            value: row.value,
            meta: row.meta,
        }
    }
}

/// Insights keyed by category, the shape `GET /api/insights` returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InsightGroups {
    pub readiness: Vec<InsightCard>,
    pub velocity: Vec<InsightCard>,
    pub market: Vec<InsightCard>,
}

impl InsightGroups {
    pub fn from_rows(rows: Vec<InsightRow>) -> Self {
        let mut groups = InsightGroups::default();
        for row in rows {
            match row.category.parse::<InsightCategory>() {
                Ok(InsightCategory::Readiness) => groups.readiness.push(row.into()),
                Ok(InsightCategory::Velocity) => groups.velocity.push(row.into()),
                Ok(InsightCategory::Market) => groups.market.push(row.into()),
                Err(_) => tracing::warn!("Skipping insight {} with category '{}'", row.id, row.category),
            }
        }
        groups
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInsight {
    pub category: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightUpdate {
    pub category: Option<String>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub meta: Option<String>,
}

impl InsightUpdate {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.label.is_none() && self.value.is_none() && self.meta.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, category: &str) -> InsightRow {
        InsightRow {
            id,
            category: category.to_string(),
            label: format!("label {id}"),
            value: "v".into(),
            meta: "m".into(),
        }
    }

    #[test]
    fn test_group_rows_by_category() {
        let groups = InsightGroups::from_rows(vec![
            row(1, "readiness"),
            row(2, "market"),
            row(3, "readiness"),
            row(4, "velocity"),
        ]);
        assert_eq!(groups.readiness.len(), 2);
        assert_eq!(groups.velocity.len(), 1);
        assert_eq!(groups.market.len(), 1);
        assert_eq!(groups.readiness[1].id, 3);
    }

    #[test]
    fn test_unknown_category_is_dropped() {
        let groups = InsightGroups::from_rows(vec![row(1, "vibes")]);
        assert!(groups.readiness.is_empty() && groups.velocity.is_empty() && groups.market.is_empty());
    }

    #[test]
    fn test_grouped_json_has_exactly_three_keys() {
        let json = serde_json::to_value(InsightGroups::default()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 3);
    }
}
