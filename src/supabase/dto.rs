use serde::Deserialize;

/// Filter/order parameters for a PostgREST listing request.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Exact-match filter on the row id.
    pub id_eq: Option<String>,
    /// Exact-match filter on a parent-id column, as (column, value).
    pub parent: Option<(&'static str, String)>,
    /// Keep only rows whose `is_visible` column is true.
    pub visible_only: bool,
    /// Ascending order on this column.
    pub order_by: Option<&'static str>,
}

impl ListQuery {
    pub fn by_id(id: &str) -> Self {
        Self {
            id_eq: Some(id.to_string()),
            ..Default::default()
        }
    }

    /// Render as PostgREST query-string pairs.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        if let Some(id) = &self.id_eq {
            pairs.push(("id".to_string(), format!("eq.{}", id)));
        }
        if let Some((column, value)) = &self.parent {
            pairs.push((column.to_string(), format!("eq.{}", value)));
        }
        if self.visible_only {
            pairs.push(("is_visible".to_string(), "eq.true".to_string()));
        }
        if let Some(key) = self.order_by {
            pairs.push(("order".to_string(), format!("{}.asc", key)));
        }
        pairs
    }
}

/// Error body PostgREST returns alongside a non-2xx status.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}
