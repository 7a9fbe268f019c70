use serde_json::Value;
use std::cmp::Ordering;

use crate::types::RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EqFilter {
    pub column: String,
    pub value: Value,
}

/// Table query: column projection, equality filters and ordering.
/// This is the whole query surface the site needs from the backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    columns: Vec<String>,
    filters: Vec<EqFilter>,
    order: Vec<OrderInfo>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict returned columns. An empty projection means `*`.
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(EqFilter {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn id(self, id: &RowId) -> Self {
        let value = match id {
            RowId::Int(n) => Value::from(*n),
            RowId::Text(s) => Value::from(s.clone()),
        };
        self.eq("id", value)
    }

    pub fn order_by(mut self, column: impl Into<String>, sort: SortDirection) -> Self {
        self.order.push(OrderInfo {
            column: column.into(),
            sort,
        });
        self
    }

    pub fn filters(&self) -> &[EqFilter] {
        &self.filters
    }

    pub fn ordering(&self) -> &[OrderInfo] {
        &self.order
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    /// Render as REST query-string pairs: `select=*`, `status=eq.new`, `order=created_at.desc`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        };
        params.push(("select".to_string(), select));

        for f in &self.filters {
            params.push((f.column.clone(), format!("eq.{}", scalar_text(&f.value))));
        }

        if !self.order.is_empty() {
            let parts: Vec<String> = self
                .order
                .iter()
                .map(|o| format!("{}.{}", o.column, o.sort.as_str()))
                .collect();
            params.push(("order".to_string(), parts.join(",")));
        }
        params
    }

    /// Filter-only params, used for update and delete requests.
    pub fn filter_params(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|f| (f.column.clone(), format!("eq.{}", scalar_text(&f.value))))
            .collect()
    }

    /// Evaluate the equality filters against a row held in memory.
    pub fn matches(&self, row: &Value) -> bool {
        self.filters.iter().all(|f| match row.get(&f.column) {
            Some(v) => scalar_text(v) == scalar_text(&f.value),
            None => false,
        })
    }

    /// Apply ordering and projection to rows held in memory.
    pub fn apply(&self, mut rows: Vec<Value>) -> Vec<Value> {
        rows.retain(|r| self.matches(r));
        if !self.order.is_empty() {
            rows.sort_by(|a, b| {
                for o in &self.order {
                    let ord = compare_values(a.get(&o.column), b.get(&o.column));
                    let ord = match o.sort {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    };
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                Ordering::Equal
            });
        }
        if self.columns.is_empty() {
            return rows;
        }
        rows.into_iter()
            .map(|row| {
                let mut out = serde_json::Map::new();
                for c in &self.columns {
                    if let Some(v) = row.get(c) {
                        out.insert(c.clone(), v.clone());
                    }
                }
                Value::Object(out)
            })
            .collect()
    }
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(x), Some(y)) => scalar_text(x).cmp(&scalar_text(y)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_rest_params() {
        let q = Query::new()
            .eq("status", "new")
            .order_by("created_at", SortDirection::Desc);
        assert_eq!(
            q.to_params(),
            vec![
                ("select".to_string(), "*".to_string()),
                ("status".to_string(), "eq.new".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn apply_filters_and_sorts() {
        let rows = vec![
            json!({"id": 1, "status": "new", "created_at": "2024-01-01"}),
            json!({"id": 2, "status": "processed", "created_at": "2024-02-01"}),
            json!({"id": 3, "status": "new", "created_at": "2024-03-01"}),
        ];
        let q = Query::new()
            .eq("status", "new")
            .order_by("created_at", SortDirection::Desc)
            .select(&["id"]);
        assert_eq!(q.apply(rows), vec![json!({"id": 3}), json!({"id": 1})]);
    }
}
