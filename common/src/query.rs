//! PostgREST read query

use crate::error::BackendError;
use crate::kind::RecordKind;
use crate::types::ListRecord;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub select: String,
    /// column -> value, sent as `col=eq.value`
    pub eq: Vec<(String, String)>,
    /// (column, descending)
    pub order: Option<(String, bool)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self { select: "*".to_string(), ..Default::default() }
    }

    /// The kind's list query: its select with joins and default order.
    pub fn for_kind(kind: RecordKind) -> Self {
        let (column, desc) = kind.order();
        Self {
            select: kind.select().to_string(),
            order: Some((column.to_string(), desc)),
            ..Default::default()
        }
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.eq.push((column.into(), value.into()));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Query-string pairs; reqwest / URLSearchParams do the encoding.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];
        for (column, value) in &self.eq {
            pairs.push((column.clone(), format!("eq.{}", value)));
        }
        if let Some((column, desc)) = &self.order {
            let dir = if *desc { "desc" } else { "asc" };
            pairs.push(("order".to_string(), format!("{}.{}", column, dir)));
        }
        if let Some(n) = self.limit {
            pairs.push(("limit".to_string(), n.to_string()));
        }
        pairs
    }

    /// Joined table names in the select, e.g. `personnel` for
    /// `*,personnel(first_name,last_name)`.
    pub fn joins(&self) -> Vec<(String, Vec<String>)> {
        let mut joins = Vec::new();
        let mut rest = self.select.as_str();
        while let Some(open) = rest.find('(') {
            let table = rest[..open].rsplit(',').next().unwrap_or_default().trim().to_string();
            let Some(close) = rest[open..].find(')') else { break };
            let columns = rest[open + 1..open + close]
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            joins.push((table, columns));
            rest = &rest[open + close + 1..];
        }
        joins
    }
}

/// JSON body for an insert or update. The id travels in the URL filter and
/// joined objects are never written back.
pub fn mutation_body<T: Serialize>(record: &T) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(record)?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
        map.retain(|_, v| !v.is_object());
    }
    Ok(value)
}

/// Decode fetched rows. One bad row fails the whole read.
pub fn decode_rows<R: ListRecord>(rows: Vec<Value>) -> Result<Vec<R>, BackendError> {
    rows.into_iter()
        .map(|row| serde_json::from_value::<R>(row).map_err(|e| BackendError::new("decode", e.to_string())))
        .collect()
}
