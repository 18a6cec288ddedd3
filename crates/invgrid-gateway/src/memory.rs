//! Deterministic in-memory gateway for tests and demos.

use std::cell::RefCell;
use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{GatewayError, Result};
use crate::gateway::{DataGateway, ListPage, ListRequest, Row, row_id};

/// In-memory [`DataGateway`]: rows live in insertion order, list requests
/// sort and slice a copy, and inserts without an `id` get a sequential one.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    state: RefCell<State>,
}

#[derive(Debug, Default)]
struct State {
    rows: Vec<Row>,
    next_id: u64,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the gateway with existing rows (each carrying an `id`). The
    /// id counter resumes past the largest numeric id seen.
    #[must_use]
    pub fn with_rows(self, rows: Vec<Row>) -> Self {
        {
            let mut state = self.state.borrow_mut();
            state.next_id = rows
                .iter()
                .filter_map(|row| row_id(row).and_then(|id| id.parse::<u64>().ok()))
                .max()
                .unwrap_or(0);
            state.rows = rows;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.state.borrow().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait(?Send)]
impl DataGateway for MemoryGateway {
    async fn list(&self, request: &ListRequest) -> Result<ListPage> {
        let state = self.state.borrow();
        let mut rows = state.rows.clone();
        if let Some(sort) = &request.sort {
            rows.sort_by(|a, b| {
                let ordering = compare_values(a.get(&sort.key), b.get(&sort.key));
                if sort.order.is_descending() {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        let total = rows.len();
        let rows: Vec<Row> = rows
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .map(|row| project(row, request.columns.as_deref()))
            .collect();
        Ok(ListPage { rows, total })
    }

    async fn get_by_id(&self, id: &str) -> Result<Row> {
        let state = self.state.borrow();
        state
            .rows
            .iter()
            .find(|row| row_id(row).as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn insert(&self, mut row: Row) -> Result<Row> {
        let mut state = self.state.borrow_mut();
        if row_id(&row).is_none() {
            state.next_id += 1;
            let id = state.next_id.to_string();
            row.insert("id".to_string(), Value::String(id));
        } else if let Some(id) = row_id(&row)
            && state
                .rows
                .iter()
                .any(|existing| row_id(existing).as_deref() == Some(id.as_str()))
        {
            return Err(GatewayError::Validation(format!("duplicate id {id}")));
        }
        state.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &str, patch: Row) -> Result<Row> {
        let mut state = self.state.borrow_mut();
        let row = state
            .rows
            .iter_mut()
            .find(|row| row_id(row).as_deref() == Some(id))
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        for (key, value) in patch {
            row.insert(key, value);
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        let before = state.rows.len();
        state.rows.retain(|row| row_id(row).as_deref() != Some(id));
        if state.rows.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Total order over JSON scalars: null first, then booleans, numbers,
/// strings; everything else compares equal.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }
    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn project(row: Row, columns: Option<&[String]>) -> Row {
    match columns {
        Some(columns) => row
            .into_iter()
            .filter(|(key, _)| columns.iter().any(|column| column == key))
            .collect(),
        None => row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invgrid_model::SortOrder;
    use serde_json::json;

    fn row(id: u64, name: &str, qty: u64) -> Row {
        match json!({"id": id.to_string(), "name": name, "qty": qty}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn seeded() -> MemoryGateway {
        MemoryGateway::new().with_rows(vec![
            row(1, "Widget", 4),
            row(2, "Gadget", 7),
            row(3, "Bolt", 1),
        ])
    }

    #[tokio::test]
    async fn list_sorts_slices_and_counts() {
        let gateway = seeded();
        let page = gateway
            .list(&ListRequest::page(1, 1).with_sort("name", SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.rows[0]["name"], json!("Gadget"));

        let descending = gateway
            .list(&ListRequest::page(0, 10).with_sort("qty", SortOrder::Desc))
            .await
            .unwrap();
        assert_eq!(descending.rows[0]["name"], json!("Gadget"));
    }

    #[tokio::test]
    async fn list_projects_columns() {
        let gateway = seeded();
        let page = gateway
            .list(&ListRequest::page(0, 10).with_columns(vec!["name".to_string()]))
            .await
            .unwrap();
        assert_eq!(page.rows[0].len(), 1);
        assert!(page.rows[0].contains_key("name"));
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let gateway = seeded();

        let created = gateway
            .insert(match json!({"name": "Nut", "qty": 9}) {
                Value::Object(map) => map,
                _ => unreachable!(),
            })
            .await
            .unwrap();
        let id = row_id(&created).unwrap();
        assert_eq!(gateway.len(), 4);

        let fetched = gateway.get_by_id(&id).await.unwrap();
        assert_eq!(fetched["name"], json!("Nut"));

        let updated = gateway
            .update(
                &id,
                match json!({"qty": 10}) {
                    Value::Object(map) => map,
                    _ => unreachable!(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated["qty"], json!(10));
        assert_eq!(updated["name"], json!("Nut"));

        gateway.delete(&id).await.unwrap();
        assert!(matches!(
            gateway.get_by_id(&id).await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected() {
        let gateway = seeded();
        let result = gateway.insert(row(1, "Clone", 0)).await;
        assert!(matches!(result, Err(GatewayError::Validation(_))));
    }
}
