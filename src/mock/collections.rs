//! REST-style collections served under `/api/<name>[/<id>]`.

use super::request::{MockRequest, MockResponse};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

pub const ROUTE_PREFIX: &str = "/api/";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    items: BTreeMap<String, Vec<Value>>,
}

impl Collections {
    pub fn from_map(items: BTreeMap<String, Vec<Value>>) -> Self {
        let mut collections = Self::default();
        for (name, list) in items {
            collections.set(&name, list);
        }
        collections
    }

    /// Replace a collection, assigning ids to objects that lack one.
    ///
    /// Once the id space is used up the remaining objects keep no id.
    pub fn set(&mut self, name: &str, mut items: Vec<Value>) {
        let mut next = next_id(&items);
        for item in &mut items {
            if let Value::Object(object) = item
                && !object.contains_key("id")
                && let Some(id) = next
            {
                object.insert("id".into(), json!(id));
                next = id.checked_add(1);
            }
        }
        self.items.insert(name.to_string(), items);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.items.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.items.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<Value>> {
        &self.items
    }

    /// Serve `request` if it addresses a known collection.
    pub fn handle(&mut self, request: &MockRequest) -> Option<MockResponse> {
        let rest = request.path.strip_prefix(ROUTE_PREFIX)?;
        let (name, id) = match rest.split_once('/') {
            Some((name, id)) if !id.is_empty() && !id.contains('/') => (name, Some(id)),
            Some((name, "")) => (name, None),
            Some(_) => return None,
            None => (rest, None),
        };
        let items = self.items.get_mut(name)?;

        let response = match (request.method.as_str(), id) {
            ("GET", None) => MockResponse::json(200, Value::Array(items.clone())),
            ("POST", None) => {
                let mut item = match &request.body {
                    Some(Value::Object(object)) => object.clone(),
                    _ => return Some(bad_request("expected a JSON object body")),
                };
                let Some(id) = next_id(items) else {
                    return Some(bad_request("no ids left in this collection"));
                };
                item.insert("id".into(), json!(id));
                let item = Value::Object(item);
                items.push(item.clone());
                MockResponse::json(201, item)
            }
            ("GET", Some(id)) => match find(items, id) {
                Some(index) => MockResponse::json(200, items[index].clone()),
                None => missing(name, id),
            },
            ("PUT" | "PATCH", Some(id)) => {
                let Some(Value::Object(update)) = &request.body else {
                    return Some(bad_request("expected a JSON object body"));
                };
                let Some(index) = find(items, id) else {
                    return Some(missing(name, id));
                };
                let id_value = items[index].get("id").cloned().unwrap_or(Value::Null);
                let mut merged = match (&items[index], request.method.as_str()) {
                    (Value::Object(existing), "PATCH") => existing.clone(),
                    _ => Map::new(),
                };
                merged.extend(update.clone());
                merged.insert("id".into(), id_value);
                items[index] = Value::Object(merged);
                MockResponse::json(200, items[index].clone())
            }
            ("DELETE", Some(id)) => match find(items, id) {
                Some(index) => MockResponse::json(200, items.remove(index)),
                None => missing(name, id),
            },
            _ => MockResponse::json(
                405,
                json!({ "error": format!("{} not allowed on {}", request.method, request.path) }),
            ),
        };
        Some(response)
    }
}

/// Largest integer id plus one, starting at 1. `None` past `i64::MAX`.
fn next_id(items: &[Value]) -> Option<i64> {
    items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_i64))
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

fn find(items: &[Value], id: &str) -> Option<usize> {
    let numeric = id.parse::<i64>().ok();
    items.iter().position(|item| match item.get("id") {
        Some(Value::Number(n)) => numeric.is_some() && n.as_i64() == numeric,
        Some(Value::String(s)) => s == id,
        _ => false,
    })
}

fn missing(name: &str, id: &str) -> MockResponse {
    MockResponse::json(404, json!({ "error": format!("no item {id} in {name}") }))
}

fn bad_request(message: &str) -> MockResponse {
    MockResponse::json(400, json!({ "error": message }))
}
