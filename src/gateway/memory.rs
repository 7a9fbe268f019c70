use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::error::GatewayError;
use super::query::Query;
use super::{tables, Gateway, GatewayResult, Session, User};
use crate::types::Operation;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: Operation,
    pub target: String,
}

/// Oldest calls are dropped past this many, so a long-running dev server
/// stays bounded.
pub const MAX_RECORDED_CALLS: usize = 10_000;

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    defaults: HashMap<String, Map<String, Value>>,
    serial: HashMap<String, i64>,
    objects: HashMap<String, Vec<u8>>,
    users: HashMap<String, (String, User)>,
    sessions: HashMap<String, User>,
    calls: VecDeque<Call>,
    failing: HashSet<Operation>,
    last_created: Option<DateTime<Utc>>,
}

/// Gateway held entirely in process memory.
///
/// Backs `GATEWAY_MODE=memory` for local development and drives the test
/// suite. Every call is recorded so callers can assert on remote traffic.
#[derive(Clone, Default)]
pub struct MemoryGateway {
    state: Arc<Mutex<State>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        let gw = Self::default();
        gw.set_default(tables::CONTACT_FORMS, "status", Value::from("new"));
        gw.use_serial_ids(tables::SERVICES);
        gw
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked mid-call.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Column default applied on insert, like a database column default.
    pub fn set_default(&self, table: &str, column: &str, value: Value) {
        self.lock()
            .defaults
            .entry(table.to_string())
            .or_default()
            .insert(column.to_string(), value);
    }

    /// Generate integer ids for the table instead of uuids.
    pub fn use_serial_ids(&self, table: &str) {
        self.lock().serial.entry(table.to_string()).or_insert(0);
    }

    /// Put rows directly into a table without recording a call.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut state = self.lock();
        for row in rows {
            let row = prepare_row(&mut state, table, row);
            state.tables.entry(table.to_string()).or_default().push(row);
        }
    }

    pub fn add_user(&self, email: &str, password: &str) -> User {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
        };
        self.lock()
            .users
            .insert(email.to_string(), (password.to_string(), user.clone()));
        user
    }

    /// Make every subsequent call of this kind fail until `recover` is called.
    pub fn fail(&self, op: Operation) {
        self.lock().failing.insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.lock().failing.remove(&op);
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().objects.get(path).cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.iter().cloned().collect()
    }

    pub fn count(&self, op: Operation, target: &str) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| c.op == op && c.target == target)
            .count()
    }

    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    fn record(&self, op: Operation, target: &str) -> GatewayResult<()> {
        let mut state = self.lock();
        if state.calls.len() >= MAX_RECORDED_CALLS {
            state.calls.pop_front();
        }
        state.calls.push_back(Call {
            op,
            target: target.to_string(),
        });
        if state.failing.contains(&op) {
            return Err(GatewayError::Remote {
                status: 503,
                message: format!("{:?} on {} unavailable", op, target),
            });
        }
        Ok(())
    }
}

fn prepare_row(state: &mut State, table: &str, row: Value) -> Value {
    let mut obj = match row {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(defaults) = state.defaults.get(table) {
        for (k, v) in defaults {
            obj.entry(k.clone()).or_insert_with(|| v.clone());
        }
    }
    if !obj.contains_key("id") || obj["id"].is_null() {
        let id = match state.serial.get_mut(table) {
            Some(seq) => {
                *seq += 1;
                Value::from(*seq)
            }
            None => Value::from(Uuid::new_v4().to_string()),
        };
        obj.insert("id".to_string(), id);
    } else if let (Some(seq), Some(n)) = (state.serial.get_mut(table), obj["id"].as_i64()) {
        *seq = (*seq).max(n);
    }
    if !obj.contains_key("created_at") {
        // Strictly increasing so newest-first ordering is deterministic.
        let mut now = Utc::now();
        if let Some(last) = state.last_created {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        state.last_created = Some(now);
        obj.insert(
            "created_at".to_string(),
            Value::from(now.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
    }
    Value::Object(obj)
}

fn merge(target: &mut Value, patch: &Value) {
    if let (Value::Object(t), Value::Object(p)) = (target, patch) {
        for (k, v) in p {
            t.insert(k.clone(), v.clone());
        }
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn select(&self, table: &str, query: &Query) -> GatewayResult<Vec<Value>> {
        self.record(Operation::Select, table)?;
        Ok(query.apply(self.rows(table)))
    }

    async fn select_single(&self, table: &str, query: &Query) -> GatewayResult<Value> {
        self.record(Operation::Select, table)?;
        let mut rows = query.apply(self.rows(table));
        if rows.len() != 1 {
            return Err(GatewayError::NotFound(format!(
                "expected one row in {}, found {}",
                table,
                rows.len()
            )));
        }
        Ok(rows.remove(0))
    }

    async fn insert(&self, table: &str, row: Value) -> GatewayResult<Value> {
        self.record(Operation::Insert, table)?;
        let mut state = self.lock();
        let row = prepare_row(&mut state, table, row);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> GatewayResult<Vec<Value>> {
        self.record(Operation::Update, table)?;
        if !query.has_filters() {
            return Err(GatewayError::InvalidQuery("update requires a filter".to_string()));
        }
        let mut state = self.lock();
        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| query.matches(r)) {
                merge(row, &patch);
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn upsert(&self, table: &str, row: Value) -> GatewayResult<Value> {
        self.record(Operation::Upsert, table)?;
        let mut state = self.lock();
        if let Some(id) = row.get("id").filter(|v| !v.is_null()).cloned() {
            if let Some(existing) = state
                .tables
                .get_mut(table)
                .and_then(|rows| rows.iter_mut().find(|r| r.get("id") == Some(&id)))
            {
                merge(existing, &row);
                return Ok(existing.clone());
            }
        }
        let row = prepare_row(&mut state, table, row);
        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(row)
    }

    async fn delete(&self, table: &str, query: &Query) -> GatewayResult<()> {
        self.record(Operation::Delete, table)?;
        if !query.has_filters() {
            return Err(GatewayError::InvalidQuery("delete requires a filter".to_string()));
        }
        if let Some(rows) = self.lock().tables.get_mut(table) {
            rows.retain(|r| !query.matches(r));
        }
        Ok(())
    }

    async fn upload(&self, bucket: &str, path: &str, bytes: Vec<u8>, _content_type: &str) -> GatewayResult<()> {
        self.record(Operation::Upload, bucket)
            .map_err(|e| GatewayError::Storage(e.to_string()))?;
        let key = format!("{}/{}", bucket, path);
        let mut state = self.lock();
        if state.objects.contains_key(&key) {
            return Err(GatewayError::Storage(format!("object already exists: {}", key)));
        }
        state.objects.insert(key, bytes);
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("memory://storage/public/{}/{}", bucket, path)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> GatewayResult<Session> {
        let mut state = self.lock();
        let user = match state.users.get(email) {
            Some((stored, user)) if stored == password => user.clone(),
            _ => return Err(GatewayError::Auth("invalid login credentials".to_string())),
        };
        let token = Uuid::new_v4().simple().to_string();
        state.sessions.insert(token.clone(), user.clone());
        Ok(Session {
            access_token: token,
            refresh_token: None,
            expires_in: Some(3600),
            user,
        })
    }

    async fn sign_out(&self, access_token: &str) -> GatewayResult<()> {
        self.lock().sessions.remove(access_token);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> GatewayResult<Option<User>> {
        Ok(self.lock().sessions.get(access_token).cloned())
    }

    fn with_access_token(&self, _access_token: &str) -> Arc<dyn Gateway> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_assigns_ids_and_defaults() {
        let gw = MemoryGateway::new();
        let form = gw
            .insert(tables::CONTACT_FORMS, json!({"name": "Anna"}))
            .await
            .unwrap();
        assert_eq!(form["status"], "new");
        assert!(form["id"].is_string());

        let service = gw
            .insert(tables::SERVICES, json!({"title": "Polish"}))
            .await
            .unwrap();
        assert_eq!(service["id"], 1);
    }

    #[tokio::test]
    async fn uploads_never_overwrite() {
        let gw = MemoryGateway::new();
        gw.upload("images", "a.jpg", vec![1], "image/jpeg").await.unwrap();
        assert!(gw.upload("images", "a.jpg", vec![2], "image/jpeg").await.is_err());
        assert_eq!(gw.object("images/a.jpg"), Some(vec![1]));
    }

    #[tokio::test]
    async fn injected_failures_are_recorded() {
        let gw = MemoryGateway::new();
        gw.fail(Operation::Select);
        assert!(gw.select(tables::CASES, &Query::new()).await.is_err());
        assert_eq!(gw.count(Operation::Select, tables::CASES), 1);
        gw.recover(Operation::Select);
        assert!(gw.select(tables::CASES, &Query::new()).await.is_ok());
    }

    #[tokio::test]
    async fn call_log_keeps_only_the_newest() {
        let gw = MemoryGateway::new();
        for _ in 0..MAX_RECORDED_CALLS {
            gw.select(tables::CASES, &Query::new()).await.unwrap();
        }
        gw.delete(tables::CASES, &Query::new().eq("id", "a")).await.unwrap();

        let calls = gw.calls();
        assert_eq!(calls.len(), MAX_RECORDED_CALLS);
        assert_eq!(calls.last().map(|c| c.op), Some(Operation::Delete));
        assert_eq!(gw.count(Operation::Select, tables::CASES), MAX_RECORDED_CALLS - 1);
    }

    #[tokio::test]
    async fn sessions_follow_sign_in_and_out() {
        let gw = MemoryGateway::new();
        gw.add_user("admin@example.com", "secret");
        assert!(gw.sign_in_with_password("admin@example.com", "wrong").await.is_err());

        let session = gw
            .sign_in_with_password("admin@example.com", "secret")
            .await
            .unwrap();
        assert!(gw.get_user(&session.access_token).await.unwrap().is_some());

        gw.sign_out(&session.access_token).await.unwrap();
        assert!(gw.get_user(&session.access_token).await.unwrap().is_none());
    }
}
