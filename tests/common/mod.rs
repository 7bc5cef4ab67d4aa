//! In-memory `ArtisanStore` that records every call, for driving the router without PostgreSQL.

#![allow(dead_code)]

use artisan_gateway::{app, AppState, Artisan, ArtisanPatch, ArtisanStore, Field, NewArtisan};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    List,
    Find(i64),
    Insert,
    Update(i64, Vec<Field>),
    Delete(i64),
    Ping,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Artisan>,
    next_id: i64,
    calls: Vec<Call>,
    failing: bool,
    /// Remove the row right after the next successful find, like a concurrent DELETE.
    vanish_after_find: bool,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn row_count(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    /// Make every subsequent call fail as if the connection dropped.
    pub fn fail(&self) {
        self.inner.lock().unwrap().failing = true;
    }

    pub fn vanish_after_next_find(&self) {
        self.inner.lock().unwrap().vanish_after_find = true;
    }

    /// Insert a row directly, bypassing the create path.
    pub fn seed_raw(&self, mut row: Artisan) -> Artisan {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        row.id = inner.next_id;
        inner.rows.insert(row.id, row.clone());
        row
    }

    pub fn seed(&self, nom: &str, profession: &str) -> Artisan {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let row = Artisan {
            id: inner.next_id,
            nom: Some(nom.into()),
            profession: Some(profession.into()),
            telephone: Some("0612345678".into()),
            adresse: Some("Fes el Bali".into()),
            note: Some(3.0),
        };
        inner.rows.insert(row.id, row.clone());
        row
    }

    fn enter(&self, call: Call) -> Result<std::sync::MutexGuard<'_, Inner>, sqlx::Error> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing {
            return Err(sqlx::Error::PoolClosed);
        }
        Ok(inner)
    }
}

fn text(v: &Value) -> Result<Option<String>, sqlx::Error> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        other => Ok(Some(other.to_string())),
    }
}

fn required_text(v: &Value) -> Result<String, sqlx::Error> {
    text(v)?.ok_or_else(|| sqlx::Error::Protocol("null value violates not-null constraint".into()))
}

fn number(v: &Value) -> Result<Option<f64>, sqlx::Error> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| sqlx::Error::Protocol(format!("invalid input syntax for type double precision: \"{s}\""))),
        other => Err(sqlx::Error::Protocol(format!("cannot cast {other} to double precision"))),
    }
}

#[async_trait]
impl ArtisanStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Artisan>, sqlx::Error> {
        let inner = self.enter(Call::List)?;
        Ok(inner.rows.values().cloned().collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Artisan>, sqlx::Error> {
        let mut inner = self.enter(Call::Find(id))?;
        let row = inner.rows.get(&id).cloned();
        if row.is_some() && inner.vanish_after_find {
            inner.vanish_after_find = false;
            inner.rows.remove(&id);
        }
        Ok(row)
    }

    async fn insert(&self, new: &NewArtisan) -> Result<Artisan, sqlx::Error> {
        let mut inner = self.enter(Call::Insert)?;
        let mut row = Artisan {
            id: 0,
            nom: Some(required_text(&new.nom)?),
            profession: Some(required_text(&new.profession)?),
            telephone: text(&new.telephone)?,
            adresse: text(&new.adresse)?,
            note: number(&new.note)?,
        };
        inner.next_id += 1;
        row.id = inner.next_id;
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, patch: &ArtisanPatch) -> Result<Option<Artisan>, sqlx::Error> {
        let fields = patch.iter().map(|(f, _)| f).collect();
        let mut inner = self.enter(Call::Update(id, fields))?;
        let Some(current) = inner.rows.get(&id) else {
            return Ok(None);
        };
        let mut row = current.clone();
        for (field, value) in patch.iter() {
            match field {
                Field::Nom => row.nom = Some(required_text(value)?),
                Field::Profession => row.profession = Some(required_text(value)?),
                Field::Telephone => row.telephone = text(value)?,
                Field::Adresse => row.adresse = text(value)?,
                Field::Note => row.note = number(value)?,
            }
        }
        inner.rows.insert(id, row.clone());
        Ok(Some(row))
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let mut inner = self.enter(Call::Delete(id))?;
        Ok(inner.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.enter(Call::Ping).map(|_| ())
    }
}

pub fn router(store: &MemoryStore) -> Router {
    app(AppState::new(Arc::new(store.clone())), 100 * 1024)
}

/// Send one request; returns status and body parsed as JSON (`Value::Null` when empty).
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(router, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is JSON")
    };
    (status, json)
}

pub async fn send_raw(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}
