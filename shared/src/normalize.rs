//! Turns converted upstream documents into client-facing data.
//!
//! The upstream emits `<item>` once per record, so after XML conversion a
//! single hit is an object and several hits are an array. [`OneOrMany`] names
//! that ambiguity and [`extract_items`] resolves it into a plain list before
//! anything else sees the data.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::models::{PharmacyList, PharmacyRecord};
use crate::xml::TEXT_KEY;

/// A field the upstream presents either once or repeatedly.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(item) => vec![item],
            OneOrMany::Many(items) => items,
        }
    }
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        value.into_vec()
    }
}

/// Structured error carried in an upstream `<header>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamMessage {
    pub message: String,
    pub code: Option<String>,
}

/// Follows `response → body → items → item` and returns the records.
///
/// An absent or null path, or an empty `<items/>`, is the upstream's way of
/// saying "no results" and yields an empty list.
pub fn extract_items(document: &Value) -> PharmacyList {
    let item = match child(document, &["response", "body", "items", "item"]) {
        None | Some(Value::Null) => return Vec::new(),
        Some(item) => item.clone(),
    };

    let items: OneOrMany<Value> = match item {
        Value::Array(items) => OneOrMany::Many(items),
        single => OneOrMany::One(single),
    };

    items.into_vec().into_iter().map(into_record).collect()
}

/// Reads `response → header → resultMsg` (and `resultCode` beside it).
///
/// Gateway-level rejections (bad or unregistered service key) arrive as
/// `OpenAPI_ServiceResponse → cmmMsgHeader` instead; `returnAuthMsg`, then
/// `errMsg`, is used from there. Returns `None` unless a non-empty message
/// string is present.
pub fn extract_result_message(document: &Value) -> Option<UpstreamMessage> {
    if let Some(header) = child(document, &["response", "header"]) {
        return header_message(header, &["resultMsg"], "resultCode");
    }
    let header = child(document, &["OpenAPI_ServiceResponse", "cmmMsgHeader"])?;
    header_message(header, &["returnAuthMsg", "errMsg"], "returnReasonCode")
}

fn header_message(
    header: &Value,
    message_keys: &[&str],
    code_key: &str,
) -> Option<UpstreamMessage> {
    let message = message_keys.iter().find_map(|key| match header.get(*key) {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    })?;
    let code = match header.get(code_key) {
        Some(Value::String(code)) if !code.is_empty() => Some(code.clone()),
        _ => None,
    };

    Some(UpstreamMessage { message, code })
}

// Each step must land on an object; anything else ends the walk.
fn child<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |node, key| match node {
        Value::Object(fields) => fields.get(*key),
        _ => None,
    })
}

fn into_record(value: Value) -> PharmacyRecord {
    match value {
        Value::Object(fields) => fields,
        scalar => {
            let mut record = Map::new();
            record.insert(TEXT_KEY.to_string(), scalar);
            record
        }
    }
}
