//! Request payload extraction.
//!
//! Every endpoint accepts `{"bookmarks": [...]}` or `{"urls": [...]}`; the
//! first key holding a non-empty array wins.

use serde_json::Value;
use thiserror::Error;

use crate::{InputItem, Record};

/// Keys searched for the batch list, in priority order.
const LIST_KEYS: &[&str] = &["bookmarks", "urls"];

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("request body is not a JSON object")]
    NotAnObject,

    #[error("no bookmarks or URLs provided")]
    MissingList,

    #[error("'{key}' is not an array")]
    NotAnArray { key: &'static str },

    #[error("item {index} is not an object")]
    ItemNotObject { index: usize },

    #[error("item {index} is neither a URL string nor an object")]
    ItemNotSupported { index: usize },
}

/// Extract a batch of URL-or-record items (link checker input).
pub fn batch_items(body: &Value) -> Result<Vec<InputItem>, BatchError> {
    extract_list(body)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item.clone())
                .map_err(|_| BatchError::ItemNotSupported { index })
        })
        .collect()
}

/// Extract a batch that must consist of record objects (annotator input).
pub fn batch_records(body: &Value) -> Result<Vec<Record>, BatchError> {
    extract_list(body)?
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(Record(map.clone())),
            _ => Err(BatchError::ItemNotObject { index }),
        })
        .collect()
}

fn extract_list(body: &Value) -> Result<&Vec<Value>, BatchError> {
    let obj = body.as_object().ok_or(BatchError::NotAnObject)?;
    for key in LIST_KEYS {
        if let Some(value) = obj.get(*key) {
            let list = value.as_array().ok_or(BatchError::NotAnArray { key })?;
            if !list.is_empty() {
                return Ok(list);
            }
        }
    }
    Err(BatchError::MissingList)
}
