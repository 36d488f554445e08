//! HTTP-backed resource access

use std::marker::PhantomData;

use async_trait::async_trait;
use leptos_listview::collapse_ids;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{check_status, resource_url, ApiClient, Photo, PhotoUpload, ResourceApi, ResourceDef};
use crate::error::ApiError;

pub struct RestResource<T> {
    client: ApiClient,
    def: &'static ResourceDef,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for RestResource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            def: self.def,
            _entity: PhantomData,
        }
    }
}

impl<T> RestResource<T> {
    pub fn new(client: ApiClient, def: &'static ResourceDef) -> Self {
        Self {
            client,
            def,
            _entity: PhantomData,
        }
    }

    pub fn def(&self) -> &'static ResourceDef {
        self.def
    }

    fn url(&self, tail: &[&str]) -> String {
        resource_url(self.client.base(self.def.root), self.def.path, tail)
    }

    /// Photo to attach, if this resource takes one
    fn photo<'a>(&self, photo: Option<&'a Photo>) -> Option<&'a Photo> {
        match (self.def.photo, photo) {
            (PhotoUpload::Unsupported, Some(_)) => {
                log::warn!("[Api] {} does not take photos, sending without", self.def.name);
                None
            }
            (_, photo) => photo,
        }
    }

    async fn put_action(&self, id: &str, action: &str) -> Result<(), ApiError> {
        let url = self.url(&[id, action]);
        log::debug!("[Api] PUT {}", url);
        let response = self.client.http().put(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

impl<T: DeserializeOwned> RestResource<T> {
    async fn read_entity(response: reqwest::Response) -> Result<Option<T>, ApiError> {
        let body: Value = check_status(response).await?.json().await.unwrap_or(Value::Null);
        let entity = body.get("data").cloned().unwrap_or(body);
        Ok(decode(entity).ok())
    }
}

/// Payload fields as multipart text parts. Nulls are dropped, non-strings JSON-encoded.
pub fn multipart_fields(payload: &Value) -> Vec<(String, String)> {
    let Some(map) = payload.as_object() else {
        return Vec::new();
    };
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect()
}

fn multipart_form(payload: &Value, photo: &Photo) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (key, text) in multipart_fields(payload) {
        form = form.text(key, text);
    }
    let part = Part::bytes(photo.bytes.clone())
        .file_name(photo.file_name.clone())
        .mime_str(&photo.mime)?;
    Ok(form.part("image", part))
}

/// Lists arrive either bare or wrapped in `{ "data": [...] }`
pub fn unwrap_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, ApiError> {
    let list = match body {
        Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
        other => other,
    };
    if !list.is_array() {
        return Err(ApiError::Decode(format!("expected a list, got {}", list)));
    }
    Ok(decode(list)?)
}

/// Decode backend JSON, accepting rows that carry both `_id` and `id`
fn decode<T: DeserializeOwned>(mut value: Value) -> Result<T, serde_json::Error> {
    collapse_ids(&mut value);
    serde_json::from_value(value)
}

#[async_trait(?Send)]
impl<T: DeserializeOwned + 'static> ResourceApi<T> for RestResource<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        let url = self.url(&[]);
        log::debug!("[Api] GET {}", url);
        let response = self.client.http().get(&url).send().await?;
        let body: Value = check_status(response).await?.json().await?;
        unwrap_list(body)
    }

    async fn create(&self, payload: &Value, photo: Option<&Photo>) -> Result<Option<T>, ApiError> {
        let request = match self.photo(photo) {
            Some(photo) => {
                let url = match self.def.photo {
                    PhotoUpload::UploadRoute => self.url(&["upload"]),
                    _ => self.url(&[]),
                };
                log::debug!("[Api] POST {} (multipart)", url);
                self.client.http().post(&url).multipart(multipart_form(payload, photo)?)
            }
            None => {
                let url = self.url(&[]);
                log::debug!("[Api] POST {}", url);
                self.client.http().post(&url).json(payload)
            }
        };
        Self::read_entity(request.send().await?).await
    }

    async fn update(
        &self,
        id: &str,
        payload: &Value,
        photo: Option<&Photo>,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(&[id]);
        let request = match self.photo(photo) {
            Some(photo) => {
                log::debug!("[Api] PUT {} (multipart)", url);
                self.client.http().put(&url).multipart(multipart_form(payload, photo)?)
            }
            None => {
                log::debug!("[Api] PUT {}", url);
                self.client.http().put(&url).json(payload)
            }
        };
        Self::read_entity(request.send().await?).await
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&[id]);
        log::debug!("[Api] DELETE {}", url);
        let response = self.client.http().delete(&url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn archive(&self, id: &str) -> Result<(), ApiError> {
        self.put_action(id, "archive").await
    }

    async fn restore(&self, id: &str) -> Result<(), ApiError> {
        self.put_action(id, "restore").await
    }
}
