//! REST Client
//!
//! One `ApiClient` is built at startup and handed to screens through context.
//! Screens talk to a resource through the `ResourceApi` trait so tests can
//! swap in a fake.

mod options;
mod photo;
mod resources;
mod rest;

use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::{message_from_body, ApiError, MutationFailure};

pub use options::{list_options, option_from_value, SelectOption};
pub use photo::{read_photo, Photo};
pub use resources::*;
pub use rest::{multipart_fields, unwrap_list, RestResource};

/// Characters escaped in an id path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Whether a resource lives under the configured `/api` prefix or beside it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiRoot {
    Api,
    Bare,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_url: Arc<str>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        log::info!("[Api] backend at {}", config.api_url);
        Self {
            http: reqwest::Client::new(),
            api_url: Arc::from(config.api_url.as_str()),
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn base(&self, root: ApiRoot) -> &str {
        base_url(&self.api_url, root)
    }

    pub fn resource<T>(&self, def: &'static ResourceDef) -> RestResource<T> {
        RestResource::new(self.clone(), def)
    }
}

pub fn base_url(api_url: &str, root: ApiRoot) -> &str {
    let trimmed = api_url.trim_end_matches('/');
    match root {
        ApiRoot::Api => trimmed,
        ApiRoot::Bare => trimmed.strip_suffix("/api").unwrap_or(trimmed),
    }
}

/// `{base}/{path}/{tail...}` with tail segments percent-encoded
pub fn resource_url(base: &str, path: &str, tail: &[&str]) -> String {
    let mut url = format!("{}/{}", base, path.trim_matches('/'));
    for segment in tail {
        url.push('/');
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    url
}

/// Pass 2xx responses through, turn anything else into `ApiError::Status`
pub async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = message_from_body(status.as_u16(), &body);
    log::warn!("[Api] request failed with {}: {}", status.as_u16(), message);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

// ========================
// Resource Access
// ========================

#[async_trait(?Send)]
pub trait ResourceApi<T> {
    /// Full list, all archive states
    async fn list(&self) -> Result<Vec<T>, ApiError>;

    /// Returns the created entity when the body decodes as one
    async fn create(&self, payload: &Value, photo: Option<&Photo>) -> Result<Option<T>, ApiError>;

    async fn update(
        &self,
        id: &str,
        payload: &Value,
        photo: Option<&Photo>,
    ) -> Result<Option<T>, ApiError>;

    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    async fn archive(&self, id: &str) -> Result<(), ApiError>;

    async fn restore(&self, id: &str) -> Result<(), ApiError>;
}

/// A user-triggered change to one resource
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Create { payload: Value, photo: Option<Photo> },
    Update { id: String, payload: Value, photo: Option<Photo> },
    Delete(String),
    Archive(String),
    Restore(String),
}

impl Mutation {
    pub fn verb(&self) -> &'static str {
        match self {
            Mutation::Create { .. } => "created",
            Mutation::Update { .. } => "updated",
            Mutation::Delete(_) => "deleted",
            Mutation::Archive(_) => "archived",
            Mutation::Restore(_) => "restored",
        }
    }
}

pub async fn apply_mutation<T, A>(api: &A, mutation: &Mutation) -> Result<(), ApiError>
where
    A: ResourceApi<T> + ?Sized,
{
    match mutation {
        Mutation::Create { payload, photo } => {
            api.create(payload, photo.as_ref()).await.map(|_| ())
        }
        Mutation::Update { id, payload, photo } => {
            api.update(id, payload, photo.as_ref()).await.map(|_| ())
        }
        Mutation::Delete(id) => api.delete(id).await,
        Mutation::Archive(id) => api.archive(id).await,
        Mutation::Restore(id) => api.restore(id).await,
    }
}

/// Send the mutation, then refetch the whole list. A rejected mutation skips the refetch.
pub async fn mutate_then_list<T, A>(api: &A, mutation: &Mutation) -> Result<Vec<T>, MutationFailure>
where
    A: ResourceApi<T> + ?Sized,
{
    apply_mutation(api, mutation)
        .await
        .map_err(MutationFailure::Rejected)?;
    api.list().await.map_err(MutationFailure::RefreshFailed)
}

#[cfg(test)]
pub mod fake {
    //! In-memory stand-in for a backend resource

    use std::cell::RefCell;

    use super::*;
    use crate::models::Category;

    #[derive(Default)]
    pub struct FakeCategories {
        pub rows: RefCell<Vec<Category>>,
        pub fail_next: RefCell<Option<ApiError>>,
        pub calls: RefCell<Vec<String>>,
    }

    impl FakeCategories {
        pub fn with(rows: Vec<Category>) -> Self {
            Self {
                rows: RefCell::new(rows),
                ..Default::default()
            }
        }

        fn record(&self, call: String) -> Result<(), ApiError> {
            self.calls.borrow_mut().push(call);
            match self.fail_next.borrow_mut().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        fn set_archived(&self, id: &str, archived: bool) {
            for row in self.rows.borrow_mut().iter_mut().filter(|row| row.id == id) {
                row.archived = archived;
            }
        }
    }

    #[async_trait(?Send)]
    impl ResourceApi<Category> for FakeCategories {
        async fn list(&self) -> Result<Vec<Category>, ApiError> {
            self.record("list".into())?;
            Ok(self.rows.borrow().clone())
        }

        async fn create(
            &self,
            payload: &Value,
            _photo: Option<&Photo>,
        ) -> Result<Option<Category>, ApiError> {
            self.record("create".into())?;
            let mut created: Category = serde_json::from_value(serde_json::json!({
                "_id": format!("c{}", self.rows.borrow().len() + 1),
            }))?;
            created.label = payload["label"].as_str().unwrap_or_default().to_string();
            self.rows.borrow_mut().push(created.clone());
            Ok(Some(created))
        }

        async fn update(
            &self,
            id: &str,
            payload: &Value,
            _photo: Option<&Photo>,
        ) -> Result<Option<Category>, ApiError> {
            self.record(format!("update {id}"))?;
            let mut rows = self.rows.borrow_mut();
            let row = rows.iter_mut().find(|row| row.id == id).ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Category not found".into(),
            })?;
            row.label = payload["label"].as_str().unwrap_or_default().to_string();
            Ok(Some(row.clone()))
        }

        async fn delete(&self, id: &str) -> Result<(), ApiError> {
            self.record(format!("delete {id}"))?;
            self.rows.borrow_mut().retain(|row| row.id != id);
            Ok(())
        }

        async fn archive(&self, id: &str) -> Result<(), ApiError> {
            self.record(format!("archive {id}"))?;
            self.set_archived(id, true);
            Ok(())
        }

        async fn restore(&self, id: &str) -> Result<(), ApiError> {
            self.record(format!("restore {id}"))?;
            self.set_archived(id, false);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeCategories;
    use super::*;
    use crate::models::Category;
    use leptos_listview::{compute_visible, filtered_count, ListState};

    fn categories(count: usize) -> Vec<Category> {
        (1..=count)
            .map(|i| {
                serde_json::from_value(serde_json::json!({
                    "_id": format!("c{i}"),
                    "label": format!("Cat {i:02}"),
                }))
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_base_url_per_root() {
        assert_eq!(base_url("http://host:5000/api", ApiRoot::Api), "http://host:5000/api");
        assert_eq!(base_url("http://host:5000/api/", ApiRoot::Bare), "http://host:5000");
        assert_eq!(base_url("http://host:5000", ApiRoot::Bare), "http://host:5000");
    }

    #[test]
    fn test_resource_url_encodes_ids() {
        assert_eq!(resource_url("http://h/api", "products", &[]), "http://h/api/products");
        assert_eq!(
            resource_url("http://h/api", "/products/", &["a b/c", "archive"]),
            "http://h/api/products/a%20b%2Fc/archive"
        );
    }

    #[tokio::test]
    async fn test_mutation_then_refetch_replaces_list() {
        let api = FakeCategories::with(categories(6));
        let mut state = ListState::new("label");
        state.current_page = 2;

        let delete = Mutation::Delete("c6".into());
        let list: Vec<Category> = mutate_then_list(&api, &delete).await.unwrap();
        state.clamp_page(filtered_count(&list, &state));

        assert_eq!(*api.calls.borrow(), vec!["delete c6", "list"]);
        assert_eq!(state.current_page, 1);
        assert_eq!(compute_visible(&list, &state).rows.len(), 5);
    }

    #[tokio::test]
    async fn test_archive_and_restore_move_items_between_views() {
        let api = FakeCategories::with(categories(3));
        let mut state = ListState::new("label");

        let archive = Mutation::Archive("c2".into());
        let list: Vec<Category> = mutate_then_list(&api, &archive).await.unwrap();
        assert_eq!(compute_visible(&list, &state).filtered_count, 2);

        state.set_archive_view(true);
        assert_eq!(compute_visible(&list, &state).rows[0].id, "c2");

        let restore = Mutation::Restore("c2".into());
        let list: Vec<Category> = mutate_then_list(&api, &restore).await.unwrap();
        assert_eq!(compute_visible(&list, &state).filtered_count, 0);
    }

    #[tokio::test]
    async fn test_rejected_mutation_skips_refetch() {
        let api = FakeCategories::with(categories(2));
        *api.fail_next.borrow_mut() = Some(ApiError::Status {
            status: 409,
            message: "Category in use".into(),
        });

        let delete = Mutation::Delete("c1".into());
        let result: Result<Vec<Category>, _> = mutate_then_list(&api, &delete).await;
        assert_eq!(
            result,
            Err(MutationFailure::Rejected(ApiError::Status {
                status: 409,
                message: "Category in use".into()
            }))
        );
        assert_eq!(*api.calls.borrow(), vec!["delete c1"]);
        assert_eq!(api.rows.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_create_and_update_round_through_payloads() {
        let api = FakeCategories::with(Vec::new());
        let created: Vec<Category> = mutate_then_list(
            &api,
            &Mutation::Create {
                payload: serde_json::json!({"label": "Drinks"}),
                photo: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(created[0].label, "Drinks");

        let updated: Vec<Category> = mutate_then_list(
            &api,
            &Mutation::Update {
                id: created[0].id.clone(),
                payload: serde_json::json!({"label": "Cold drinks"}),
                photo: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated[0].label, "Cold drinks");
    }
}
