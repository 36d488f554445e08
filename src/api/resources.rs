//! Resource Table
//!
//! Route, root and upload behavior of every backend resource, in one place.
//! Some resources sit beside the `/api` prefix rather than under it; that
//! split mirrors the backend's route table and is kept as-is.

use super::ApiRoot;

/// How a photo travels with a create/update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhotoUpload {
    /// Resource takes no photo
    Unsupported,
    /// Multipart to the regular route
    SameRoute,
    /// Creates go to `{resource}/upload`, updates to the regular route
    UploadRoute,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ResourceDef {
    /// Human name, singular
    pub name: &'static str,
    pub path: &'static str,
    pub root: ApiRoot,
    pub photo: PhotoUpload,
}

pub static CATEGORIES: ResourceDef = ResourceDef {
    name: "category",
    path: "categories",
    root: ApiRoot::Api,
    photo: PhotoUpload::Unsupported,
};

pub static MENUS: ResourceDef = ResourceDef {
    name: "menu",
    path: "menus",
    root: ApiRoot::Api,
    photo: PhotoUpload::SameRoute,
};

pub static PRODUCTS: ResourceDef = ResourceDef {
    name: "product",
    path: "products",
    root: ApiRoot::Api,
    photo: PhotoUpload::UploadRoute,
};

pub static RECIPES: ResourceDef = ResourceDef {
    name: "recipe",
    path: "recipes",
    root: ApiRoot::Api,
    photo: PhotoUpload::UploadRoute,
};

pub static INGREDIENTS: ResourceDef = ResourceDef {
    name: "ingredient",
    path: "ingredients",
    root: ApiRoot::Bare,
    photo: PhotoUpload::Unsupported,
};

pub static USTENSILES: ResourceDef = ResourceDef {
    name: "ustensile",
    path: "ustensiles",
    root: ApiRoot::Bare,
    photo: PhotoUpload::SameRoute,
};

pub static VARIANTS: ResourceDef = ResourceDef {
    name: "variant",
    path: "variants",
    root: ApiRoot::Api,
    photo: PhotoUpload::Unsupported,
};

pub static DISHES_OF_DAY: ResourceDef = ResourceDef {
    name: "dish of the day",
    path: "dish-of-the-day",
    root: ApiRoot::Api,
    photo: PhotoUpload::Unsupported,
};

pub static USERS: ResourceDef = ResourceDef {
    name: "user",
    path: "users",
    root: ApiRoot::Api,
    photo: PhotoUpload::Unsupported,
};
