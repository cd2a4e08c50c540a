//! Request body schemas.
//!
//! Every optional field is a [`Param`], so a caller can leave it out, send
//! an explicit null, or send a value. Wire names match the response models.

use serde::{Deserialize, Serialize};

use crate::models::{OrderStatus, PetStatus};
use crate::param::Param;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub id: Param<i64>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub name: Param<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub id: Param<i64>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub name: Param<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub category: Param<Category>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub id: Param<i64>,
    pub name: String,
    #[serde(rename = "photoUrls", alias = "photo_urls")]
    pub photo_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub status: Param<PetStatus>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub tags: Param<Vec<Tag>>,
}

impl Pet {
    /// A pet with only the required fields set.
    pub fn new(name: impl Into<String>, photo_urls: Vec<String>) -> Self {
        Self {
            category: Param::NotGiven,
            id: Param::NotGiven,
            name: name.into(),
            photo_urls,
            status: Param::NotGiven,
            tags: Param::NotGiven,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub complete: Param<bool>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub id: Param<i64>,
    #[serde(
        rename = "petId",
        alias = "pet_id",
        default,
        skip_serializing_if = "Param::is_not_given"
    )]
    pub pet_id: Param<i64>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub quantity: Param<i64>,
    #[serde(
        rename = "shipDate",
        alias = "ship_date",
        default,
        skip_serializing_if = "Param::is_not_given"
    )]
    pub ship_date: Param<String>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub status: Param<OrderStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub email: Param<String>,
    #[serde(
        rename = "firstName",
        alias = "first_name",
        default,
        skip_serializing_if = "Param::is_not_given"
    )]
    pub first_name: Param<String>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub id: Param<i64>,
    #[serde(
        rename = "lastName",
        alias = "last_name",
        default,
        skip_serializing_if = "Param::is_not_given"
    )]
    pub last_name: Param<String>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub password: Param<String>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub phone: Param<String>,
    #[serde(
        rename = "userStatus",
        alias = "user_status",
        default,
        skip_serializing_if = "Param::is_not_given"
    )]
    pub user_status: Param<i64>,
    #[serde(default, skip_serializing_if = "Param::is_not_given")]
    pub username: Param<String>,
}
