//! In-memory petstore server for integration tests.
//!
//! Serves the `/pet`, `/store` and `/user` routes of the petstore API from a
//! single shared [`Db`]. Every route requires a non-empty `api_key` header.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub photo_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complete: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<i64>,
}

/// Answer of `POST /pet/{petId}/uploadImage`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: i32,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Store {
    pets: HashMap<i64, Pet>,
    orders: HashMap<i64, Order>,
    users: HashMap<String, User>,
    next_id: i64,
}

impl Store {
    fn assign_id(&mut self, id: Option<i64>) -> i64 {
        match id {
            Some(id) => {
                self.next_id = self.next_id.max(id);
                id
            }
            None => {
                self.next_id = self.next_id.saturating_add(1);
                self.next_id
            }
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/pet", post(create_pet).put(update_pet))
        .route("/pet/findByStatus", get(find_pets_by_status))
        .route("/pet/findByTags", get(find_pets_by_tags))
        .route("/pet/{pet_id}", get(get_pet).delete(delete_pet))
        .route("/pet/{pet_id}/uploadImage", post(upload_image))
        .route("/store/inventory", get(inventory))
        .route("/store/order", post(create_order))
        .route("/store/order/{order_id}", get(get_order).delete(delete_order))
        .route("/user", post(create_user))
        .route("/user/createWithList", post(create_users_with_list))
        .route("/user/login", get(login))
        .route("/user/logout", get(logout))
        .route(
            "/user/{username}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .layer(middleware::from_fn(require_api_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "petstore mock listening");
    }
    axum::serve(listener, app()).await
}

async fn require_api_key(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get("api_key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| !v.is_empty());
    if !authorized {
        debug!(path = %request.uri().path(), "rejecting request without api_key");
        return (StatusCode::UNAUTHORIZED, "missing api_key").into_response();
    }
    next.run(request).await
}

type Params = Query<Vec<(String, String)>>;

fn values<'a>(params: &'a [(String, String)], name: &'a str) -> impl Iterator<Item = &'a str> {
    params
        .iter()
        .filter(move |(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

// --- pet ---

async fn create_pet(State(db): State<Db>, Json(mut pet): Json<Pet>) -> Json<Pet> {
    let mut store = db.write().await;
    let id = store.assign_id(pet.id);
    pet.id = Some(id);
    store.pets.insert(id, pet.clone());
    Json(pet)
}

async fn update_pet(
    State(db): State<Db>,
    Json(pet): Json<Pet>,
) -> Result<Json<Pet>, (StatusCode, &'static str)> {
    let id = pet.id.ok_or((StatusCode::BAD_REQUEST, "Invalid ID supplied"))?;
    let mut store = db.write().await;
    let slot = store
        .pets
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))?;
    *slot = pet.clone();
    Ok(Json(pet))
}

async fn find_pets_by_status(
    State(db): State<Db>,
    Query(params): Params,
) -> Result<Json<Vec<Pet>>, (StatusCode, &'static str)> {
    let status = values(&params, "status").next().unwrap_or("available");
    if !matches!(status, "available" | "pending" | "sold") {
        return Err((StatusCode::BAD_REQUEST, "Invalid status value"));
    }
    let store = db.read().await;
    let mut pets: Vec<Pet> = store
        .pets
        .values()
        .filter(|p| p.status.as_deref() == Some(status))
        .cloned()
        .collect();
    pets.sort_by_key(|p| p.id);
    Ok(Json(pets))
}

async fn find_pets_by_tags(State(db): State<Db>, Query(params): Params) -> Json<Vec<Pet>> {
    let wanted: Vec<&str> = values(&params, "tags").collect();
    let store = db.read().await;
    let mut pets: Vec<Pet> = store
        .pets
        .values()
        .filter(|p| {
            p.tags.iter().flatten().any(|t| {
                t.name
                    .as_deref()
                    .is_some_and(|name| wanted.contains(&name))
            })
        })
        .cloned()
        .collect();
    pets.sort_by_key(|p| p.id);
    Json(pets)
}

async fn get_pet(
    State(db): State<Db>,
    Path(pet_id): Path<i64>,
) -> Result<Json<Pet>, (StatusCode, &'static str)> {
    let store = db.read().await;
    store
        .pets
        .get(&pet_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))
}

async fn delete_pet(
    State(db): State<Db>,
    Path(pet_id): Path<i64>,
) -> Result<&'static str, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    store
        .pets
        .remove(&pet_id)
        .map(|_| "Pet deleted")
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))
}

async fn upload_image(
    State(db): State<Db>,
    Path(pet_id): Path<i64>,
    Query(params): Params,
    body: Bytes,
) -> Result<Json<ApiResponse>, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    let pet = store
        .pets
        .get_mut(&pet_id)
        .ok_or((StatusCode::NOT_FOUND, "Pet not found"))?;
    let file = format!("{}.png", Uuid::new_v4());
    pet.photo_urls.push(format!("/tmp/inflector/{file}"));

    let mut message = String::new();
    if let Some(metadata) = values(&params, "additionalMetadata").next() {
        message.push_str(&format!("additionalMetadata: {metadata}\n"));
    }
    message.push_str(&format!("File uploaded to ./{file}, {} bytes", body.len()));
    Ok(Json(ApiResponse {
        code: 200,
        kind: "unknown".to_string(),
        message,
    }))
}

// --- store ---

async fn inventory(State(db): State<Db>) -> Json<BTreeMap<String, i64>> {
    let store = db.read().await;
    let mut counts = BTreeMap::new();
    for status in store.pets.values().filter_map(|p| p.status.clone()) {
        *counts.entry(status).or_insert(0) += 1;
    }
    Json(counts)
}

async fn create_order(State(db): State<Db>, body: Bytes) -> Result<Json<Order>, StatusCode> {
    let mut order: Order = if body.is_empty() {
        Order::default()
    } else {
        serde_json::from_slice(&body).map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)?
    };
    let mut store = db.write().await;
    let id = store.assign_id(order.id);
    order.id = Some(id);
    order.status.get_or_insert_with(|| "placed".to_string());
    store.orders.insert(id, order.clone());
    Ok(Json(order))
}

async fn get_order(
    State(db): State<Db>,
    Path(order_id): Path<i64>,
) -> Result<Json<Order>, (StatusCode, &'static str)> {
    let store = db.read().await;
    store
        .orders
        .get(&order_id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Order not found"))
}

async fn delete_order(
    State(db): State<Db>,
    Path(order_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    store
        .orders
        .remove(&order_id)
        .map(|_| StatusCode::OK)
        .ok_or((StatusCode::NOT_FOUND, "Order not found"))
}

// --- user ---

fn insert_user(store: &mut Store, mut user: User) -> Result<User, (StatusCode, &'static str)> {
    let username = user
        .username
        .clone()
        .ok_or((StatusCode::BAD_REQUEST, "username is required"))?;
    let id = store.assign_id(user.id);
    user.id = Some(id);
    store.users.insert(username, user.clone());
    Ok(user)
}

async fn create_user(
    State(db): State<Db>,
    Json(user): Json<User>,
) -> Result<Json<User>, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    insert_user(&mut store, user).map(Json)
}

async fn create_users_with_list(
    State(db): State<Db>,
    Json(users): Json<Vec<User>>,
) -> Result<Json<User>, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    let mut first = None;
    for user in users {
        let created = insert_user(&mut store, user)?;
        first.get_or_insert(created);
    }
    first
        .map(Json)
        .ok_or((StatusCode::BAD_REQUEST, "no users supplied"))
}

async fn login(State(db): State<Db>, Query(params): Params) -> Response {
    let username = values(&params, "username").next().unwrap_or_default();
    let password = values(&params, "password").next().unwrap_or_default();
    let store = db.read().await;
    let valid = store
        .users
        .get(username)
        .is_some_and(|u| u.password.as_deref().unwrap_or_default() == password);
    if !valid {
        return (StatusCode::BAD_REQUEST, "Invalid username/password supplied").into_response();
    }
    let token = format!("logged in user session:{}", Uuid::new_v4().simple());
    ([("x-rate-limit", "5000")], Json(token)).into_response()
}

async fn logout() -> StatusCode {
    StatusCode::OK
}

async fn get_user(
    State(db): State<Db>,
    Path(username): Path<String>,
) -> Result<Json<User>, (StatusCode, &'static str)> {
    let store = db.read().await;
    store
        .users
        .get(&username)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))
}

async fn update_user(
    State(db): State<Db>,
    Path(username): Path<String>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    let existing = store
        .users
        .get_mut(&username)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))?;
    if !body.is_empty() {
        let update: User = serde_json::from_slice(&body)
            .map_err(|_| (StatusCode::UNPROCESSABLE_ENTITY, "invalid user"))?;
        let id = existing.id;
        *existing = User {
            id: update.id.or(id),
            username: Some(username.clone()),
            ..update
        };
    }
    Ok(StatusCode::OK)
}

async fn delete_user(
    State(db): State<Db>,
    Path(username): Path<String>,
) -> Result<StatusCode, (StatusCode, &'static str)> {
    let mut store = db.write().await;
    store
        .users
        .remove(&username)
        .map(|_| StatusCode::OK)
        .ok_or((StatusCode::NOT_FOUND, "User not found"))
}
