//! Endpoint descriptors and the per-call request they produce.
//!
//! Every API operation is one [`Operation`] constant: method, path template,
//! auth schemes and declared response shape. Resource façades turn a
//! constant into an [`ApiRequest`] by filling path parameters and attaching
//! query/body parts, then hand it to the base client.

use bytes::Bytes;
use serde_json::Value;

use crate::decode::{OrBinary, ResponseShape};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse, RequestBody};
use crate::models::{ApiResponse, Order, Pet, StoreInventory, User};
use crate::options::RequestOptions;
use crate::query::{encode_query_param, QueryParams, QueryStyle};

/// Static description of one API operation.
#[derive(Debug)]
pub struct Operation<T> {
    pub id: &'static str,
    pub method: HttpMethod,
    /// Path relative to the base URL, with `{name}` placeholders.
    pub path: &'static str,
    pub auth: &'static [&'static str],
    pub shape: fn() -> ResponseShape<T>,
}

impl<T> Operation<T> {
    /// Start a request with the placeholders in `path` replaced by `params`.
    ///
    /// Values are percent-encoded as single path segments. A placeholder
    /// without a matching parameter is a configuration error.
    pub fn request(&self, params: &[(&str, &str)]) -> Result<ApiRequest<T>, ApiError> {
        Ok(ApiRequest {
            method: self.method,
            path: substitute_params(self.path, params)?,
            auth_names: self.auth,
            query: QueryParams::new(),
            body: None,
            cast_to: (self.shape)(),
            options: None,
        })
    }
}

fn substitute_params(template: &str, params: &[(&str, &str)]) -> Result<String, ApiError> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let end = rest[start..].find('}').map(|i| start + i).ok_or_else(|| {
            ApiError::Configuration(format!("unterminated placeholder in `{template}`"))
        })?;
        let name = &rest[start + 1..end];
        let value = params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
            .ok_or_else(|| {
                ApiError::Configuration(format!("missing path parameter `{name}` for `{template}`"))
            })?;
        path.push_str(&rest[..start]);
        path.push_str(&urlencoding::encode(value));
        rest = &rest[end + 1..];
    }
    path.push_str(rest);
    Ok(path)
}

/// One call to the base client: everything `request(...)` needs.
#[derive(Debug)]
pub struct ApiRequest<T> {
    pub method: HttpMethod,
    /// Path with all placeholders already substituted.
    pub path: String,
    pub auth_names: &'static [&'static str],
    pub query: QueryParams,
    pub body: Option<RequestBody>,
    pub cast_to: ResponseShape<T>,
    pub options: Option<RequestOptions>,
}

impl<T> ApiRequest<T> {
    /// Add a query parameter already converted by `to_encodable`.
    pub fn query_param(mut self, name: &str, value: &Value, style: QueryStyle, explode: bool) -> Self {
        encode_query_param(&mut self.query, name, value, style, explode);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn content(mut self, content: Bytes, content_type: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Bytes {
            content,
            content_type: content_type.into(),
        });
        self
    }

    pub fn options(mut self, options: Option<RequestOptions>) -> Self {
        self.options = options;
        self
    }
}

const API_KEY: &[&str] = &["api_key"];

pub const DELETE_PET: Operation<HttpResponse> = Operation {
    id: "pet.delete",
    method: HttpMethod::Delete,
    path: "/pet/{petId}",
    auth: API_KEY,
    shape: ResponseShape::<HttpResponse>::raw,
};

pub const FIND_PETS_BY_STATUS: Operation<OrBinary<Vec<Pet>>> = Operation {
    id: "pet.find_by_status",
    method: HttpMethod::Get,
    path: "/pet/findByStatus",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<Vec<Pet>>>::json_or_binary,
};

pub const FIND_PETS_BY_TAGS: Operation<OrBinary<Vec<Pet>>> = Operation {
    id: "pet.find_by_tags",
    method: HttpMethod::Get,
    path: "/pet/findByTags",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<Vec<Pet>>>::json_or_binary,
};

pub const GET_PET: Operation<OrBinary<Pet>> = Operation {
    id: "pet.get",
    method: HttpMethod::Get,
    path: "/pet/{petId}",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<Pet>>::json_or_binary,
};

pub const CREATE_PET: Operation<OrBinary<Pet>> = Operation {
    id: "pet.create",
    method: HttpMethod::Post,
    path: "/pet",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<Pet>>::json_or_binary,
};

pub const UPLOAD_PET_IMAGE: Operation<ApiResponse> = Operation {
    id: "pet.upload_image",
    method: HttpMethod::Post,
    path: "/pet/{petId}/uploadImage",
    auth: API_KEY,
    shape: ResponseShape::<ApiResponse>::json,
};

pub const UPDATE_PET: Operation<OrBinary<Pet>> = Operation {
    id: "pet.update",
    method: HttpMethod::Put,
    path: "/pet",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<Pet>>::json_or_binary,
};

pub const LIST_INVENTORY: Operation<StoreInventory> = Operation {
    id: "store.inventory.list",
    method: HttpMethod::Get,
    path: "/store/inventory",
    auth: API_KEY,
    shape: ResponseShape::<StoreInventory>::json,
};

pub const DELETE_ORDER: Operation<HttpResponse> = Operation {
    id: "store.order.delete",
    method: HttpMethod::Delete,
    path: "/store/order/{orderId}",
    auth: API_KEY,
    shape: ResponseShape::<HttpResponse>::raw,
};

pub const GET_ORDER: Operation<OrBinary<Order>> = Operation {
    id: "store.order.get",
    method: HttpMethod::Get,
    path: "/store/order/{orderId}",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<Order>>::json_or_binary,
};

pub const CREATE_ORDER: Operation<Order> = Operation {
    id: "store.order.create",
    method: HttpMethod::Post,
    path: "/store/order",
    auth: API_KEY,
    shape: ResponseShape::<Order>::json,
};

pub const DELETE_USER: Operation<HttpResponse> = Operation {
    id: "user.delete",
    method: HttpMethod::Delete,
    path: "/user/{username}",
    auth: API_KEY,
    shape: ResponseShape::<HttpResponse>::raw,
};

pub const LOGIN_USER: Operation<OrBinary<String>> = Operation {
    id: "user.login",
    method: HttpMethod::Get,
    path: "/user/login",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<String>>::json_or_binary,
};

pub const LOGOUT_USER: Operation<HttpResponse> = Operation {
    id: "user.logout",
    method: HttpMethod::Get,
    path: "/user/logout",
    auth: API_KEY,
    shape: ResponseShape::<HttpResponse>::raw,
};

pub const GET_USER: Operation<OrBinary<User>> = Operation {
    id: "user.get",
    method: HttpMethod::Get,
    path: "/user/{username}",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<User>>::json_or_binary,
};

pub const CREATE_USER: Operation<OrBinary<User>> = Operation {
    id: "user.create",
    method: HttpMethod::Post,
    path: "/user",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<User>>::json_or_binary,
};

pub const CREATE_USERS_WITH_LIST: Operation<OrBinary<User>> = Operation {
    id: "user.create_with_list",
    method: HttpMethod::Post,
    path: "/user/createWithList",
    auth: API_KEY,
    shape: ResponseShape::<OrBinary<User>>::json_or_binary,
};

pub const UPDATE_USER: Operation<HttpResponse> = Operation {
    id: "user.update",
    method: HttpMethod::Put,
    path: "/user/{username}",
    auth: API_KEY,
    shape: ResponseShape::<HttpResponse>::raw,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parameters_are_substituted() {
        let request = GET_PET.request(&[("petId", "123")]).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "/pet/123");
        assert_eq!(request.auth_names, &["api_key"]);
        assert!(request.body.is_none());
    }

    #[test]
    fn path_parameters_are_percent_encoded() {
        let request = GET_USER.request(&[("username", "john doe/1")]).unwrap();
        assert_eq!(request.path, "/user/john%20doe%2F1");
    }

    #[test]
    fn nested_template_keeps_suffix() {
        let request = UPLOAD_PET_IMAGE.request(&[("petId", "7")]).unwrap();
        assert_eq!(request.path, "/pet/7/uploadImage");
    }

    #[test]
    fn missing_path_parameter_is_configuration_error() {
        let err = DELETE_ORDER.request(&[]).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn query_parameters_accumulate_in_order() {
        let request = FIND_PETS_BY_TAGS
            .request(&[])
            .unwrap()
            .query_param("tags", &serde_json::json!(["a", "b"]), QueryStyle::Form, true);
        assert_eq!(
            request.query.get_all("tags").collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }
}
