use super::{with_optional_json, with_query};
use crate::base::BaseClient;
use crate::decode::OrBinary;
use crate::http::HttpResponse;
use crate::models::User;
use crate::operation::{
    CREATE_USER, CREATE_USERS_WITH_LIST, DELETE_USER, GET_USER, LOGIN_USER, LOGOUT_USER,
    UPDATE_USER,
};
use crate::options::RequestOptions;
use crate::param::Param;
use crate::params;
use crate::transport::Dispatch;

/// Operations on `/user`.
#[derive(Debug)]
pub struct UserClient<'a, D> {
    base: &'a BaseClient<D>,
}

impl<'a, D: Dispatch + 'a> UserClient<'a, D> {
    pub(crate) fn new(base: &'a BaseClient<D>) -> Self {
        Self { base }
    }

    /// `DELETE /user/{username}`
    pub fn delete(&self, username: &str, options: Option<RequestOptions>) -> D::Output<'a, HttpResponse> {
        self.base
            .request_with(|| Ok(DELETE_USER.request(&[("username", username)])?.options(options)))
    }

    /// Logs a user in. The server answers with a session token string.
    ///
    /// `GET /user/login`
    pub fn login(
        &self,
        password: impl Into<Param<String>>,
        username: impl Into<Param<String>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<String>> {
        let password = password.into();
        let username = username.into();
        self.base.request_with(|| {
            let request = LOGIN_USER.request(&[])?;
            let request = with_query::<String, _, _>(request, "password", &password)?;
            Ok(with_query::<String, _, _>(request, "username", &username)?.options(options))
        })
    }

    /// `GET /user/logout`
    pub fn logout(&self, options: Option<RequestOptions>) -> D::Output<'a, HttpResponse> {
        self.base
            .request_with(|| Ok(LOGOUT_USER.request(&[])?.options(options)))
    }

    /// `GET /user/{username}`
    pub fn get(&self, username: &str, options: Option<RequestOptions>) -> D::Output<'a, OrBinary<User>> {
        self.base
            .request_with(|| Ok(GET_USER.request(&[("username", username)])?.options(options)))
    }

    /// `POST /user`
    pub fn create(
        &self,
        user: impl Into<Param<params::User>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<User>> {
        let user = user.into();
        self.base.request_with(|| {
            let request = CREATE_USER.request(&[])?;
            Ok(with_optional_json::<params::User, _, _>(request, &user)?.options(options))
        })
    }

    /// Creates several users in one call.
    ///
    /// `POST /user/createWithList`
    pub fn create_with_list(
        &self,
        users: impl Into<Param<Vec<params::User>>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<User>> {
        let users = users.into();
        self.base.request_with(|| {
            let request = CREATE_USERS_WITH_LIST.request(&[])?;
            Ok(with_optional_json::<Vec<params::User>, _, _>(request, &users)?.options(options))
        })
    }

    /// `PUT /user/{username}`
    pub fn update(
        &self,
        username: &str,
        user: impl Into<Param<params::User>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, HttpResponse> {
        let user = user.into();
        self.base.request_with(|| {
            let request = UPDATE_USER.request(&[("username", username)])?;
            Ok(with_optional_json::<params::User, _, _>(request, &user)?.options(options))
        })
    }
}
