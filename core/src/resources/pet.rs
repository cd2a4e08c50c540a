use bytes::Bytes;

use super::with_query;
use crate::base::BaseClient;
use crate::decode::OrBinary;
use crate::encode::to_encodable;
use crate::http::HttpResponse;
use crate::models::{ApiResponse, Pet, PetStatus};
use crate::operation::{
    CREATE_PET, DELETE_PET, FIND_PETS_BY_STATUS, FIND_PETS_BY_TAGS, GET_PET, UPDATE_PET,
    UPLOAD_PET_IMAGE,
};
use crate::options::RequestOptions;
use crate::param::Param;
use crate::params;
use crate::transport::Dispatch;

/// Operations on `/pet`.
#[derive(Debug)]
pub struct PetClient<'a, D> {
    base: &'a BaseClient<D>,
}

impl<'a, D: Dispatch + 'a> PetClient<'a, D> {
    pub(crate) fn new(base: &'a BaseClient<D>) -> Self {
        Self { base }
    }

    /// Deletes a pet.
    ///
    /// `DELETE /pet/{petId}`. Any 2xx answer is returned as is.
    pub fn delete(&self, pet_id: i64, options: Option<RequestOptions>) -> D::Output<'a, HttpResponse> {
        let pet_id = pet_id.to_string();
        self.base
            .request_with(|| Ok(DELETE_PET.request(&[("petId", pet_id.as_str())])?.options(options)))
    }

    /// Finds pets by status.
    ///
    /// `GET /pet/findByStatus`
    pub fn find_by_status(
        &self,
        status: impl Into<Param<PetStatus>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<Vec<Pet>>> {
        let status = status.into();
        self.base.request_with(|| {
            let request = FIND_PETS_BY_STATUS.request(&[])?;
            Ok(with_query::<PetStatus, _, _>(request, "status", &status)?.options(options))
        })
    }

    /// Finds pets by tags. Each tag is sent as its own `tags=` pair.
    ///
    /// `GET /pet/findByTags`
    pub fn find_by_tags(
        &self,
        tags: impl Into<Param<Vec<String>>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<Vec<Pet>>> {
        let tags = tags.into();
        self.base.request_with(|| {
            let request = FIND_PETS_BY_TAGS.request(&[])?;
            Ok(with_query::<Vec<String>, _, _>(request, "tags", &tags)?.options(options))
        })
    }

    /// Find pet by ID.
    ///
    /// `GET /pet/{petId}`
    pub fn get(&self, pet_id: i64, options: Option<RequestOptions>) -> D::Output<'a, OrBinary<Pet>> {
        let pet_id = pet_id.to_string();
        self.base
            .request_with(|| Ok(GET_PET.request(&[("petId", pet_id.as_str())])?.options(options)))
    }

    /// Add a new pet to the store.
    ///
    /// `POST /pet`
    pub fn create(
        &self,
        pet: &params::Pet,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<Pet>> {
        self.base.request_with(|| {
            let body = to_encodable::<params::Pet>(pet)?;
            Ok(CREATE_PET.request(&[])?.json(body).options(options))
        })
    }

    /// Uploads an image for a pet as `application/octet-stream`.
    ///
    /// `POST /pet/{petId}/uploadImage`
    pub fn upload_image(
        &self,
        pet_id: i64,
        additional_metadata: impl Into<Param<String>>,
        data: impl Into<Param<Bytes>>,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, ApiResponse> {
        let pet_id = pet_id.to_string();
        let additional_metadata = additional_metadata.into();
        let data = data.into();
        self.base.request_with(|| {
            let request = UPLOAD_PET_IMAGE.request(&[("petId", pet_id.as_str())])?;
            let mut request =
                with_query::<String, _, _>(request, "additionalMetadata", &additional_metadata)?;
            if let Param::Value(content) = data {
                if !content.is_empty() {
                    request = request.content(content, "application/octet-stream");
                }
            }
            Ok(request.options(options))
        })
    }

    /// Update an existing pet by ID.
    ///
    /// `PUT /pet`
    pub fn update(
        &self,
        pet: &params::Pet,
        options: Option<RequestOptions>,
    ) -> D::Output<'a, OrBinary<Pet>> {
        self.base.request_with(|| {
            let body = to_encodable::<params::Pet>(pet)?;
            Ok(UPDATE_PET.request(&[])?.json(body).options(options))
        })
    }
}
