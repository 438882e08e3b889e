//! # Profile Endpoints

use lib_utils::validation::validate_not_empty;
use serde_json::Value;
use shared::{AvatarUpdateRequest, CompleteProfileRequest, Profile};

use super::client::ApiClient;
use super::endpoints;
use crate::core::error::{ApiError, Result};

/// Fetch the signed-in user's profile.
#[tracing::instrument(skip(client))]
pub async fn get_profile(client: &ApiClient) -> Result<Profile> {
    client.get(endpoints::COMPLETE_PROFILE).await
}

/// Save first name, last name and phone number.
#[tracing::instrument(skip(client, request))]
pub async fn complete_profile(client: &ApiClient, request: &CompleteProfileRequest) -> Result<Value> {
    validate_not_empty(&request.first_name, "First name").map_err(ApiError::Validation)?;
    validate_not_empty(&request.last_name, "Last name").map_err(ApiError::Validation)?;
    client.post(endpoints::COMPLETE_PROFILE, request).await
}

/// Point the avatar at an already-uploaded image.
#[tracing::instrument(skip(client))]
pub async fn update_avatar(client: &ApiClient, image_url: &str) -> Result<Value> {
    validate_not_empty(image_url, "Image URL").map_err(ApiError::Validation)?;
    let request = AvatarUpdateRequest {
        image_url: image_url.trim().to_string(),
    };
    client.post(endpoints::UPDATE_AVATAR, &request).await
}
