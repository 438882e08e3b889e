//! # Session Service
//!
//! The single writer of the shared session attributes. Each operation talks
//! to the backend through [`ApiService`], stores what it learned, and then
//! publishes the matching notification so mounted views re-read.
//!
//! | Operation | Writes | Publishes |
//! |---|---|---|
//! | `login`, `google_signup`, `magic_login` | `user`, `is_new_user` | `login-success` |
//! | `load_profile`, `save_profile` | `name` | `name-updated` |
//! | `set_avatar`, `remove_avatar` | `imageUrl` | `avatar-updated` |
//! | `logout` | removes all session keys | all three |

use std::sync::Arc;

use lib_utils::validation::validate_not_empty;
use shared::{
    CompleteProfileRequest, GoogleSignupRequest, LoginRequest, LoginResponse, Profile,
    RegisterRequest, RegisterResponse,
};

use crate::core::error::{ApiError, Result};
use crate::core::service::ApiService;
use crate::state::{Notification, SessionStore, StoreKey};

#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn ApiService>,
    store: SessionStore,
}

impl SessionService {
    pub fn new(api: Arc<dyn ApiService>, store: SessionStore) -> Self {
        Self { api, store }
    }

    pub fn api(&self) -> &Arc<dyn ApiService> {
        &self.api
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let response = self.api.login(request).await?;
        self.record_login(&response)?;
        Ok(response)
    }

    /// Registration only sends the verification code; the session starts at
    /// the subsequent login.
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<RegisterResponse> {
        self.api.register(request).await
    }

    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn google_signup(&self, request: GoogleSignupRequest) -> Result<LoginResponse> {
        let response = self.api.google_signup(request).await?;
        self.record_login(&response)?;
        Ok(response)
    }

    #[tracing::instrument(skip(self, token))]
    pub async fn magic_login(&self, token: String) -> Result<LoginResponse> {
        let response = self.api.magic_login(token).await?;
        self.record_login(&response)?;
        Ok(response)
    }

    fn record_login(&self, response: &LoginResponse) -> Result<()> {
        let user = response.user.clone().unwrap_or_default();
        self.store.set_json(StoreKey::User, &user)?;
        self.store.set(
            StoreKey::IsNewUser,
            if response.new_user.unwrap_or(false) { "true" } else { "false" },
        )?;
        self.store.publish(Notification::LoginSuccess);
        tracing::info!("Session started");
        Ok(())
    }

    /// Fetch the profile and mirror its display name.
    #[tracing::instrument(skip(self))]
    pub async fn load_profile(&self) -> Result<Profile> {
        let profile = self.api.get_profile().await?;
        self.store_name(&profile)?;
        Ok(profile)
    }

    /// Save the profile, then mirror the new display name.
    #[tracing::instrument(skip(self, request))]
    pub async fn save_profile(&self, request: CompleteProfileRequest) -> Result<Profile> {
        let profile = Profile {
            first_name: Some(request.first_name.clone()),
            last_name: Some(request.last_name.clone()),
            phone: Some(request.phone.clone()),
            email: None,
        };
        self.api.complete_profile(request).await?;
        self.store_name(&profile)?;
        Ok(profile)
    }

    fn store_name(&self, profile: &Profile) -> Result<()> {
        match profile.display_name() {
            Some(name) => self.store.set(StoreKey::Name, name)?,
            None => self.store.remove(StoreKey::Name)?,
        }
        self.store.publish(Notification::NameUpdated);
        Ok(())
    }

    /// Show the new avatar everywhere, then record it on the backend.
    ///
    /// A backend failure is returned but the local value stays; the next
    /// profile load reconciles it.
    #[tracing::instrument(skip(self))]
    pub async fn set_avatar(&self, image_url: &str) -> Result<()> {
        validate_not_empty(image_url, "Image URL").map_err(ApiError::Validation)?;
        let image_url = image_url.trim();

        self.store
            .write_and_publish(StoreKey::ImageUrl, image_url, Notification::AvatarUpdated)?;
        self.api.update_avatar(image_url.to_string()).await?;
        Ok(())
    }

    /// Stop showing the avatar locally. The backend record is left as is.
    #[tracing::instrument(skip(self))]
    pub fn remove_avatar(&self) -> Result<()> {
        self.store.remove(StoreKey::ImageUrl)?;
        self.store.publish(Notification::AvatarUpdated);
        Ok(())
    }

    /// Forget credentials and every session attribute.
    #[tracing::instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.api.clear_credentials();
        for key in StoreKey::SESSION {
            self.store.remove(key)?;
        }
        self.store.publish(Notification::LoginSuccess);
        self.store.publish(Notification::NameUpdated);
        self.store.publish(Notification::AvatarUpdated);
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.store
            .get_json::<shared::SessionUser>(StoreKey::User)
            .is_some()
    }

    pub fn is_new_user(&self) -> bool {
        self.store.get(StoreKey::IsNewUser).as_deref() == Some("true")
    }

    /// Ask the backend whether the session is still valid. A negative answer
    /// clears the local session.
    #[tracing::instrument(skip(self))]
    pub async fn check_auth(&self) -> Result<bool> {
        let response = self.api.check_auth().await?;
        if !response.is_authenticated && self.is_logged_in() {
            tracing::info!("Backend session gone, clearing local state");
            self.logout()?;
        }
        Ok(response.is_authenticated)
    }
}
