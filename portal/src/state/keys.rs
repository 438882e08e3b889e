//! Well-known storage keys and change notifications.

use std::fmt;

/// Keys of the shared session attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Display name derived from the profile.
    Name,
    /// Avatar image URL.
    ImageUrl,
    /// Serialized [`shared::SessionUser`]; present while logged in.
    User,
    /// `"true"` or `"false"` as reported by the last login.
    IsNewUser,
}

impl StoreKey {
    /// Everything that belongs to a session and goes away on logout.
    pub const SESSION: [StoreKey; 4] = [
        StoreKey::Name,
        StoreKey::ImageUrl,
        StoreKey::User,
        StoreKey::IsNewUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Name => "name",
            StoreKey::ImageUrl => "imageUrl",
            StoreKey::User => "user",
            StoreKey::IsNewUser => "is_new_user",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload-less "go re-read" signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    LoginSuccess,
    NameUpdated,
    AvatarUpdated,
}

impl Notification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Notification::LoginSuccess => "login-success",
            Notification::NameUpdated => "name-updated",
            Notification::AvatarUpdated => "avatar-updated",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
