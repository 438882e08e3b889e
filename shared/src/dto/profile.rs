use serde::{Deserialize, Serialize};

/// Profile as returned by `GET /complete-profile/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Profile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Profile {
    /// Name shown in headers and menus: the first name, if the user has set one.
    pub fn display_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Profile update (`POST /complete-profile/`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompleteProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

/// Avatar update (`POST /update-avatar/`)
///
/// The image itself is uploaded to the media host beforehand; the backend only
/// records the resulting URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarUpdateRequest {
    pub image_url: String,
}
