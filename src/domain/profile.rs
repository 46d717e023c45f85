use serde::{Deserialize, Serialize};

use crate::domain::types::{DisplayName, ImageUrl, UserId};

/// Public profile attached to an auth provider subject.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: Option<DisplayName>,
    pub avatar_url: Option<ImageUrl>,
    pub is_admin: bool,
}
