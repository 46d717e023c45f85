use diesel::prelude::*;

use crate::domain::profile::Profile as DomainProfile;
use crate::domain::types::{DisplayName, ImageUrl, TypeConstraintError, UserId};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(primary_key(user_id))]
pub struct Profile {
    pub user_id: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}

impl TryFrom<Profile> for DomainProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: UserId::new(profile.user_id)?,
            display_name: profile.display_name.map(DisplayName::new).transpose()?,
            avatar_url: profile.avatar_url.map(ImageUrl::new).transpose()?,
            is_admin: profile.is_admin,
        })
    }
}
