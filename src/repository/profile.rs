use diesel::prelude::*;

use crate::domain::profile::Profile;
use crate::domain::types::UserId;
use crate::models::profile::Profile as DbProfile;
use crate::repository::{DieselRepository, ProfileReader, RepositoryResult};

impl ProfileReader for DieselRepository {
    fn get_profile(&self, user_id: &UserId) -> RepositoryResult<Option<Profile>> {
        use crate::schema::profiles;

        let mut conn = self.conn()?;

        let profile = profiles::table
            .filter(profiles::user_id.eq(user_id.as_str()))
            .first::<DbProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(TryInto::try_into).transpose()?)
    }
}
