use std::collections::HashMap;

use serde::{Deserialize, Serialize};

id_struct!(UserId, "user");
/// User profile.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Profile {
    pub id: UserId,
    pub username: String,
}

/// User as shown next to a record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicUser {
    pub user_id: UserId,
    pub username: String,
}

impl PublicUser {
    pub fn make_name(username: Option<&str>, id: UserId) -> String {
        match username {
            Some(name) => name.to_string(),
            None => format!("#{id}"),
        }
    }
}

/// Lookup table from user ID to profile.
#[derive(Debug, Default, Clone)]
pub struct ProfileDirectory {
    profiles: HashMap<UserId, Profile>,
}

impl ProfileDirectory {
    pub fn get(&self, id: UserId) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    /// Returns the public view of a user. Users without a profile are named
    /// after their ID.
    pub fn public_user(&self, id: UserId) -> PublicUser {
        PublicUser {
            user_id: id,
            username: PublicUser::make_name(self.get(id).map(|p| p.username.as_str()), id),
        }
    }
}

impl FromIterator<Profile> for ProfileDirectory {
    fn from_iter<T: IntoIterator<Item = Profile>>(iter: T) -> Self {
        Self {
            profiles: iter.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}
