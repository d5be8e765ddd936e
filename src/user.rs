use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use trivia_lib::ids;

#[derive(Debug, Clone)]
pub struct User {
    pub id: ids::UserId,
    pub username: String,
    pub email: Option<String>,
    pub hash: String,
}

impl User {
    pub fn to_api(&self) -> trivia_api::auth::User {
        trivia_api::auth::User {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// in memory users keyed by id with a unique username index
#[derive(Debug, Default)]
pub struct Store {
    users: DashMap<ids::UserId, User>,
    usernames: DashMap<String, ids::UserId>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    /// inserts the user if the username is not taken. the user is handed back
    /// when it is
    pub fn insert(&self, user: User) -> Result<(), User> {
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(user),
            Entry::Vacant(vacant) => {
                let id = user.id.clone();

                self.users.insert(id.clone(), user);
                vacant.insert(id);

                Ok(())
            }
        }
    }

    pub fn get(&self, id: &ids::UserId) -> Option<User> {
        self.users.get(id).map(|v| v.value().clone())
    }

    pub fn username_exists(&self, username: &str) -> bool {
        self.usernames.contains_key(username)
    }

    pub fn find_username(&self, username: &str) -> Option<User> {
        let id = self.usernames.get(username)?.value().clone();

        self.get(&id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn user(username: &str) -> User {
        User {
            id: ids::UserId::gen(),
            username: username.into(),
            email: None,
            hash: String::new(),
        }
    }

    #[test]
    fn usernames_are_unique() {
        let store = Store::new();
        let first = user("player");

        assert!(store.insert(first.clone()).is_ok());
        assert!(store.insert(user("player")).is_err());
        assert!(store.username_exists("player"));

        let found = store.find_username("player").expect("user not found");

        assert_eq!(found.id, first.id);
        assert!(store.find_username("someone").is_none());
    }
}
