//! Identity Entity
//!
//! A registered user: the unique user name and its password digest.

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct Identity {
    pub user_name: UserName,
    pub password_hash: UserPassword,
}

impl Identity {
    pub fn new(user_name: UserName, password_hash: UserPassword) -> Self {
        Self {
            user_name,
            password_hash,
        }
    }
}
