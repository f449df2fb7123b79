use std::collections::HashSet;

use crate::domain::auth::models::EmailAddress;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::Username;

/// Command to create a new user with validated fields.
#[derive(Debug)]
pub struct CreateUserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub roles: HashSet<Role>,
    pub active: bool,
}

impl CreateUserCommand {
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: String,
        roles: HashSet<Role>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            roles,
            active: true,
        }
    }
}
