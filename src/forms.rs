//! Sign-up and sign-in forms.

use serde::{Deserialize, Serialize};

use crate::auth::{hash_password, verify_password};
use crate::error::{AppError, FieldErrors, NON_FIELD_ERRORS};
use crate::models::{NewUser, User};
use crate::store::{Store, StoreError};

const USERNAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;

const REQUIRED: &str = "This field is required.";
const USERNAME_TAKEN: &str = "A user with that username already exists.";
const BAD_CREDENTIALS: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SignUpForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password1: String,
    #[serde(default, skip_serializing)]
    pub password2: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
}

fn valid_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(name, _)| !name.is_empty())
                && !domain.ends_with('.')
        }
        None => false,
    }
}

impl SignUpForm {
    /// Field checks that need no store access.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let username = self.username.trim();

        if username.is_empty() {
            errors.add("username", REQUIRED);
        } else {
            if username.chars().count() > USERNAME_MAX_LEN {
                errors.add(
                    "username",
                    format!("Ensure this value has at most {USERNAME_MAX_LEN} characters."),
                );
            }
            if !username.chars().all(valid_username_char) {
                errors.add(
                    "username",
                    "Enter a valid username. This value may contain only letters, \
                     numbers, and @/./+/-/_ characters.",
                );
            }
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.add("email", REQUIRED);
        } else if !looks_like_email(email) {
            errors.add("email", "Enter a valid email address.");
        }

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        }
        if errors.contains("password1") || errors.contains("password2") {
            return errors;
        }

        if self.password1 != self.password2 {
            errors.add("password2", "The two password fields didn't match.");
            return errors;
        }

        let password = &self.password2;
        if password.chars().count() < PASSWORD_MIN_LEN {
            errors.add(
                "password2",
                format!(
                    "This password is too short. \
                     It must contain at least {PASSWORD_MIN_LEN} characters."
                ),
            );
        }
        if password.chars().all(|c| c.is_ascii_digit()) {
            errors.add("password2", "This password is entirely numeric.");
        }
        if !username.is_empty() && password.to_lowercase() == username.to_lowercase() {
            errors.add("password2", "The password is too similar to the username.");
        }

        errors
    }
}

/// Validates the form and creates the account.
pub fn register(store: &dyn Store, form: &SignUpForm, bcrypt_cost: u32) -> Result<User, AppError> {
    let mut errors = form.validate();
    let username = form.username.trim();

    if !errors.contains("username") && store.user_by_username(username)?.is_some() {
        errors.add("username", USERNAME_TAKEN);
    }
    errors.into_result()?;

    let new_user = NewUser {
        username: username.to_string(),
        email: form.email.trim().to_string(),
        password_hash: hash_password(&form.password1, bcrypt_cost)?,
    };

    match store.create_user(new_user) {
        Ok(user) => {
            log::info!("Registered user {} ({})", user.id, user.username);
            Ok(user)
        }
        Err(StoreError::Conflict(_)) => {
            let mut errors = FieldErrors::new();
            errors.add("username", USERNAME_TAKEN);
            Err(AppError::Validation(errors))
        }
        Err(e) => Err(e.into()),
    }
}

/// Checks the credentials. Any mismatch is one form-level error, so the
/// response does not reveal which usernames exist.
pub fn authenticate(store: &dyn Store, form: &SignInForm) -> Result<User, AppError> {
    let mut errors = FieldErrors::new();

    if form.username.trim().is_empty() {
        errors.add("username", REQUIRED);
    }
    if form.password.is_empty() {
        errors.add("password", REQUIRED);
    }
    errors.into_result()?;

    let user = match store.user_by_username(form.username.trim())? {
        Some(user) if verify_password(&form.password, &user.password_hash)? => user,
        _ => {
            log::info!("Failed sign-in for {:?}", form.username);
            let mut errors = FieldErrors::new();
            errors.add(NON_FIELD_ERRORS, BAD_CREDENTIALS);
            return Err(AppError::Validation(errors));
        }
    };

    Ok(user)
}
