use crate::domain::{
    EmailAddress, EmailChange, PasswordChange, TokenReset, User, UserRef, UserUpdate,
};
use crate::transport::{
    encode_get_me, encode_request_password_reset, encode_reset_user_token, encode_update_email,
    encode_update_password, encode_update_user,
};

use super::{BeepsendClient, BeepsendError};

#[derive(Clone, Copy)]
pub struct UsersApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl UsersApi<'_> {
    /// The user the token belongs to.
    pub async fn me(&self) -> Result<User, BeepsendError> {
        self.client.execute(encode_get_me()).await
    }

    /// Update name and/or phone of the current user.
    ///
    /// Errors:
    /// - [`BeepsendError::Validation`] when neither field is set; nothing is sent.
    pub async fn update(&self, update: &UserUpdate) -> Result<User, BeepsendError> {
        update.ensure_changes()?;
        self.client.execute(encode_update_user(update)).await
    }

    /// Change the login e-mail. The current password confirms the change.
    pub async fn update_email(&self, change: &EmailChange) -> Result<(), BeepsendError> {
        self.client.execute_empty(encode_update_email(change)).await
    }

    pub async fn update_password(&self, change: &PasswordChange) -> Result<(), BeepsendError> {
        self.client
            .execute_empty(encode_update_password(change))
            .await
    }

    /// Ask Beepsend to mail a password reset link to `email`.
    pub async fn request_password_reset(&self, email: &EmailAddress) -> Result<(), BeepsendError> {
        self.client
            .execute_empty(encode_request_password_reset(email))
            .await
    }

    /// Issue a new user token. The old token stops working.
    pub async fn reset_token(&self, user: impl Into<UserRef>) -> Result<TokenReset, BeepsendError> {
        self.client
            .execute(encode_reset_user_token(user.into()))
            .await
    }
}
