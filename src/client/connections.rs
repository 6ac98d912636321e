use crate::domain::{Connection, ConnectionRef, ConnectionUpdate, PasswordReset, TokenReset};
use crate::transport::{
    encode_get_connection, encode_list_connections, encode_reset_connection_password,
    encode_reset_connection_token, encode_update_connection,
};

use super::{BeepsendClient, BeepsendError};

/// Connections are the sending endpoints of a customer; each one has its own token and balance.
#[derive(Clone, Copy)]
pub struct ConnectionsApi<'a> {
    pub(super) client: &'a BeepsendClient,
}

impl ConnectionsApi<'_> {
    pub async fn list(&self) -> Result<Vec<Connection>, BeepsendError> {
        self.client.execute(encode_list_connections()).await
    }

    pub async fn get(&self, connection: impl Into<ConnectionRef>) -> Result<Connection, BeepsendError> {
        self.client
            .execute(encode_get_connection(connection.into()))
            .await
    }

    /// Update label, description, system id or callback settings.
    ///
    /// Errors:
    /// - [`BeepsendError::Validation`] when the update carries no changes; nothing is sent.
    pub async fn update(
        &self,
        connection: impl Into<ConnectionRef>,
        update: &ConnectionUpdate,
    ) -> Result<Connection, BeepsendError> {
        update.ensure_changes()?;
        self.client
            .execute(encode_update_connection(connection.into(), update))
            .await
    }

    /// Issue a new API token for the connection. The old token stops working.
    pub async fn reset_token(
        &self,
        connection: impl Into<ConnectionRef>,
    ) -> Result<TokenReset, BeepsendError> {
        self.client
            .execute(encode_reset_connection_token(connection.into()))
            .await
    }

    /// Issue a new SMPP password for the connection.
    pub async fn reset_password(
        &self,
        connection: impl Into<ConnectionRef>,
    ) -> Result<PasswordReset, BeepsendError> {
        self.client
            .execute(encode_reset_connection_password(connection.into()))
            .await
    }
}
