//! Registrant sign-up: token, remote user, group membership, counter.

use tracing::{error, info, warn};

use eventengine_core::result::AppResult;
use eventengine_entity::{AccessToken, Registrant, RemoteUser, Session, TenantCredentials};

use super::service::SessionService;

impl SessionService {
    /// Register a person under a session.
    ///
    /// Each step runs only if the previous one succeeded and the failing
    /// step's error is returned. If group assignment or the counter update
    /// fails after the user was created, the user is deleted again on a
    /// best-effort basis.
    pub async fn register_user(
        &self,
        session_name: &str,
        registrant: &Registrant,
    ) -> AppResult<RemoteUser> {
        let session = self.get_session(session_name).await?;
        let creds = session.tenant_credentials(&self.tenant);
        let token = self.lacework.create_access_token(&creds).await?;

        let company = session.company_tag(&registrant.company);
        let user = self
            .lacework
            .create_user(
                &creds,
                &token,
                &registrant.display_name(),
                &registrant.email,
                &company,
            )
            .await?;

        let group = session.user_group(&self.default_user_group);
        if let Err(e) = self
            .lacework
            .assign_user_to_group(&creds, &token, &user.user_guid, group)
            .await
        {
            error!(
                session = %session.name,
                user_guid = %user.user_guid,
                group = %group,
                error = %e,
                "Group assignment failed after user creation, removing user"
            );
            self.remove_partial_user(&session, &creds, &token, &user).await;
            return Err(e);
        }

        let reg_count = match self.store.increment_reg_count(&session.name).await {
            Ok(count) => count,
            Err(e) => {
                error!(
                    session = %session.name,
                    user_guid = %user.user_guid,
                    error = %e,
                    "Counter update failed after user registration, removing user"
                );
                self.remove_partial_user(&session, &creds, &token, &user).await;
                return Err(e);
            }
        };
        info!(
            session = %session.name,
            user_guid = %user.user_guid,
            group = %group,
            reg_count,
            "User registered"
        );
        Ok(user)
    }

    async fn remove_partial_user(
        &self,
        session: &Session,
        creds: &TenantCredentials,
        token: &AccessToken,
        user: &RemoteUser,
    ) {
        if let Err(e) = self.lacework.delete_user(creds, token, &user.user_guid).await {
            warn!(
                session = %session.name,
                user_guid = %user.user_guid,
                error = %e,
                "Could not remove partially registered user"
            );
        }
    }
}
