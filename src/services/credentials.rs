use crate::backend::{AuthApi, Credentials, Session};
use crate::common::CredentialError;

/// Role stored in the metadata of every account created from the dashboard.
pub const ADMIN_ROLE: &str = "admin";

/// Sign-in and sign-up against the auth surface.
pub struct CredentialFlow<'a, A: ?Sized> {
    auth: &'a A,
}

impl<'a, A: AuthApi + ?Sized> CredentialFlow<'a, A> {
    pub fn new(auth: &'a A) -> Self {
        Self { auth }
    }

    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, CredentialError> {
        let credentials = Credentials::new(email, password)?;
        let session = self.auth.sign_in_with_password(&credentials).await?;
        log::info!("administrator {} signed in", session.user.id);
        Ok(session)
    }

    /// Creates an admin account, then signs in with the same credentials.
    ///
    /// The sign-up answer is not used as a session: with confirmation
    /// bypassed it may not carry one.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, CredentialError> {
        let credentials = Credentials::new(email, password)?;
        let user = self.auth.sign_up(&credentials, ADMIN_ROLE).await?;
        log::info!("administrator account {} created", user.id);

        let session = self.auth.sign_in_with_password(&credentials).await?;
        Ok(session)
    }
}
