use crate::core::options::Credentials;
use crate::request::AuthenticationInfo;
use crate::{Error, Result};

/// Builds the engine's authentication info.
///
/// Password strength is not checked and an empty password is accepted.
/// IAM settings replace password authentication and require a username.
pub(crate) fn extract_credentials(
    credentials: Option<&Credentials>,
) -> Result<Option<AuthenticationInfo>> {
    let Some(credentials) = credentials else {
        return Ok(None);
    };

    if let Some(iam) = &credentials.iam_config {
        if credentials.username.is_none() {
            return Err(Error::validation(
                "credentials",
                "IAM authentication requires a username",
            ));
        }
        return Ok(Some(AuthenticationInfo {
            username: credentials.username.clone(),
            password: None,
            iam_config: Some(iam.clone()),
        }));
    }

    Ok(Some(AuthenticationInfo {
        username: credentials.username.clone(),
        password: credentials.password.clone(),
        iam_config: None,
    }))
}
