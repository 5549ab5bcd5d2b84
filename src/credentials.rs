// Copyright 2025 Martin Pool

//! Find AWS access keys in the environment, a `.env` file, or the shared credentials file,
//! or ask for them.
//!
//! Credentials are returned to the caller and passed explicitly into the SDK config; the
//! process environment is never modified. When `AWS_PROFILE` names a profile, the shared
//! files are left to the SDK's own provider chain, which understands SSO and role profiles.

use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use ini::Ini;
use tracing::{debug, warn};

use crate::select::Prompt;
use crate::{Error, Result};

pub static ACCESS_KEY_ID_VAR: &str = "AWS_ACCESS_KEY_ID";
pub static SECRET_ACCESS_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";
pub static SESSION_TOKEN_VAR: &str = "AWS_SESSION_TOKEN";
pub static PROFILE_VAR: &str = "AWS_PROFILE";

/// Keys in a credentials file profile.
static ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
static SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";
static SESSION_TOKEN_KEY: &str = "aws_session_token";

static DEFAULT_PROFILE: &str = "default";

/// Shared credentials file, relative to home.
static DEFAULT_CREDENTIALS_FILE: &str = ".aws/credentials";

#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Present for temporary keys, such as from SSO or an assumed role.
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Make credentials if both parts are present and non-empty.
    pub fn from_pair(access_key_id: Option<&str>, secret_access_key: Option<&str>) -> Option<Self> {
        match (access_key_id, secret_access_key) {
            (Some(id), Some(secret)) if !id.trim().is_empty() && !secret.trim().is_empty() => {
                Some(AwsCredentials {
                    access_key_id: id.trim().to_owned(),
                    secret_access_key: secret.trim().to_owned(),
                    session_token: None,
                })
            }
            _ => None,
        }
    }

    /// Attach a session token, ignoring blank ones.
    pub fn with_session_token(self, session_token: Option<&str>) -> Self {
        AwsCredentials {
            session_token: session_token
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned),
            ..self
        }
    }

    fn from_vars(vars: &HashMap<String, String>) -> Option<Self> {
        AwsCredentials::from_pair(
            vars.get(ACCESS_KEY_ID_VAR).map(String::as_str),
            vars.get(SECRET_ACCESS_KEY_VAR).map(String::as_str),
        )
        .map(|credentials| {
            credentials.with_session_token(vars.get(SESSION_TOKEN_VAR).map(String::as_str))
        })
    }
}

impl Debug for AwsCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Where credentials were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    DotEnv(PathBuf),
    CredentialsFile(PathBuf),
    Prompt,
}

impl Display for CredentialSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment variables"),
            CredentialSource::DotEnv(path) => write!(f, "{}", path.display()),
            CredentialSource::CredentialsFile(path) => write!(f, "{}", path.display()),
            CredentialSource::Prompt => write!(f, "prompt"),
        }
    }
}

/// Looks for credentials in a fixed order of places.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    /// Credentials from the process environment, if both variables are set.
    from_env: Option<AwsCredentials>,
    /// A named profile from `AWS_PROFILE`, other than the default.
    profile: Option<String>,
    dotenv_path: PathBuf,
    credentials_path: PathBuf,
}

impl CredentialResolver {
    /// Look in the real environment, `./.env`, and the given or default credentials file.
    pub fn new(credentials_path: Option<&Path>) -> Result<Self> {
        let env: HashMap<String, String> = [
            ACCESS_KEY_ID_VAR,
            SECRET_ACCESS_KEY_VAR,
            SESSION_TOKEN_VAR,
            PROFILE_VAR,
        ]
        .into_iter()
        .filter_map(|name| std::env::var(name).ok().map(|v| (name.to_owned(), v)))
        .collect();
        let credentials_path = match credentials_path {
            Some(path) => path.to_owned(),
            None => default_credentials_path()?,
        };
        Ok(CredentialResolver {
            from_env: AwsCredentials::from_vars(&env),
            profile: named_profile(&env),
            dotenv_path: std::env::current_dir()?.join(".env"),
            credentials_path,
        })
    }

    #[cfg(test)]
    pub fn with_paths(
        env: HashMap<String, String>,
        dotenv_path: PathBuf,
        credentials_path: PathBuf,
    ) -> Self {
        CredentialResolver {
            from_env: AwsCredentials::from_vars(&env),
            profile: named_profile(&env),
            dotenv_path,
            credentials_path,
        }
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// The profile named by `AWS_PROFILE`, if it's not the default.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Find credentials without asking. Returns None if there are none in any of the
    /// usual places, or if a named profile should be resolved by the SDK.
    pub fn resolve(&self) -> Result<Option<(AwsCredentials, CredentialSource)>> {
        if let Some(credentials) = &self.from_env {
            return Ok(Some((credentials.clone(), CredentialSource::Environment)));
        }
        let dotenv = read_dotenv(&self.dotenv_path)?;
        if let Some(credentials) = AwsCredentials::from_vars(&dotenv) {
            return Ok(Some((
                credentials,
                CredentialSource::DotEnv(self.dotenv_path.clone()),
            )));
        }
        if let Some(profile) = &self.profile {
            debug!(?profile, "Leaving named profile to the SDK");
            return Ok(None);
        }
        if let Some(credentials) = read_credentials_file(&self.credentials_path) {
            return Ok(Some((
                credentials,
                CredentialSource::CredentialsFile(self.credentials_path.clone()),
            )));
        }
        debug!("No static credentials found");
        Ok(None)
    }

    /// Find credentials, asking the operator if there are none, and then saving what they
    /// typed to the credentials file.
    ///
    /// Returns None, without asking, when a named profile is left to the SDK. Failure to
    /// save is only a warning.
    pub fn resolve_or_prompt(
        &self,
        prompt: &dyn Prompt,
    ) -> Result<Option<(AwsCredentials, CredentialSource)>> {
        if let Some(found) = self.resolve()? {
            return Ok(Some(found));
        }
        if self.profile.is_some() {
            return Ok(None);
        }
        let access_key_id = prompt.input("AWS Access Key ID")?;
        let secret_access_key = prompt.password("AWS Secret Access Key")?;
        let credentials =
            AwsCredentials::from_pair(Some(&access_key_id), Some(&secret_access_key))
                .ok_or_else(|| Error::Credentials("Access key and secret are required".into()))?;
        match save_credentials(&self.credentials_path, &credentials) {
            Ok(()) => debug!(path = ?self.credentials_path, "Saved credentials"),
            Err(err) => warn!(
                "Failed to save credentials to {}: {err}",
                self.credentials_path.display()
            ),
        }
        Ok(Some((credentials, CredentialSource::Prompt)))
    }
}

fn named_profile(env: &HashMap<String, String>) -> Option<String> {
    env.get(PROFILE_VAR)
        .map(|profile| profile.trim())
        .filter(|profile| !profile.is_empty() && *profile != DEFAULT_PROFILE)
        .map(str::to_owned)
}

pub fn default_credentials_path() -> Result<PathBuf> {
    #[allow(deprecated)]
    let home = std::env::home_dir()
        .ok_or_else(|| Error::Credentials("Couldn't determine home directory".into()))?;
    Ok(home.join(DEFAULT_CREDENTIALS_FILE))
}

/// Read variables from a dotenv file. A missing file has no variables.
pub fn read_dotenv(path: &Path) -> Result<HashMap<String, String>> {
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    debug!(?path, "Reading dotenv file");
    let parse_err =
        |err: dotenv::Error| Error::Config(format!("Failed to read {}: {err}", path.display()));
    let mut vars = HashMap::new();
    for item in dotenv::from_path_iter(path).map_err(parse_err)? {
        let (key, value) = item.map_err(parse_err)?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Read the default profile from a shared credentials file.
///
/// A missing or unreadable file gives None; unreadable files are logged.
pub fn read_credentials_file(path: &Path) -> Option<AwsCredentials> {
    if !path.is_file() {
        return None;
    }
    let ini = Ini::load_from_file(path)
        .inspect_err(|err| warn!("Error reading AWS credentials file {}: {err}", path.display()))
        .ok()?;
    let profile = ini
        .section(Some(DEFAULT_PROFILE))
        .or_else(|| ini.section(Some("Default")))?;
    AwsCredentials::from_pair(
        profile.get(ACCESS_KEY_ID_KEY),
        profile.get(SECRET_ACCESS_KEY_KEY),
    )
    .map(|credentials| credentials.with_session_token(profile.get(SESSION_TOKEN_KEY)))
}

/// Store credentials as the default profile, keeping everything else in the file.
pub fn save_credentials(path: &Path, credentials: &AwsCredentials) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            create_private_dir(dir)?;
        }
    }
    let mut ini = if path.exists() {
        Ini::load_from_file(path).map_err(|err| {
            Error::Credentials(format!("Failed to parse {}: {err}", path.display()))
        })?
    } else {
        Ini::new()
    };
    ini.with_section(Some(DEFAULT_PROFILE))
        .set(ACCESS_KEY_ID_KEY, credentials.access_key_id.as_str())
        .set(SECRET_ACCESS_KEY_KEY, credentials.secret_access_key.as_str());
    match &credentials.session_token {
        Some(token) => {
            ini.with_section(Some(DEFAULT_PROFILE))
                .set(SESSION_TOKEN_KEY, token.as_str());
        }
        None => {
            // A token left from earlier keys would not match the new ones.
            ini.delete_from(Some(DEFAULT_PROFILE), SESSION_TOKEN_KEY);
        }
    }
    let mut file = open_private_file(path)?;
    ini.write_to(&mut file)?;
    Ok(())
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)?;
    Ok(())
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    Ok(())
}

#[cfg(unix)]
fn open_private_file(path: &Path) -> Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies to new files.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private_file(path: &Path) -> Result<fs::File> {
    Ok(fs::File::create(path)?)
}
