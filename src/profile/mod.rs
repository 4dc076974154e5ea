//! usacloud-compatible credential profiles
//!
//! Profiles live in `<root>/.usacloud/<name>/config.json`, where `<root>` is
//! `$SAKURACLOUD_PROFILE_DIR`, `$USACLOUD_PROFILE_DIR` or `$HOME`. The active
//! profile name is stored in `<root>/.usacloud/current`.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::utils::error::ProfileError;

/// Name used when neither a flag nor the `current` file selects a profile
pub const DEFAULT_PROFILE_NAME: &str = "default";

const PROFILE_DIR_NAME: &str = ".usacloud";
const PROFILE_FILE_NAME: &str = "config.json";
const CURRENT_FILE_NAME: &str = "current";

/// API credentials resolved from a profile
#[derive(Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

// Only the credential keys of a usacloud profile are read
#[derive(Debug, Default, Deserialize)]
struct ProfileFile {
    #[serde(rename = "AccessToken", default)]
    access_token: String,
    #[serde(rename = "AccessTokenSecret", default)]
    access_token_secret: String,
}

/// Locates and reads usacloud profiles
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    root: PathBuf,
}

impl ProfileResolver {
    /// Resolver rooted at the profile directory taken from the environment
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::HomeNotFound` if no root directory is set
    pub fn from_env() -> Result<Self, ProfileError> {
        let root = ["SAKURACLOUD_PROFILE_DIR", "USACLOUD_PROFILE_DIR", "HOME"]
            .iter()
            .find_map(|key| std::env::var_os(key).filter(|v| !v.is_empty()))
            .ok_or(ProfileError::HomeNotFound)?;

        Ok(Self::with_root(root))
    }

    /// Resolver rooted at an explicit directory (the parent of `.usacloud`)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn profiles_dir(&self) -> PathBuf {
        self.root.join(PROFILE_DIR_NAME)
    }

    /// Path of the profile file for `name`
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(name).join(PROFILE_FILE_NAME)
    }

    /// Name of the active profile
    ///
    /// Falls back to [`DEFAULT_PROFILE_NAME`] when the `current` file is
    /// missing or empty.
    pub fn current_profile_name(&self) -> String {
        std::fs::read_to_string(self.profiles_dir().join(CURRENT_FILE_NAME))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PROFILE_NAME.to_string())
    }

    /// Resolve credentials for `name`, or the active profile when empty
    ///
    /// A missing `default` profile falls back to the
    /// `SAKURACLOUD_ACCESS_TOKEN` and `SAKURACLOUD_ACCESS_TOKEN_SECRET`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ProfileError` if the name is invalid, the file cannot be
    /// read or parsed, or the credentials are empty
    pub fn resolve(&self, name: &str) -> Result<Profile, ProfileError> {
        let name = if name.is_empty() {
            self.current_profile_name()
        } else {
            name.to_string()
        };
        validate_profile_name(&name)?;

        let path = self.profile_path(&name);
        tracing::debug!(profile = %name, path = %path.display(), "Resolving profile");

        let file = if path.exists() {
            read_profile_file(&path)?
        } else if name == DEFAULT_PROFILE_NAME {
            ProfileFile {
                access_token: std::env::var("SAKURACLOUD_ACCESS_TOKEN").unwrap_or_default(),
                access_token_secret: std::env::var("SAKURACLOUD_ACCESS_TOKEN_SECRET")
                    .unwrap_or_default(),
            }
        } else {
            return Err(ProfileError::NotFound { name, path });
        };

        if file.access_token.is_empty() || file.access_token_secret.is_empty() {
            return Err(ProfileError::MissingCredentials(name));
        }

        Ok(Profile {
            name,
            access_token: file.access_token,
            access_token_secret: file.access_token_secret,
        })
    }
}

fn read_profile_file(path: &Path) -> Result<ProfileFile, ProfileError> {
    let content = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ProfileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject names that would escape the profile directory
fn validate_profile_name(name: &str) -> Result<(), ProfileError> {
    let invalid = name.trim().is_empty()
        || name == "."
        || name.contains("..")
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);

    if invalid {
        Err(ProfileError::InvalidName(name.to_string()))
    } else {
        Ok(())
    }
}
