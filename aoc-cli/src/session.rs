//! Session cookie lookup and storage
//!
//! Lookup order: `AOC_SESSION`, then `.session_cookie` in the working
//! directory, then `.aoc_session` in the home directory. Empty values are
//! skipped.

use crate::error::CliError;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the session cookie
pub const SESSION_ENV: &str = "AOC_SESSION";
/// Session file looked up in the working directory
pub const LOCAL_SESSION_FILE: &str = ".session_cookie";
/// Session file in the home directory, also the target of `--save-session`
pub const HOME_SESSION_FILE: &str = ".aoc_session";

/// Where a resolved session came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSource {
    Env,
    File(PathBuf),
}

/// Known session cookie locations
#[derive(Debug, Clone)]
pub struct SessionStore {
    local_file: PathBuf,
    home_file: Option<PathBuf>,
}

impl SessionStore {
    /// Create a store over explicit file locations
    pub fn new(local_file: PathBuf, home_file: Option<PathBuf>) -> Self {
        Self {
            local_file,
            home_file,
        }
    }

    /// Store over the working directory and the user's home directory
    pub fn from_environment() -> Self {
        Self::new(
            PathBuf::from(LOCAL_SESSION_FILE),
            dirs::home_dir().map(|home| home.join(HOME_SESSION_FILE)),
        )
    }

    /// The home-directory session file, if a home directory is known
    pub fn home_file(&self) -> Option<&Path> {
        self.home_file.as_deref()
    }

    /// Resolve the session cookie, reading `AOC_SESSION` from the environment
    pub fn resolve(&self) -> Result<Option<Zeroizing<String>>, CliError> {
        let env_value = std::env::var(SESSION_ENV).ok().map(Zeroizing::new);
        self.resolve_with(env_value)
    }

    /// Resolve the session cookie given the value of `AOC_SESSION`
    pub fn resolve_with(
        &self,
        env_value: Option<Zeroizing<String>>,
    ) -> Result<Option<Zeroizing<String>>, CliError> {
        if let Some(value) = env_value.as_deref().and_then(|value| non_empty(value)) {
            tracing::debug!(source = ?SessionSource::Env, "session cookie resolved");
            return Ok(Some(value));
        }

        let files = std::iter::once(self.local_file.as_path()).chain(self.home_file());
        for path in files {
            if let Some(value) = read_session_file(path)? {
                tracing::debug!(source = ?SessionSource::File(path.to_path_buf()), "session cookie resolved");
                return Ok(Some(value));
            }
        }

        tracing::debug!("no session cookie found");
        Ok(None)
    }

    /// Write the session cookie to the home-directory file, readable by the owner only
    ///
    /// Any previous contents are replaced. Permissions are restricted before the
    /// value is written. A blank value is rejected and leaves the file untouched.
    pub fn persist(&self, session: &str) -> Result<PathBuf, CliError> {
        let session = non_empty(session).ok_or(CliError::EmptySession)?;
        let path = self.home_file.as_ref().ok_or(CliError::HomeDirUnavailable)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path)?;
        #[cfg(unix)]
        {
            // an existing file keeps its old mode through open()
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(session.as_bytes())?;
        file.flush()?;

        tracing::info!(path = %path.display(), "session cookie saved");
        Ok(path.clone())
    }

    /// Message-ready location of the home session file
    pub fn home_file_display(&self) -> String {
        match &self.home_file {
            Some(path) => path.display().to_string(),
            None => format!("~/{}", HOME_SESSION_FILE),
        }
    }
}

fn non_empty(value: &str) -> Option<Zeroizing<String>> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| Zeroizing::new(trimmed.to_string()))
}

fn read_session_file(path: &Path) -> Result<Option<Zeroizing<String>>, CliError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let contents = Zeroizing::new(contents);
            Ok(non_empty(&contents))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
