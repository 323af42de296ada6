//! Remote lookups and web URL derivation

use tracing::debug;
use url::Url;

use crate::repository::{GitRepo, Result};
use herald_core::error::GitError;

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Derive the repository web URL from a remote
    pub fn web_url(&self, remote: &str) -> Result<String> {
        let remote_url = self
            .remote_url(remote)?
            .ok_or_else(|| GitError::RemoteNotFound(remote.to_string()))?;

        let web = web_url_from_remote(&remote_url)
            .ok_or(GitError::UnsupportedRemoteUrl(remote_url))?;
        debug!(remote, web_url = %web, "derived web URL");
        Ok(web)
    }
}

/// Turn a clone URL into the repository's web URL.
///
/// Handles scp-like (`git@host:owner/repo.git`), `ssh://`, `git://` and
/// `http(s)://` remotes. Credentials and the `.git` suffix are dropped.
pub fn web_url_from_remote(remote: &str) -> Option<String> {
    let remote = remote.trim();

    let (host, path) = if let Some((user_host, path)) = scp_like(remote) {
        let host = user_host.rsplit('@').next()?;
        (host.to_string(), path.to_string())
    } else {
        let url = Url::parse(remote).ok()?;
        if !matches!(url.scheme(), "http" | "https" | "ssh" | "git" | "git+ssh") {
            return None;
        }
        (url.host_str()?.to_string(), url.path().to_string())
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if host.is_empty() || path.is_empty() {
        return None;
    }

    Some(format!("https://{}/{}", host, path))
}

fn scp_like(remote: &str) -> Option<(&str, &str)> {
    if remote.contains("://") {
        return None;
    }
    remote.split_once(':')
}
