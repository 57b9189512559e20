use super::{Detector, Steps};
use crate::error::Result;
use crate::metadata::Metadata;
use git2::{ErrorCode, Repository};
use log::debug;
use std::path::Path;
use url::Url;

/// Derives the project host, path and name from the `origin` remote.
pub struct GitDetector;

impl Detector for GitDetector {
    fn name(&self) -> &'static str {
        "git"
    }

    fn detect(&self, destdir: &Path, metadata: &mut Metadata) -> Result<Steps> {
        let repo = match Repository::open(destdir) {
            Ok(repo) => repo,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!("'{}' is not a git repository", destdir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let remote = match repo.find_remote("origin") {
            Ok(remote) => remote,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!("No 'origin' remote in '{}'", destdir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if let Some((host, path)) = remote.url().and_then(parse_remote) {
            metadata.project_name = path.rsplit('/').next().unwrap_or_default().to_string();
            metadata.project_host = host;
            metadata.project_path = path;
        }
        Ok(Vec::new())
    }
}

/// Splits a remote url into its host and repository path.
///
/// Supports regular urls (`https://`, `ssh://`, `git://`) and scp-like
/// ones (`git@github.com:owner/repo.git`).
pub fn parse_remote(raw: &str) -> Option<(String, String)> {
    let (host, path) = match Url::parse(raw) {
        Ok(url) => (url.host_str()?.to_string(), url.path().to_string()),
        Err(_) => {
            let (user_host, path) = raw.split_once(':')?;
            let host = user_host.rsplit('@').next()?;
            (host.to_string(), path.to_string())
        }
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if host.is_empty() || path.is_empty() {
        return None;
    }
    Some((host, path.to_string()))
}
