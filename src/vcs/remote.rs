//! GitHub remote URL parsing and manual pull request links.

use std::fmt;

use url::Url;

const GITHUB_HOST: &str = "github.com";

/// `owner/name` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl RepoSlug {
    fn from_path(path: &str) -> Option<Self> {
        let mut parts = path.trim_matches('/').split('/');
        let owner = parts.next()?.trim();
        let name = parts.next()?.trim();
        let name = name.strip_suffix(".git").unwrap_or(name);
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

/// Parse a GitHub remote in https, ssh:// or scp-like `git@` form.
pub fn parse_remote(remote: &str) -> Option<RepoSlug> {
    let remote = remote.trim();

    if let Some(rest) = remote.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        return (host == GITHUB_HOST)
            .then(|| RepoSlug::from_path(path))
            .flatten();
    }

    let url = Url::parse(remote).ok()?;
    if url.host_str() != Some(GITHUB_HOST) {
        return None;
    }
    RepoSlug::from_path(url.path())
}

/// Link for opening the pull request by hand.
///
/// Forks compare against the upstream repository; otherwise GitHub's
/// new-pull-request page for the branch is used.
pub fn manual_pr_url(origin: &RepoSlug, upstream: Option<&str>, base: &str, branch: &str) -> String {
    match upstream {
        Some(upstream) => format!(
            "https://github.com/{}/compare/{}...{}:{}",
            upstream, base, origin.owner, branch
        ),
        None => format!("https://github.com/{}/pull/new/{}", origin, branch),
    }
}

/// Same-repository compare link, offered when the checkout is not a fork.
pub fn compare_url(origin: &RepoSlug, base: &str, branch: &str) -> String {
    format!("https://github.com/{}/compare/{}...{}", origin, base, branch)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug(owner: &str, name: &str) -> RepoSlug {
        RepoSlug {
            owner: owner.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_parse_https() {
        assert_eq!(
            parse_remote("https://github.com/alice/share.git"),
            Some(slug("alice", "share"))
        );
        assert_eq!(
            parse_remote("https://github.com/alice/share"),
            Some(slug("alice", "share"))
        );
        assert_eq!(
            parse_remote("ssh://git@github.com/alice/share.git"),
            Some(slug("alice", "share"))
        );
    }

    #[test]
    fn test_parse_scp_like() {
        assert_eq!(
            parse_remote("git@github.com:alice/share.git"),
            Some(slug("alice", "share"))
        );
    }

    #[test]
    fn test_parse_rejects_other_hosts() {
        assert!(parse_remote("https://gitlab.com/alice/share.git").is_none());
        assert!(parse_remote("git@gitlab.com:alice/share.git").is_none());
        assert!(parse_remote("https://github.com/alice").is_none());
        assert!(parse_remote("not a url").is_none());
    }

    #[test]
    fn test_manual_pr_url() {
        let origin = slug("alice", "share");
        assert_eq!(
            manual_pr_url(&origin, Some("fdu/share"), "master", "add/x-1"),
            "https://github.com/fdu/share/compare/master...alice:add/x-1"
        );
        assert_eq!(
            manual_pr_url(&origin, None, "master", "add/x-1"),
            "https://github.com/alice/share/pull/new/add/x-1"
        );
        assert_eq!(
            compare_url(&origin, "master", "add/x-1"),
            "https://github.com/alice/share/compare/master...add/x-1"
        );
    }
}
