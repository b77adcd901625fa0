//! Branch, commit, push and pull request creation.

use crate::error::{Error, Result};
use crate::output;
use crate::vcs::{
    branch_name, commit_message, compare_url, manual_pr_url, parse_remote, pr_body, pr_title,
    PullRequest, RepoSlug, VersionControl,
};
use crate::workflow::{Publisher, Workflow};

impl Workflow<'_> {
    /// Commit the session's changes on a fresh branch and push it.
    ///
    /// A failed stage or commit switches back to the original branch and
    /// deletes the new one. A failed push leaves the branch in place.
    pub fn commit_and_push(&self, vcs: &dyn VersionControl) -> Result<String> {
        let courses = self.session.courses();
        let first = courses
            .first()
            .ok_or_else(|| Error::Config("nothing to commit".into()))?;

        let original = vcs.current_branch()?;
        let branch = branch_name(&self.config.git.branch_prefix, first);

        output::print_info(&format!("Creating branch {}", branch));
        vcs.create_branch(&branch)?;

        let files = self.session.files_to_stage(self.config);
        let message = commit_message(&courses, self.session.len());

        let committed = vcs.stage(&files).and_then(|()| {
            output::print_info(&format!("Committing: {}", message));
            vcs.commit(&message)
        });
        if let Err(e) = committed {
            output::print_error(&e.to_string());
            rollback(vcs, &original, &branch);
            return Err(e);
        }

        let remote = &self.config.git.remote;
        output::with_spinner(&format!("Pushing {} to {}", branch, remote), || {
            vcs.push(remote, &branch)
        })
        .map_err(|e| {
            output::print_info("Check that you are allowed to push to this repository");
            e
        })?;

        output::print_success("Changes pushed");
        Ok(branch)
    }

    /// Open the pull request for `branch`.
    ///
    /// Failures are not errors: instructions for finishing by hand are
    /// printed and None is returned.
    pub fn open_pull_request(&self, publisher: &Publisher<'_>, branch: &str) -> Option<String> {
        let courses = self.session.courses();
        let base = &self.config.git.base_branch;
        let origin = publisher
            .vcs
            .remote_url(&self.config.git.remote)
            .ok()
            .flatten()
            .and_then(|url| parse_remote(&url));

        let host = publisher.host;
        let fork = host.check_ready().and_then(|()| host.is_fork());
        let upstream = match fork {
            Ok(true) => host.upstream_repo().unwrap_or_else(|e| {
                tracing::warn!("Could not resolve upstream repository: {}", e);
                None
            }),
            Ok(false) => {
                print_fork_instructions(origin.as_ref(), base, branch);
                return None;
            }
            Err(e) => {
                output::print_warning(&e.to_string());
                print_manual_link(origin.as_ref(), None, base, branch);
                return None;
            }
        };

        let request = PullRequest {
            title: pr_title(&courses, self.session.len()),
            body: pr_body(&self.session.pr_files()),
            branch: branch.to_string(),
            base: base.clone(),
            repo: upstream.clone(),
        };

        match output::with_spinner("Creating pull request", || {
            host.create_pull_request(&request)
        }) {
            Ok(url) => Some(url),
            Err(e) => {
                output::print_warning(&e.to_string());
                print_manual_link(origin.as_ref(), upstream.as_deref(), base, branch);
                None
            }
        }
    }
}

fn rollback(vcs: &dyn VersionControl, original: &str, branch: &str) {
    if let Err(e) = vcs.switch_branch(original) {
        tracing::warn!("Could not switch back to {}: {}", original, e);
        return;
    }
    if let Err(e) = vcs.delete_branch(branch) {
        tracing::warn!("Could not delete {}: {}", branch, e);
    }
    output::print_info(&format!("Restored branch {}", original));
}

fn print_manual_link(origin: Option<&RepoSlug>, upstream: Option<&str>, base: &str, branch: &str) {
    match origin {
        Some(origin) => output::print_info(&format!(
            "Open the pull request manually: {}",
            manual_pr_url(origin, upstream, base, branch)
        )),
        None => output::print_info("Open the pull request manually on GitHub"),
    }
}

fn print_fork_instructions(origin: Option<&RepoSlug>, base: &str, branch: &str) {
    output::print_warning("This checkout is not a fork; the pull request was not created");
    let Some(origin) = origin else {
        output::print_info("Could not determine the repository, open the pull request on GitHub");
        return;
    };
    println!("  1. Visit https://github.com/{}", origin);
    println!("  2. Click 'Fork' to create your fork");
    println!("  3. Push your branch to the fork");
    println!("  4. Open a pull request on GitHub");
    println!();
    println!("  Or compare directly: {}", compare_url(origin, base, branch));
}
