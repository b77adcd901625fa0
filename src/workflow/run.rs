//! Top-level upload workflow.

use crate::config::{Config, RunMode};
use crate::course::CourseRegistry;
use crate::error::{Error, Result};
use crate::fs::{remove_candidate, scan_staging_dir, validate, FileCandidate};
use crate::output;
use crate::prompt::Prompter;
use crate::vcs::{PullRequestHost, VersionControl};
use crate::workflow::process::FileOutcome;
use crate::workflow::Session;

const TOTAL_STEPS: usize = 6;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Nothing staged, nothing valid, nothing selected or nothing processed.
    NothingToDo,
    /// Hints were printed; no changes made.
    Inspected,
    /// Site tree updated without touching version control.
    Applied { processed: usize },
    /// Changes pushed on `branch`; `pr_url` is set when the pull request was opened.
    Published {
        processed: usize,
        branch: String,
        pr_url: Option<String>,
    },
}

/// Version control collaborators; absent when git is skipped.
pub struct Publisher<'a> {
    pub vcs: &'a dyn VersionControl,
    pub host: &'a dyn PullRequestHost,
}

/// One interactive upload session.
pub struct Workflow<'a> {
    pub(crate) config: &'a Config,
    pub(crate) registry: CourseRegistry,
    pub(crate) prompter: &'a mut dyn Prompter,
    pub(crate) publisher: Option<Publisher<'a>>,
    pub(crate) session: Session,
}

impl<'a> Workflow<'a> {
    pub fn new(
        config: &'a Config,
        registry: CourseRegistry,
        prompter: &'a mut dyn Prompter,
        publisher: Option<Publisher<'a>>,
    ) -> Self {
        Self {
            config,
            registry,
            prompter,
            publisher,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn registry(&self) -> &CourseRegistry {
        &self.registry
    }

    /// Run the configured mode to completion.
    ///
    /// User cancellation is returned as `Error::Cancelled`.
    pub fn run(&mut self) -> Result<RunOutcome> {
        match self.config.options.mode {
            RunMode::Inspect => self.inspect(),
            RunMode::Interactive => self.interactive(),
        }
    }

    fn scan(&self) -> Result<Vec<FileCandidate>> {
        scan_staging_dir(
            &self.config.upload_dir(),
            &self.config.limits.ignored_files,
        )
    }

    /// Print the hints of every staged file without asking anything.
    pub fn inspect(&mut self) -> Result<RunOutcome> {
        let candidates = self.scan()?;
        if candidates.is_empty() {
            output::print_warning(&format!(
                "No files found in {}",
                self.config.upload_dir().display()
            ));
            return Ok(RunOutcome::NothingToDo);
        }

        output::print_hints(&candidates);
        for candidate in &candidates {
            if let Err(reason) = validate(candidate, &self.config.limits) {
                output::print_warning(&format!("{}: {}", candidate.relative_path.display(), reason));
            }
        }
        Ok(RunOutcome::Inspected)
    }

    fn interactive(&mut self) -> Result<RunOutcome> {
        output::print_step(1, TOTAL_STEPS, "Scanning staging directory");
        let candidates = self.scan()?;
        if candidates.is_empty() {
            output::print_error(&format!(
                "No files found in {}",
                self.config.upload_dir().display()
            ));
            output::print_info("Put the materials to share into the staging directory first");
            return Ok(RunOutcome::NothingToDo);
        }
        output::print_success(&format!("Found {} files", candidates.len()));

        let mut valid = Vec::new();
        for (i, candidate) in candidates.iter().enumerate() {
            let rejection = validate(candidate, &self.config.limits).err();
            output::print_file_status(i + 1, &candidate.display_label(), rejection.as_ref());
            if rejection.is_none() {
                valid.push(candidate);
            }
        }

        if valid.is_empty() {
            output::print_error("No valid files to process");
            return Ok(RunOutcome::NothingToDo);
        }
        let invalid = candidates.len() - valid.len();
        if invalid > 0
            && !self.prompter.confirm(
                &format!("{} invalid files found, continue with the others?", invalid),
                true,
            )?
        {
            return Err(Error::Cancelled);
        }

        output::print_step(2, TOTAL_STEPS, "Select files");
        let labels: Vec<String> = valid.iter().map(|c| c.display_label()).collect();
        let chosen = self.prompter.checkbox("Files to process:", &labels)?;
        if chosen.is_empty() {
            output::print_warning("No files selected");
            return Ok(RunOutcome::NothingToDo);
        }
        let selected: Vec<&FileCandidate> = chosen.iter().filter_map(|&i| valid.get(i).copied()).collect();
        output::print_success(&format!("Selected {} files", selected.len()));

        output::print_step(3, TOTAL_STEPS, "Classify files");
        for candidate in &selected {
            match self.process_file(candidate) {
                Ok(FileOutcome::Processed(entry)) => self.session.record(entry),
                Ok(FileOutcome::Duplicate(path)) => {
                    output::print_warning(&format!("{} is already listed, skipped", path))
                }
                Err(Error::Cancelled) => return Err(Error::Cancelled),
                Err(e) => {
                    output::print_error(&format!("{}: {}", candidate.name, e));
                    if !self
                        .prompter
                        .confirm("Processing failed, continue with the remaining files?", true)?
                    {
                        return Err(Error::Cancelled);
                    }
                }
            }
        }

        if self.session.is_empty() {
            output::print_error("No files were processed");
            return Ok(RunOutcome::NothingToDo);
        }

        output::print_step(4, TOTAL_STEPS, "Preview");
        output::print_preview(&self.session);
        if !self.prompter.confirm("Apply the changes above?", true)? {
            return Err(Error::Cancelled);
        }

        let processed = self.session.len();
        let Some(publisher) = self.publisher.take() else {
            output::print_info("Version control skipped; changes are left in the working tree");
            self.offer_cleanup(&selected)?;
            return Ok(RunOutcome::Applied { processed });
        };

        output::print_step(5, TOTAL_STEPS, "Create branch and commit");
        let branch = self.commit_and_push(publisher.vcs)?;

        output::print_step(6, TOTAL_STEPS, "Open pull request");
        let pr_url = self.open_pull_request(&publisher, &branch);
        match &pr_url {
            Some(url) => output::print_success(&format!("Pull request created: {}", url)),
            None => {
                output::print_warning("Pull request not created, but the files are committed");
                output::print_info(&format!("Your changes are on branch {}", branch));
            }
        }

        self.offer_cleanup(&selected)?;
        output::print_summary(processed, self.session.courses().len(), pr_url.as_deref());

        Ok(RunOutcome::Published {
            processed,
            branch,
            pr_url,
        })
    }

    /// Delete processed staging files, asking unless configured to always delete.
    fn offer_cleanup(&mut self, selected: &[&FileCandidate]) -> Result<()> {
        let delete = self.config.options.delete_processed
            || self
                .prompter
                .confirm("Delete the processed files from the staging directory?", false)?;
        if !delete {
            return Ok(());
        }

        let staging_root = self.config.upload_dir();
        let mut removed = 0;
        for candidate in selected {
            let processed = self
                .session
                .entries()
                .iter()
                .any(|e| e.source == candidate.path);
            if !processed {
                continue;
            }
            match remove_candidate(candidate, &staging_root) {
                Ok(()) => removed += 1,
                Err(e) => output::print_warning(&format!(
                    "Could not delete {}: {}",
                    candidate.path.display(),
                    e
                )),
            }
        }
        output::print_success(&format!("Removed {} staged files", removed));
        Ok(())
    }
}
