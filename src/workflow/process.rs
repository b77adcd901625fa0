//! Per-file classification: course, category, filename, copy and page edit.

use chrono::Datelike;

use crate::config::is_valid_course_key;
use crate::course::Course;
use crate::document::CourseDocument;
use crate::error::{Error, Result};
use crate::fs::{
    copy_to_resources, course_resources_dir, display_name, public_path, sanitize_filename,
    suggest_filename, FileCandidate,
};
use crate::hints::MaterialCategory;
use crate::output;
use crate::prompt::{any_text, four_digit_year, non_blank};
use crate::workflow::{ProcessedEntry, Workflow};

const NEW_COURSE: &str = "➕ New course...";
const DEFAULT_EMOJI: &str = "📚";

/// Result of processing one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Processed(ProcessedEntry),
    /// The course page already lists this web path; nothing was changed.
    Duplicate(String),
}

fn course_choice(course: &Course) -> String {
    format!("{} ({})", course.name, course.key)
}

impl Workflow<'_> {
    /// Walk one staged file through the prompts and apply it to the site tree.
    pub fn process_file(&mut self, candidate: &FileCandidate) -> Result<FileOutcome> {
        output::print_info(&format!("Processing {}", candidate.relative_path.display()));

        let course = self.choose_course(candidate)?;
        let category = self.choose_category(candidate)?;
        let year = self.choose_year(candidate)?;

        let suggested = suggest_filename(candidate, Some(&year), category);
        let filename = self.prompter.text(
            "Target filename:",
            Some(&suggested),
            &|name: &str| sanitize_filename(name).is_ok(),
        )?;
        let filename = sanitize_filename(&filename)?;

        let page = self.config.course_page(&course.key);
        let mut document = CourseDocument::load(&page)?;

        let intended = course_resources_dir(self.config, &sanitize_filename(&course.name)?)
            .join(&filename);
        let intended = public_path(self.config, &intended)?;
        if intended.contains('"') {
            return Err(Error::InvalidFilename(format!(
                "'{}' cannot be referenced from a course page",
                filename
            )));
        }
        if document.has_entry(&intended) {
            return Ok(FileOutcome::Duplicate(intended));
        }

        let web_path = copy_to_resources(self.config, candidate, &course.name, &filename)?;
        output::print_success(&format!("Copied to {}", web_path));

        let stored_name = web_path.rsplit('/').next().unwrap_or(&filename).to_string();
        if !document.add_entry(display_name(&stored_name), &web_path, category) {
            self.discard_copy(&web_path);
            return Err(Error::Document(format!(
                "could not add {} to {}",
                web_path,
                page.display()
            )));
        }
        document.normalize_blank_runs();
        if let Err(e) = document.save() {
            self.discard_copy(&web_path);
            return Err(e);
        }
        output::print_success(&format!("Updated {}", page.display()));

        Ok(FileOutcome::Processed(ProcessedEntry {
            course_name: course.name,
            course_key: course.key,
            filename: stored_name,
            public_path: web_path,
            category,
            source: candidate.path.clone(),
        }))
    }

    /// Remove a copied resource after a failed page edit.
    fn discard_copy(&self, web_path: &str) {
        let copied = self
            .config
            .public_dir()
            .join(web_path.trim_start_matches('/'));
        if let Err(e) = std::fs::remove_file(&copied) {
            tracing::warn!("Could not remove {}: {}", copied.display(), e);
        }
    }

    /// Pick an existing course (hint preselected) or create a new one.
    fn choose_course(&mut self, candidate: &FileCandidate) -> Result<Course> {
        let hint = candidate.hints.course.as_deref().unwrap_or("");
        let courses: Vec<Course> = self.registry.courses().into_iter().cloned().collect();

        let default = self
            .registry
            .match_course(hint)
            .and_then(|m| courses.iter().position(|c| c.key == m.key))
            .unwrap_or(0);

        let mut choices: Vec<String> = courses.iter().map(course_choice).collect();
        choices.push(NEW_COURSE.to_string());

        let index = self.prompter.select("Course:", &choices, default)?;
        if let Some(course) = courses.get(index) {
            if !self.registry.has_page(self.config, course) {
                output::print_warning(&format!(
                    "{} has no course page yet, creating one",
                    course.name
                ));
                return self.registry.create_course(
                    self.config,
                    &course.name,
                    &course.key,
                    DEFAULT_EMOJI,
                );
            }
            return Ok(course.clone());
        }

        let name = self
            .prompter
            .text("Course name:", Some(hint), &non_blank)?;
        let key = self.prompter.text(
            "Course key (letters, digits, '-' or '_', used in the URL):",
            None,
            &|key: &str| is_valid_course_key(key.trim()),
        )?;
        let emoji = self
            .prompter
            .text("Course emoji (optional):", Some(DEFAULT_EMOJI), &any_text)?;
        let emoji = match emoji.trim() {
            "" => DEFAULT_EMOJI,
            e => e,
        };

        let course = self
            .registry
            .create_course(self.config, &name, &key, emoji)?;
        output::print_success(&format!("Created course {} ({})", course.name, course.key));
        Ok(course)
    }

    /// Pick a category, defaulting to the filename hint.
    fn choose_category(&mut self, candidate: &FileCandidate) -> Result<MaterialCategory> {
        let choices: Vec<String> = MaterialCategory::ALL
            .iter()
            .map(|c| c.label().to_string())
            .collect();
        let default = candidate
            .hints
            .category
            .and_then(|hint| MaterialCategory::ALL.iter().position(|c| *c == hint))
            .unwrap_or(0);

        let index = self.prompter.select("Material type:", &choices, default)?;
        MaterialCategory::ALL
            .get(index)
            .copied()
            .ok_or(Error::Cancelled)
    }

    /// Ask for the year, defaulting to the filename hint or the current year.
    fn choose_year(&mut self, candidate: &FileCandidate) -> Result<String> {
        let default = candidate
            .hints
            .year
            .clone()
            .unwrap_or_else(|| chrono::Local::now().year().to_string());

        let year = self
            .prompter
            .text("Year:", Some(&default), &four_digit_year)?;
        Ok(year.trim().to_string())
    }
}
