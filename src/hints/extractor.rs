//! Best-effort course, category and year hints from a filename.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fs::naming::split_extension;
use crate::hints::category::MaterialCategory;
use crate::hints::rules::{course_strip_rules, trim_separators};

/// Advisory metadata guessed from a filename. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hints {
    pub course: Option<String>,
    pub category: Option<MaterialCategory>,
    pub year: Option<String>,
}

impl Hints {
    /// True when nothing could be inferred.
    pub fn is_empty(&self) -> bool {
        self.course.is_none() && self.category.is_none() && self.year.is_none()
    }
}

/// Ordered category keyword table. Earlier rows win.
const CATEGORY_KEYWORDS: &[(MaterialCategory, &[&str])] = &[
    (MaterialCategory::FinalExam, &["期末", "final"]),
    (MaterialCategory::Midterm, &["期中", "midterm", "阶段性考试", "段考"]),
    (MaterialCategory::Midterm, &["小测", "quiz", "测验"]),
    (MaterialCategory::ReviewNotes, &["复习", "review", "总结"]),
    (MaterialCategory::LectureNotes, &["笔记", "note"]),
    (MaterialCategory::Homework, &["作业", "homework", "hw"]),
    (MaterialCategory::Slides, &["ppt", "课件", "讲义", "slide", "lecture"]),
];

/// Answer keys are filed under the exam they belong to when that is visible.
const ANSWER_KEYWORDS: &[&str] = &["答案", "解答", "solution", "answer"];
const FINAL_MARKERS: &[&str] = &["期末", "final"];
const MIDTERM_MARKERS: &[&str] = &["期中", "阶段", "midterm"];

/// Words that mean the course pattern ran into a keyword instead of a name.
const COURSE_BLACKLIST: &[&str] = &[
    "试卷", "答案", "解答", "复习", "笔记", "作业", "第", "章", "节",
];

static COURSE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{Han}A-Za-z][\p{Han}A-Za-z0-9ⅠⅡⅢⅣⅤ]*").expect("Invalid regex pattern")
});

static ACADEMIC_YEAR_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-\d{4}学年").expect("Invalid regex pattern"));

static BARE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"20\d{2}").expect("Invalid regex pattern"));

/// Derive hints from a filename and the staging subdirectory it sits in, if any.
///
/// A subdirectory name is taken as the course verbatim.
pub fn extract(name: &str, parent_dir: Option<&str>) -> Hints {
    let course = match parent_dir.map(str::trim) {
        Some(dir) if !dir.is_empty() && dir != "." => Some(dir.to_string()),
        _ => guess_course(name),
    };

    Hints {
        course,
        category: guess_category(name),
        year: guess_year(name),
    }
}

/// Guess the course name from the filename text alone.
pub fn guess_course(name: &str) -> Option<String> {
    let (stem, _) = split_extension(name);

    let mut remainder = stem.to_string();
    for rule in course_strip_rules() {
        let next = rule.apply(&remainder);
        if next != remainder {
            tracing::debug!("Rule {} rewrote '{}' -> '{}'", rule.name, remainder, next);
        }
        remainder = next;
    }

    let remainder = trim_separators(&remainder);
    let candidate = COURSE_TOKEN.find(remainder)?.as_str();

    if COURSE_BLACKLIST.iter().any(|word| candidate.contains(word)) {
        tracing::debug!("Rejected course candidate '{}' from '{}'", candidate, name);
        return None;
    }

    Some(candidate.to_string())
}

/// Guess the material category from keywords in the raw filename.
pub fn guess_category(name: &str) -> Option<MaterialCategory> {
    let lower = name.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    for (category, keywords) in CATEGORY_KEYWORDS {
        if contains_any(keywords) {
            return Some(*category);
        }
    }

    if contains_any(ANSWER_KEYWORDS) {
        return Some(if contains_any(FINAL_MARKERS) {
            MaterialCategory::FinalExam
        } else if contains_any(MIDTERM_MARKERS) {
            MaterialCategory::Midterm
        } else {
            MaterialCategory::Other
        });
    }

    None
}

/// Guess the year, preferring the first year of an academic-year range.
pub fn guess_year(name: &str) -> Option<String> {
    if let Some(caps) = ACADEMIC_YEAR_START.captures(name) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    BARE_YEAR.find(name).map(|m| m.as_str().to_string())
}
