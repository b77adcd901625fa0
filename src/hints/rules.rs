//! Named stripping rules used to isolate a course name inside a filename.
//!
//! Each rule removes one family of noise (academic years, semester markers,
//! exam keywords, ...) and can be applied and tested on its own. The rules run
//! in the order returned by [`course_strip_rules`].

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A single named rewrite over a filename.
#[derive(Debug)]
pub struct StripRule {
    /// Short identifier used in debug logs.
    pub name: &'static str,
    pattern: Regex,
    replacement: &'static str,
    /// Latin keywords removed as whole ASCII words, case-insensitively.
    ascii_words: &'static [&'static str],
}

/// Any run of ASCII letters, the unit for Latin keyword matching.
static ASCII_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+").expect("Invalid regex pattern"));

impl StripRule {
    fn new(
        name: &'static str,
        pattern: &str,
        replacement: &'static str,
        ascii_words: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("Invalid regex pattern"),
            replacement,
            ascii_words,
        }
    }

    /// Apply the rule, returning the rewritten text.
    pub fn apply(&self, input: &str) -> String {
        let stripped = self.pattern.replace_all(input, self.replacement);
        if self.ascii_words.is_empty() {
            return stripped.into_owned();
        }

        ASCII_WORD
            .replace_all(&stripped, |caps: &Captures| {
                let word = &caps[0];
                if self.ascii_words.iter().any(|w| w.eq_ignore_ascii_case(word)) {
                    String::new()
                } else {
                    word.to_string()
                }
            })
            .into_owned()
    }
}

/// `2024-2025学年`
pub static ACADEMIC_YEAR: Lazy<StripRule> =
    Lazy::new(|| StripRule::new("academic-year", r"\d{4}-\d{4}学年", "", &[]));

/// `第一学期`, `第2学期`
pub static SEMESTER_ORDINAL: Lazy<StripRule> = Lazy::new(|| {
    StripRule::new("semester-ordinal", r"第[一二三四1-4]学期[-_]?", "", &[])
});

/// `秋季学期`, `春学期`
pub static SEASONAL_SEMESTER: Lazy<StripRule> = Lazy::new(|| {
    StripRule::new("seasonal-semester", r"[春夏秋冬]季?学期[-_]?", "", &[])
});

/// `2024`, `2024年`
pub static BARE_YEAR: Lazy<StripRule> =
    Lazy::new(|| StripRule::new("bare-year", r"(?:19|20)\d{2}年?", "", &[]));

/// Leading year token of a filename stem, as in `2024-notes`.
pub static LEADING_YEAR: Lazy<StripRule> =
    Lazy::new(|| StripRule::new("leading-year", r"^\d{4}[-_]?", "", &[]));

/// `期末考试`, `阶段性`, `quiz`
pub static EXAM_TYPE: Lazy<StripRule> = Lazy::new(|| {
    StripRule::new(
        "exam-type",
        r"(?:期末|期中|阶段性|段考|小测|测验)(?:考试)?[-_]?",
        "",
        &["final", "finals", "midterm", "midterms", "quiz", "test"],
    )
});

/// `试卷`, `答案`, `notes`, `slides`
pub static MATERIAL_KEYWORD: Lazy<StripRule> = Lazy::new(|| {
    StripRule::new(
        "material-keyword",
        r"(?:试卷|答案|解答|复习|总结|笔记|作业|课件|讲义)[-_]?",
        "",
        &[
            "exam", "exams", "paper", "answer", "answers", "solution", "solutions", "review",
            "note", "notes", "homework", "hw", "slides", "slide", "ppt", "lecture",
        ],
    )
});

/// `A卷`, or a lone `B` between separators.
pub static PAPER_VERSION: Lazy<StripRule> = Lazy::new(|| {
    StripRule::new(
        "paper-version",
        r"[ABC]卷[-_]?|(^|[-_\s])[ABC]([-_\s]|$)",
        "${1}${2}",
        &[],
    )
});

/// `期末试卷A`: a version letter glued to the end of Chinese text.
pub static TRAILING_PAPER_VERSION: Lazy<StripRule> = Lazy::new(|| {
    StripRule::new(
        "trailing-paper-version",
        r"(\p{Han})[ABC][-_\s]*$",
        "${1}",
        &[],
    )
});

/// `（草稿）`, `(v2)`
pub static PARENTHESIZED: Lazy<StripRule> =
    Lazy::new(|| StripRule::new("parenthesized", r"[（(].*?[）)]", "", &[]));

/// Course-name stripping rules, in application order.
pub fn course_strip_rules() -> [&'static StripRule; 9] {
    [
        &*ACADEMIC_YEAR,
        &*SEMESTER_ORDINAL,
        &*SEASONAL_SEMESTER,
        &*BARE_YEAR,
        &*EXAM_TYPE,
        &*MATERIAL_KEYWORD,
        &*PAPER_VERSION,
        &*TRAILING_PAPER_VERSION,
        &*PARENTHESIZED,
    ]
}

/// Trim separator characters from both ends.
pub fn trim_separators(input: &str) -> &str {
    input.trim_matches(|c: char| c == '-' || c == '_' || c.is_whitespace())
}
