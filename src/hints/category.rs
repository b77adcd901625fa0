//! Material category definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of study material, one per course page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialCategory {
    FinalExam,
    Midterm,
    ReviewNotes,
    LectureNotes,
    Homework,
    Slides,
    Other,
}

impl MaterialCategory {
    /// All categories in prompt order.
    pub const ALL: [MaterialCategory; 7] = [
        MaterialCategory::FinalExam,
        MaterialCategory::Midterm,
        MaterialCategory::ReviewNotes,
        MaterialCategory::LectureNotes,
        MaterialCategory::Homework,
        MaterialCategory::Slides,
        MaterialCategory::Other,
    ];

    /// Label shown to contributors and written into commit/PR text.
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::FinalExam => "期末考试",
            MaterialCategory::Midterm => "期中考试",
            MaterialCategory::ReviewNotes => "复习资料",
            MaterialCategory::LectureNotes => "课堂笔记",
            MaterialCategory::Homework => "作业习题",
            MaterialCategory::Slides => "PPT课件",
            MaterialCategory::Other => "其他",
        }
    }

    /// Section heading of this category in a course page.
    pub fn heading(&self) -> &'static str {
        match self {
            MaterialCategory::FinalExam => "## 📝 期末考试",
            MaterialCategory::Midterm => "## 📝 期中考试",
            MaterialCategory::ReviewNotes => "## 📚 复习资料",
            MaterialCategory::LectureNotes => "## 📖 课堂笔记",
            MaterialCategory::Homework => "## 💡 作业习题",
            MaterialCategory::Slides => "## 📊 PPT课件",
            MaterialCategory::Other => "## 📦 其他资料",
        }
    }

    /// Label with the generic "exam"/"materials"/"exercises" suffixes removed.
    pub fn short_label(&self) -> String {
        self.label()
            .replace("考试", "")
            .replace("资料", "")
            .replace("习题", "")
    }

    /// Noun used when a composed filename has no descriptive part left.
    pub fn default_noun(&self) -> &'static str {
        match self {
            MaterialCategory::FinalExam | MaterialCategory::Midterm => "试卷",
            MaterialCategory::ReviewNotes => "总结",
            MaterialCategory::LectureNotes => "笔记",
            MaterialCategory::Homework => "作业",
            MaterialCategory::Slides => "PPT",
            MaterialCategory::Other => "资料",
        }
    }

    /// Parse a label, falling back to `Other` for anything unrecognized.
    pub fn from_label_or_other(label: &str) -> Self {
        label.parse().unwrap_or(MaterialCategory::Other)
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MaterialCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        MaterialCategory::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .or_else(|| match s.to_lowercase().as_str() {
                "final_exam" | "final" => Some(MaterialCategory::FinalExam),
                "midterm" => Some(MaterialCategory::Midterm),
                "review_notes" | "review" => Some(MaterialCategory::ReviewNotes),
                "lecture_notes" | "notes" => Some(MaterialCategory::LectureNotes),
                "homework" => Some(MaterialCategory::Homework),
                "slides" => Some(MaterialCategory::Slides),
                "other" => Some(MaterialCategory::Other),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown material category: {}", s))
    }
}
