//! Page template for newly created courses.

use crate::hints::MaterialCategory;

/// Sections every new course page starts with.
const INITIAL_SECTIONS: [MaterialCategory; 5] = [
    MaterialCategory::FinalExam,
    MaterialCategory::Midterm,
    MaterialCategory::ReviewNotes,
    MaterialCategory::LectureNotes,
    MaterialCategory::Homework,
];

/// Render the initial page of a course.
pub fn course_page(course_name: &str) -> String {
    let mut page = String::new();
    page.push_str("import { FileDownload } from '@/components/FileDownload'\n");
    page.push_str("import { Comments } from '@/components/Comments'\n\n");
    page.push_str(&format!("# 📚 {}\n\n", course_name));
    page.push_str(&format!("> 本页面收集了{}课程的相关资料\n\n", course_name));

    for category in INITIAL_SECTIONS {
        page.push_str(category.heading());
        page.push_str("\n\n---\n\n");
    }

    page.push_str("<Comments />\n");
    page
}
