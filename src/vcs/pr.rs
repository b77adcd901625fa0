//! Branch names, commit messages and pull request text.

use chrono::{DateTime, Local, TimeZone};

/// One uploaded file as listed in a pull request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrFile {
    pub course: String,
    pub filename: String,
    pub category: String,
}

/// Branch name `<prefix>/<course>-YYYYMMDD-HHMMSS` for the current time.
pub fn branch_name(prefix: &str, course: &str) -> String {
    branch_name_at(prefix, course, &Local::now())
}

pub fn branch_name_at<Tz: TimeZone>(prefix: &str, course: &str, at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let safe: String = course
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':' | '~' | '^' | '?' | '*' | '[') {
                '-'
            } else {
                c
            }
        })
        .collect();
    format!(
        "{}/{}-{}",
        prefix.trim_end_matches('/'),
        safe,
        at.format("%Y%m%d-%H%M%S")
    )
}

/// Commit message naming one course, or up to three plus a total.
pub fn commit_message(courses: &[String], file_count: usize) -> String {
    match courses {
        [course] => format!("添加: {} - {}个文件", course, file_count),
        _ => {
            let mut list = courses
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join("、");
            if courses.len() > 3 {
                list.push_str(&format!("等{}门课程", courses.len()));
            }
            format!("添加: {} - 共{}个文件", list, file_count)
        }
    }
}

pub fn pr_title(courses: &[String], file_count: usize) -> String {
    match courses {
        [course] => format!("添加: {} - {}个资料", course, file_count),
        _ => {
            let list = courses
                .iter()
                .take(2)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let more = if courses.len() > 2 { "等" } else { "" };
            format!("添加: {}{} - {}个资料", list, more, file_count)
        }
    }
}

/// Markdown body: submission type, one table per course, checklist.
pub fn pr_body(files: &[PrFile]) -> String {
    let mut courses: Vec<(&str, Vec<&PrFile>)> = Vec::new();
    for file in files {
        match courses.iter_mut().find(|(name, _)| *name == file.course) {
            Some((_, list)) => list.push(file),
            None => courses.push((file.course.as_str(), vec![file])),
        }
    }

    let mut body = String::from("## 📝 PR 说明\n\n");
    body.push_str("### 本次提交类型\n\n");
    body.push_str("- [x] 📚 添加新资料\n");
    body.push_str("- [ ] ✏️ 修正错误\n");
    body.push_str("- [ ] 🆕 添加新课程\n");
    body.push_str("- [ ] 🔧 其他改进\n\n");

    body.push_str("### 资料清单\n\n");
    for (course, list) in courses {
        body.push_str(&format!("#### 📘 {}\n\n", course));
        body.push_str("| 文件名 | 类型 |\n");
        body.push_str("|--------|------|\n");
        for file in list {
            body.push_str(&format!(
                "| {} | {} |\n",
                file.filename.replace('|', "\\|"),
                file.category
            ));
        }
        body.push('\n');
    }

    body.push_str("### Checklist\n\n");
    body.push_str("- [x] 文件已放入正确的目录\n");
    body.push_str("- [x] 已在对应的 `.mdx` 文件中添加下载链接\n");
    body.push_str("- [x] 资料内容清晰可读\n");
    body.push_str("- [x] 确认无版权问题\n\n");
    body.push_str("---\n\n");
    body.push_str("*此PR由 share-upload 自动生成*\n");
    body
}
