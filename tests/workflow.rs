//! End-to-end runs of the upload workflow against a temporary site checkout.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;

use share_upload::config::{Config, RunMode};
use share_upload::course::CourseRegistry;
use share_upload::document::{course_page, CourseDocument};
use share_upload::error::{Error, Result};
use share_upload::hints::MaterialCategory;
use share_upload::prompt::Prompter;
use share_upload::vcs::{PullRequest, PullRequestHost, VersionControl};
use share_upload::workflow::{Publisher, RunOutcome, Workflow};

#[derive(Debug)]
enum Answer {
    Select(usize),
    Checkbox(Vec<usize>),
    /// None accepts the offered default.
    Text(Option<&'static str>),
    Confirm(bool),
    Cancel,
}

/// Prompter replaying a fixed script; any unexpected question fails the test.
struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(answers: Vec<Answer>) -> Self {
        Self {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    fn next(&mut self, prompt: &str) -> Answer {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected prompt: {}", prompt))
    }

    fn assert_finished(&self) {
        assert!(
            self.answers.is_empty(),
            "unused answers {:?}, asked {:?}",
            self.answers,
            self.asked
        );
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, choices: &[String], _default: usize) -> Result<usize> {
        match self.next(prompt) {
            Answer::Select(i) => {
                assert!(i < choices.len(), "{} has no choice {}", prompt, i);
                Ok(i)
            }
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("{} answered with {:?}", prompt, other),
        }
    }

    fn checkbox(&mut self, prompt: &str, _choices: &[String]) -> Result<Vec<usize>> {
        match self.next(prompt) {
            Answer::Checkbox(indices) => Ok(indices),
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("{} answered with {:?}", prompt, other),
        }
    }

    fn text(
        &mut self,
        prompt: &str,
        default: Option<&str>,
        validate: &dyn Fn(&str) -> bool,
    ) -> Result<String> {
        let answer = match self.next(prompt) {
            Answer::Text(Some(text)) => text.to_string(),
            Answer::Text(None) => default.unwrap_or_default().to_string(),
            Answer::Cancel => return Err(Error::Cancelled),
            other => panic!("{} answered with {:?}", prompt, other),
        };
        assert!(validate(&answer), "{} rejected '{}'", prompt, answer);
        Ok(answer)
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt) {
            Answer::Confirm(yes) => Ok(yes),
            Answer::Cancel => Err(Error::Cancelled),
            other => panic!("{} answered with {:?}", prompt, other),
        }
    }
}

/// Version control fake recording every call.
#[derive(Default)]
struct RecordingVcs {
    calls: RefCell<Vec<String>>,
    staged: RefCell<Vec<String>>,
    fail_commit: bool,
}

impl RecordingVcs {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl VersionControl for RecordingVcs {
    fn current_branch(&self) -> Result<String> {
        Ok("master".to_string())
    }

    fn branch_exists(&self, _name: &str) -> Result<bool> {
        Ok(false)
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.record(format!("create {}", name));
        Ok(())
    }

    fn switch_branch(&self, name: &str) -> Result<()> {
        self.record(format!("switch {}", name));
        Ok(())
    }

    fn delete_branch(&self, name: &str) -> Result<()> {
        self.record(format!("delete {}", name));
        Ok(())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.record("stage".to_string());
        self.staged.borrow_mut().extend(paths.iter().cloned());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message));
        if self.fail_commit {
            return Err(Error::Vcs {
                command: "git commit".to_string(),
                message: "nothing to commit".to_string(),
            });
        }
        Ok(())
    }

    fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(format!("push {} {}", remote, branch));
        Ok(())
    }

    fn remote_url(&self, _remote: &str) -> Result<Option<String>> {
        Ok(Some("git@github.com:alice/share.git".to_string()))
    }
}

/// Pull request host fake.
struct FakeHost {
    fork: bool,
    fail: bool,
    requests: RefCell<Vec<PullRequest>>,
}

impl FakeHost {
    fn fork() -> Self {
        Self {
            fork: true,
            fail: false,
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl PullRequestHost for FakeHost {
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }

    fn is_fork(&self) -> Result<bool> {
        Ok(self.fork)
    }

    fn upstream_repo(&self) -> Result<Option<String>> {
        Ok(self.fork.then(|| "fdu/share".to_string()))
    }

    fn create_pull_request(&self, request: &PullRequest) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());
        if self.fail {
            return Err(Error::PullRequest("rate limited".to_string()));
        }
        Ok("https://github.com/fdu/share/pull/7".to_string())
    }
}

const META: &str = "export default {\n  'shujujiegou': '🌲 数据结构'\n}\n";
const EXAM: &str = "数据结构/2023-2024学年第一学期期末试卷.pdf";

/// Site checkout with one registered course and the given staged files.
fn site(staged: &[&str]) -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_root(dir.path());

    fs::create_dir_all(config.courses_dir()).unwrap();
    fs::create_dir_all(config.resources_dir().join("数据结构")).unwrap();
    fs::write(config.meta_file(), META).unwrap();
    fs::write(config.course_page("shujujiegou"), course_page("数据结构")).unwrap();

    for relative in staged {
        stage(&config, relative);
    }
    (dir, config)
}

fn stage(config: &Config, relative: &str) {
    let path = config.upload_dir().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, b"%PDF-1.4").unwrap();
}

fn page(config: &Config, key: &str) -> CourseDocument {
    CourseDocument::load(&config.course_page(key)).unwrap()
}

fn run(
    config: &Config,
    prompter: &mut ScriptedPrompter,
    publisher: Option<Publisher<'_>>,
) -> Result<RunOutcome> {
    let registry = CourseRegistry::load(&config.meta_file()).unwrap();
    let mut workflow = Workflow::new(config, registry, prompter, publisher);
    workflow.run()
}

/// Answers filing the staged exam under 数据结构 as a final exam.
fn file_exam(filename: &'static str) -> Vec<Answer> {
    vec![
        Answer::Checkbox(vec![0]),
        Answer::Select(0),
        Answer::Select(0),
        Answer::Text(None),
        Answer::Text(Some(filename)),
    ]
}

#[test]
fn test_publishes_staged_exam() {
    let (_dir, config) = site(&[EXAM]);
    let vcs = RecordingVcs::default();
    let host = FakeHost::fork();

    let mut script = file_exam("2024-期末-数据结构.pdf");
    script.push(Answer::Confirm(true));
    script.push(Answer::Confirm(true));
    let mut prompter = ScriptedPrompter::new(script);

    let outcome = run(
        &config,
        &mut prompter,
        Some(Publisher {
            vcs: &vcs,
            host: &host,
        }),
    )
    .unwrap();
    prompter.assert_finished();

    let web_path = "/resources/数据结构/2024-期末-数据结构.pdf";
    match outcome {
        RunOutcome::Published {
            processed,
            branch,
            pr_url,
        } => {
            assert_eq!(processed, 1);
            assert!(branch.starts_with("add/数据结构-"));
            assert_eq!(pr_url.as_deref(), Some("https://github.com/fdu/share/pull/7"));
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    assert!(config.public_dir().join(web_path.trim_start_matches('/')).exists());
    assert_eq!(
        page(&config, "shujujiegou").entries_in_section(MaterialCategory::FinalExam),
        vec![web_path]
    );

    let calls = vcs.calls();
    assert!(calls[0].starts_with("create add/数据结构-"));
    assert_eq!(calls[1], "stage");
    assert_eq!(calls[2], "commit 添加: 数据结构 - 1个文件");
    assert!(calls[3].starts_with("push origin add/"));
    assert_eq!(
        *vcs.staged.borrow(),
        vec![
            "public/resources/数据结构/2024-期末-数据结构.pdf",
            "pages/courses/shujujiegou.mdx",
            "pages/courses/_meta.ts",
        ]
    );

    let requests = host.requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].title, "添加: 数据结构 - 1个资料");
    assert_eq!(requests[0].repo.as_deref(), Some("fdu/share"));
    assert_eq!(requests[0].base, "master");
    assert!(requests[0].body.contains("| 2024-期末-数据结构.pdf | 期末考试 |"));

    // Cleanup removed the staged file and its now-empty course folder
    assert!(!config.upload_dir().join(EXAM).exists());
    assert!(!config.upload_dir().join("数据结构").exists());
    assert!(config.upload_dir().exists());
}

#[test]
fn test_commit_failure_restores_branch() {
    let (_dir, config) = site(&[EXAM]);
    let vcs = RecordingVcs {
        fail_commit: true,
        ..Default::default()
    };
    let host = FakeHost::fork();

    let mut script = file_exam("2024-期末-数据结构.pdf");
    script.push(Answer::Confirm(true));
    let mut prompter = ScriptedPrompter::new(script);

    let err = run(
        &config,
        &mut prompter,
        Some(Publisher {
            vcs: &vcs,
            host: &host,
        }),
    )
    .unwrap_err();
    prompter.assert_finished();

    assert!(matches!(err, Error::Vcs { .. }));
    let calls = vcs.calls();
    let branch = calls[0].trim_start_matches("create ").to_string();
    assert_eq!(calls[calls.len() - 2], "switch master");
    assert_eq!(calls[calls.len() - 1], format!("delete {}", branch));
    assert!(!calls.iter().any(|c| c.starts_with("push")));
    assert!(host.requests.borrow().is_empty());
}

#[test]
fn test_pull_request_failure_is_not_fatal() {
    let (_dir, config) = site(&[EXAM]);
    let vcs = RecordingVcs::default();
    let host = FakeHost {
        fail: true,
        ..FakeHost::fork()
    };

    let mut script = file_exam("2024-期末-数据结构.pdf");
    script.push(Answer::Confirm(true));
    script.push(Answer::Confirm(false));
    let mut prompter = ScriptedPrompter::new(script);

    let outcome = run(
        &config,
        &mut prompter,
        Some(Publisher {
            vcs: &vcs,
            host: &host,
        }),
    )
    .unwrap();
    prompter.assert_finished();

    assert!(matches!(
        outcome,
        RunOutcome::Published { pr_url: None, .. }
    ));
    assert!(vcs.calls().iter().any(|c| c.starts_with("push")));
    // Declined cleanup keeps the staged file
    assert!(config.upload_dir().join(EXAM).exists());
}

#[test]
fn test_non_fork_skips_pull_request() {
    let (_dir, config) = site(&[EXAM]);
    let vcs = RecordingVcs::default();
    let host = FakeHost {
        fork: false,
        ..FakeHost::fork()
    };

    let mut script = file_exam("2024-期末-数据结构.pdf");
    script.push(Answer::Confirm(true));
    script.push(Answer::Confirm(false));
    let mut prompter = ScriptedPrompter::new(script);

    let outcome = run(
        &config,
        &mut prompter,
        Some(Publisher {
            vcs: &vcs,
            host: &host,
        }),
    )
    .unwrap();

    assert!(matches!(
        outcome,
        RunOutcome::Published { pr_url: None, .. }
    ));
    assert!(host.requests.borrow().is_empty());
}

#[test]
fn test_creates_course_without_git() {
    let (_dir, config) = site(&["第一次作业.pdf"]);

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Checkbox(vec![0]),
        Answer::Select(1),
        Answer::Text(Some("操作系统")),
        Answer::Text(Some("caozuoxitong")),
        Answer::Text(Some("💻")),
        Answer::Select(4),
        Answer::Text(Some("2024")),
        Answer::Text(Some("2024-作业-第一次.pdf")),
        Answer::Confirm(true),
        Answer::Confirm(false),
    ]);

    let outcome = run(&config, &mut prompter, None).unwrap();
    prompter.assert_finished();
    assert_eq!(outcome, RunOutcome::Applied { processed: 1 });

    let registry = CourseRegistry::load(&config.meta_file()).unwrap();
    assert_eq!(registry.get("caozuoxitong").unwrap().name, "操作系统");
    let meta = fs::read_to_string(config.meta_file()).unwrap();
    assert!(meta.contains("'caozuoxitong': '💻 操作系统',"));

    assert_eq!(
        page(&config, "caozuoxitong").entries_in_section(MaterialCategory::Homework),
        vec!["/resources/操作系统/2024-作业-第一次.pdf"]
    );
    assert!(config
        .resources_dir()
        .join("操作系统")
        .join("2024-作业-第一次.pdf")
        .exists());
}

#[test]
fn test_accepts_suggested_filename() {
    let (_dir, config) = site(&[EXAM]);

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Checkbox(vec![0]),
        Answer::Select(0),
        Answer::Select(0),
        Answer::Text(None),
        Answer::Text(None),
        Answer::Confirm(true),
        Answer::Confirm(false),
    ]);

    run(&config, &mut prompter, None).unwrap();
    prompter.assert_finished();

    let entries = page(&config, "shujujiegou").entries_in_section(MaterialCategory::FinalExam);
    assert_eq!(entries.len(), 1);
    let filename = entries[0].rsplit('/').next().unwrap();
    assert!(filename.starts_with("2023-期末-"), "{}", filename);
    assert!(filename.ends_with(".pdf"));
}

#[test]
fn test_chosen_year_overrides_hint() {
    let (_dir, config) = site(&[EXAM]);

    let mut prompter = ScriptedPrompter::new(vec![
        Answer::Checkbox(vec![0]),
        Answer::Select(0),
        Answer::Select(0),
        Answer::Text(Some("2022")),
        Answer::Text(None),
        Answer::Confirm(true),
        Answer::Confirm(false),
    ]);

    run(&config, &mut prompter, None).unwrap();
    prompter.assert_finished();
    assert!(prompter.asked.iter().any(|p| p == "Year:"));

    let entries = page(&config, "shujujiegou").entries_in_section(MaterialCategory::FinalExam);
    assert_eq!(entries.len(), 1);
    let filename = entries[0].rsplit('/').next().unwrap();
    assert!(filename.starts_with("2022-期末-"), "{}", filename);
}

#[test]
fn test_duplicate_entry_is_skipped() {
    let (_dir, config) = site(&[EXAM]);

    let mut first = file_exam("2024-期末-数据结构.pdf");
    first.push(Answer::Confirm(true));
    first.push(Answer::Confirm(false));
    let mut prompter = ScriptedPrompter::new(first);
    run(&config, &mut prompter, None).unwrap();

    let before = fs::read_to_string(config.course_page("shujujiegou")).unwrap();

    let mut prompter = ScriptedPrompter::new(file_exam("2024-期末-数据结构.pdf"));
    let outcome = run(&config, &mut prompter, None).unwrap();
    prompter.assert_finished();

    assert_eq!(outcome, RunOutcome::NothingToDo);
    assert_eq!(
        fs::read_to_string(config.course_page("shujujiegou")).unwrap(),
        before
    );
    let copies = fs::read_dir(config.resources_dir().join("数据结构"))
        .unwrap()
        .count();
    assert_eq!(copies, 1);
}

#[test]
fn test_invalid_files_need_confirmation() {
    let (_dir, config) = site(&[EXAM, "setup.exe"]);

    let mut prompter = ScriptedPrompter::new(vec![Answer::Confirm(false)]);
    let err = run(&config, &mut prompter, None).unwrap_err();

    prompter.assert_finished();
    assert!(err.is_cancelled());
}

#[test]
fn test_cancel_ends_run() {
    let (_dir, config) = site(&[EXAM]);

    let mut prompter = ScriptedPrompter::new(vec![Answer::Checkbox(vec![0]), Answer::Cancel]);
    let err = run(&config, &mut prompter, None).unwrap_err();

    assert!(err.is_cancelled());
    assert!(page(&config, "shujujiegou")
        .entries_in_section(MaterialCategory::FinalExam)
        .is_empty());
}

#[test]
fn test_empty_staging_dir() {
    let (_dir, config) = site(&[]);
    let mut prompter = ScriptedPrompter::new(vec![]);
    assert_eq!(
        run(&config, &mut prompter, None).unwrap(),
        RunOutcome::NothingToDo
    );
}

#[test]
fn test_inspect_mode_asks_nothing() {
    let (_dir, mut config) = site(&[EXAM, "setup.exe"]);
    config.options.mode = RunMode::Inspect;

    let mut prompter = ScriptedPrompter::new(vec![]);
    assert_eq!(
        run(&config, &mut prompter, None).unwrap(),
        RunOutcome::Inspected
    );
    assert!(config.upload_dir().join(EXAM).exists());
}
