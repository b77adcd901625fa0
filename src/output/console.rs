//! Console output utilities.

use console::style;

use crate::fs::Rejection;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     share-upload                                      ║
║     Stage course materials and open a pull request    ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print a numbered workflow step, e.g. `[2/6] Select files`.
pub fn print_step(step: usize, total: usize, message: &str) {
    println!();
    println!("{}", style(format!("[{}/{}] {}", step, total, message)).yellow().bold());
}

/// Print one staged file with its validity mark.
pub fn print_file_status(index: usize, label: &str, rejection: Option<&Rejection>) {
    match rejection {
        None => println!("  {} {}. {}", style("✓").green(), index, label),
        Some(reason) => {
            println!("  {} {}. {}", style("✗").red(), index, label);
            println!("       {}", style(reason).red());
        }
    }
}

/// Print configuration summary.
pub fn print_config_summary(root: &str, upload_dir: &str, mode: &str, skip_git: bool) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Project:  {}", root);
    println!("  Staging:  {}", upload_dir);
    println!("  Mode:     {}", mode);
    if skip_git {
        println!("  Git:      {}", style("skipped").yellow());
    }
    println!();
}
