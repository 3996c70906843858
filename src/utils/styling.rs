//! Terminal styling for the run log

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static GEM: Emoji<'_, '_> = Emoji("💎 ", ">> ");
pub static IMAGES: Emoji<'_, '_> = Emoji("🖼️  ", "");
pub static DOC: Emoji<'_, '_> = Emoji("📝 ", "");
pub static DATABASE: Emoji<'_, '_> = Emoji("🗄️  ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        GEM,
        style("DIAMOND EDA").cyan().bold()
    );
    println!(
        "    {}",
        style("Statistics, charts and a markdown report for the diamonds dataset").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the resolved locations before the run starts
pub fn print_config(cache: &Path, image_dir: &Path, report: &Path) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {}Dataset: {:<39}│", DATABASE, truncate_path(cache, 38));
    println!("    │  {}Images:  {:<39}│", IMAGES, truncate_path(image_dir, 38));
    println!("    │  {}Report:  {:<39}│", DOC, truncate_path(report, 38));
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize) {
    println!("      Found {} {}", style(count).yellow().bold(), description);
}

/// Print the final completion message with the two output locations
pub fn print_completion(image_dir: &Path, report: &Path) {
    println!();
    println!("    {} {}", GEM, style("EDA complete!").green().bold());
    println!("    {}Images saved to: {}", IMAGES, style(image_dir.display()).cyan());
    println!("    {}Report saved to: {}", DOC, style(report.display()).cyan());
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_tail() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("/very/long/path/report.md", 12), "...report.md");
    }
}
