pub mod add;
pub mod config;
pub mod export;
pub mod import;
pub mod list;
pub mod remote;
pub mod remove;
pub mod show;

use template_share::{Feedback, TemplateKind};

/// Print feedback items to stderr.
pub fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        eprintln!("{item}");
    }
}

pub fn parse_kind(s: &str) -> anyhow::Result<TemplateKind> {
    TemplateKind::parse(s)
        .ok_or_else(|| anyhow::anyhow!("unknown template kind: {s} (expected file or live)"))
}

/// Ask a yes/no question on stdin. Anything but y/yes declines.
pub fn confirm(prompt: &str) -> anyhow::Result<bool> {
    use std::io::Write;

    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}
