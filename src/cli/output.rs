use std::io::{BufRead, Write};

use colored::Colorize;

/// Print a success message with a green checkmark prefix.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg.green());
}

/// Print a yellow notice.
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an error message to stderr in red.
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print an informational line without decoration.
pub fn info(msg: &str) {
    println!("{}", msg);
}

/// Print a blue section title.
pub fn header(msg: &str) {
    println!("{}", msg.blue());
}

/// Print a cyan line, e.g. a URL the user has to open.
pub fn highlight(msg: &str) {
    println!("{}", msg.cyan());
}

/// Yellow text for inline values the user has to act on.
pub fn emphasis(msg: &str) -> String {
    msg.yellow().to_string()
}

/// Print an indented `label: value` pair with the value in cyan.
pub fn field(label: &str, value: &str) {
    println!("  {}: {}", label, value.cyan());
}

/// Like [`field`], with the value in the given status color.
pub fn status_field(label: &str, value: &str, ok: bool) {
    let value = if ok { value.green() } else { value.yellow() };
    println!("  {}: {}", label, value);
}

/// Ask a yes/no question on stdin; anything but `y`/`yes` (or EOF) is no.
pub fn confirm(prompt: &str) -> std::io::Result<bool> {
    print!("{} [y/N]: ", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        return Ok(false);
    }
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Create a progress spinner with the given message.
///
/// The spinner ticks at 80ms intervals and uses braille-dot characters.
/// Call `.finish_with_message()` or `.finish_and_clear()` when done.
pub fn spinner(msg: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
