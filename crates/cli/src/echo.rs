use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Flatscout".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Watch a listings page for new flats\n".dimmed());
}

/// Print the one-line summary of a poll cycle
pub fn print_cycle(cycle: u64, listings: usize, fresh: usize, failures: usize) {
    let fresh_label = format!("{} new", fresh);
    let fresh_label = if fresh > 0 { fresh_label.bright_green().to_string() } else { fresh_label.dimmed().to_string() };

    let mut line = format!(
        "{} {} listings, {}",
        format!("[cycle {}]", cycle).dimmed(),
        listings.to_string().bright_white(),
        fresh_label
    );
    if failures > 0 {
        line.push_str(&format!(", {}", format!("{} skipped", failures).bright_yellow()));
    }
    eprintln!("{}", line);
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}
