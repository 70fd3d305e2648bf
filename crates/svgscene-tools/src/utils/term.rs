use colored::{ColoredString, Colorize};

/// Turn off ANSI colours when NO_COLOR is set
pub fn init_color() {
    if std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }
}

/// Print an error and its cause chain to stderr
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{} {err}", error_label());
    for cause in err.chain().skip(1) {
        eprintln!("  {cause}");
    }
}

fn error_label() -> ColoredString {
    "Error:".red().bold()
}
