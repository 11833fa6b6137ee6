//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use roster_core::{ScreenState, User};

use crate::cli::{ColorMode, OutputFormat};
use crate::config::OutputOpts;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Street")]
    street: String,
    #[tabled(rename = "City")]
    city: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            email: u.email.clone(),
            street: u.address.street.clone(),
            city: u.address.city.clone(),
        }
    }
}

// ── Color helpers ───────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render users in the chosen format.
pub fn render_users(format: OutputFormat, users: &[User]) -> String {
    match format {
        OutputFormat::Table => {
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json_pretty(users),
        OutputFormat::JsonCompact => render_json_compact(users),
        OutputFormat::Yaml => render_yaml(users),
        OutputFormat::Plain => users
            .iter()
            .map(|u| u.id.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Error line shown above the list, like a banner on the screen.
pub fn render_error_banner(message: &str, color: bool) -> String {
    let line = format!("error: {message}");
    if color {
        line.red().bold().to_string()
    } else {
        line
    }
}

/// Print the whole screen: the error banner (stderr) and the list (stdout).
pub fn print_screen(state: &ScreenState, opts: &OutputOpts) {
    if state.has_error() {
        let mut stderr = io::stderr().lock();
        let _ = writeln!(
            stderr,
            "{}",
            render_error_banner(&state.error, should_color(opts.color))
        );
    }
    print_output(&render_users(opts.format, &state.users), opts.quiet);
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Pretty-printed JSON.
pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

/// Compact single-line JSON.
pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

/// YAML output.
pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}
