//! Markdown rendering for knowledge write-ups.

use crate::knowledge::domain::WriteUp;
use chrono::TimeDelta;
use minijinja::Environment;
use serde::Serialize;

/// Template used to render knowledge entry bodies.
pub const WRITE_UP_TEMPLATE: &str = "\
# {{ title }}

{{ summary }}

{% if overrun_reason %}
> **Overrun:** {{ overrun_reason }}

{% endif %}
{% if tags %}
Tags: {{ tags | join(\", \") }}
{% endif %}
Time spent: {{ time_spent }}
";

#[derive(Serialize)]
struct WriteUpContext<'a> {
    title: &'a str,
    summary: &'a str,
    overrun_reason: Option<&'a str>,
    tags: &'a [String],
    time_spent: String,
}

/// Renders a write-up into its Markdown body.
///
/// # Errors
///
/// Returns the underlying [`minijinja::Error`] when rendering fails.
pub fn render_write_up(write_up: &WriteUp) -> Result<String, minijinja::Error> {
    let mut environment = Environment::new();
    environment.set_trim_blocks(true);
    let context = WriteUpContext {
        title: &write_up.title,
        summary: &write_up.summary,
        overrun_reason: write_up.overrun_reason.as_deref(),
        tags: &write_up.tags,
        time_spent: format_duration(write_up.actual_seconds),
    };
    environment.render_str(WRITE_UP_TEMPLATE, context)
}

/// Formats seconds as `"<h>h <mm>m <ss>s"`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let span = i64::try_from(seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX);
    let hours = span.num_hours();
    let minutes = span.num_minutes() - hours * 60;
    let remaining_seconds = span.num_seconds() - span.num_minutes() * 60;
    format!("{hours}h {minutes:02}m {remaining_seconds:02}s")
}
