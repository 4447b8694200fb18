//! HTML rendering for the front page.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::item::ParsedItem;

const DISCUSSION_BASE: &str = "https://news.ycombinator.com/item?id=";

/// Everything the front page shows
#[derive(Debug, Clone)]
pub struct PageData<'a> {
    /// Stories in rank order
    pub stories: &'a [ParsedItem],
    /// How many stories were asked for
    pub requested: usize,
    /// How long it took to build the list
    pub elapsed: Duration,
    /// Reference point for "3 hours ago" labels
    pub now: DateTime<Utc>,
}

/// Render the story list page.
pub fn render_index(page: &PageData<'_>) -> String {
    let mut rows = String::new();

    if page.stories.is_empty() {
        rows.push_str(r#"<p class="empty">No stories could be loaded right now.</p>"#);
    } else {
        rows.push_str("<ol>\n");
        for story in page.stories {
            rows.push_str(&render_story(story, page.now));
        }
        rows.push_str("</ol>\n");
    }

    if page.stories.len() < page.requested {
        write!(
            rows,
            r#"<p class="notice">Showing {} of {} stories.</p>"#,
            page.stories.len(),
            page.requested
        )
        .ok();
        rows.push('\n');
    }

    let footer = format!(
        r#"<p class="time">This page was rendered in {}</p>"#,
        format_elapsed(page.elapsed)
    );

    build_page("Quiet Hacker News", &format!("{rows}{footer}"))
}

fn render_story(story: &ParsedItem, now: DateTime<Utc>) -> String {
    let item = &story.item;
    // Non-http(s) links are shown as plain titles
    let mut line = match story.web_link() {
        Some(link) => format!(
            r#"<li><a href="{}">{}</a>"#,
            encode_double_quoted_attribute(link),
            encode_text(&item.title)
        ),
        None => format!("<li>{}", encode_text(&item.title)),
    };
    if !story.host.is_empty() {
        write!(line, r#" <span class="host">({})</span>"#, encode_text(&story.host)).ok();
    }

    let age = item
        .created_at()
        .map(|t| format!(" {}", time_ago(t, now)))
        .unwrap_or_default();
    write!(
        line,
        r#"<br><span class="meta">{} points by {}{} | <a href="{}{}">{} comments</a></span></li>"#,
        item.score,
        encode_text(&item.by),
        age,
        DISCUSSION_BASE,
        item.id,
        item.descendants
    )
    .ok();
    line.push('\n');
    line
}

/// Coarse "N units ago" label
fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds().max(0);
    let (value, unit) = match secs {
        0..=59 => return "just now".to_string(),
        60..=3599 => (secs / 60, "minute"),
        3600..=86_399 => (secs / 3600, "hour"),
        _ => (secs / 86_400, "day"),
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural} ago")
}

fn format_elapsed(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    if ms < 1000.0 {
        format!("{ms:.1}ms")
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: Verdana, Geneva, sans-serif; font-size: 10pt; max-width: 960px; margin: 0 auto; padding: 8px; background: #f6f6ef; }}
h1 {{ background: #ff6600; font-size: 11pt; padding: 4px 8px; margin: 0 0 8px; }}
li {{ margin-bottom: 6px; }}
a {{ color: #000; text-decoration: none; }}
.host, .meta, .meta a {{ color: #828282; font-size: 8pt; }}
.notice, .empty {{ color: #a33; }}
.time {{ color: #828282; font-size: 8pt; margin-top: 16px; }}
</style>
</head>
<body>
<h1>{title}</h1>
{content}
</body>
</html>
"#,
        title = encode_text(title),
        content = content
    )
}
