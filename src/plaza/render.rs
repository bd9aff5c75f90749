//! # View Renderer
//!
//! Maps a filtered view into terminal text for one of two presentation
//! modes: `grid` (one card per record, all summary attributes) and `list`
//! (one compact line per record). Rendering always returns the *complete*
//! replacement content for the output surface, so re-rendering the same
//! view twice produces identical output with nothing accumulated.
//!
//! Rendering never fails: records with missing display values get an
//! em-dash placeholder, and an empty view renders an explicit
//! "no results" line so it cannot be mistaken for a not-yet-loaded state.
//!
//! Layout math (width, truncation, padding) is Unicode-aware; style
//! selection keys off the record's category badge.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::model::Record;

/// Configuration for list rendering.
pub const LINE_WIDTH: usize = 100;
const CATEGORY_WIDTH: usize = 14;
const PLACEHOLDER: &str = "—";

/// Shown for an empty view; distinct from any loading or error banner.
pub const NO_RESULTS: &str = "No matching records.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        })
    }
}

/// Render a view in the given mode. Pure: same records + mode, same output.
pub fn render<R: Record>(records: &[&R], mode: ViewMode) -> String {
    render_internal(records, mode, true)
}

fn render_internal<R: Record>(records: &[&R], mode: ViewMode, use_color: bool) -> String {
    if records.is_empty() {
        return format!("{}\n", NO_RESULTS);
    }
    match mode {
        ViewMode::Grid => {
            let cards: Vec<String> = records.iter().map(|r| card(*r, use_color)).collect();
            cards.join("\n")
        }
        ViewMode::List => {
            let mut out = String::new();
            for record in records {
                out.push_str(&list_line(*record, use_color));
                out.push('\n');
            }
            out
        }
    }
}

/// One grid card: badge + title, blurb, aligned summary fields, tag row.
fn card<R: Record>(record: &R, use_color: bool) -> String {
    let mut out = String::new();

    let title = record.title();
    let title = if title.is_empty() { PLACEHOLDER } else { title };
    match record.category() {
        Some(category) => {
            out.push_str(&format!(
                "{} {}\n",
                badge(&category, use_color),
                paint_bold(title, use_color)
            ));
        }
        None => out.push_str(&format!("{}\n", paint_bold(title, use_color))),
    }

    if let Some(blurb) = record.blurb() {
        out.push_str(&format!(
            "    {}\n",
            truncate_to_width(blurb, LINE_WIDTH.saturating_sub(4))
        ));
    }

    let fields = record.summary();
    let label_width = fields
        .iter()
        .map(|f| f.label.width())
        .max()
        .unwrap_or(0);
    for field in &fields {
        let value = if field.value.is_empty() {
            PLACEHOLDER
        } else {
            field.value.as_str()
        };
        let label = format!("{}:", field.label);
        let line = format!("    {:<width$} {}\n", label, value, width = label_width + 1);
        out.push_str(&line);
    }

    let tags = record.tags();
    if !tags.is_empty() {
        let row = tags.join(" · ");
        out.push_str(&format!("    {}\n", paint_dim(&row, use_color)));
    }

    out
}

/// One list line: title + subtitle, padded, category right-aligned.
fn list_line<R: Record>(record: &R, use_color: bool) -> String {
    let category = record.category().unwrap_or_default();
    let title = record.title();
    let title = if title.is_empty() { PLACEHOLDER } else { title };
    let subtitle = record.subtitle();

    let body = if subtitle.is_empty() {
        title.to_string()
    } else {
        format!("{} — {}", title, subtitle)
    };

    let available = LINE_WIDTH.saturating_sub(4 + 2 + CATEGORY_WIDTH);
    let body = truncate_to_width(&body, available);
    let padding = " ".repeat(available.saturating_sub(body.width()));
    let category_col = format!("{:>width$}", category, width = CATEGORY_WIDTH);

    format!(
        "    {}{}  {}",
        body,
        padding,
        paint_dim(&category_col, use_color)
    )
}

/// Full detail view for one record, used by `show` and the browse dialog.
pub fn render_detail<R: Record>(record: &R) -> String {
    render_detail_internal(record, true)
}

fn render_detail_internal<R: Record>(record: &R, use_color: bool) -> String {
    let mut out = String::new();

    match record.category() {
        Some(category) => out.push_str(&format!(
            "{} {}\n",
            badge(&category, use_color),
            paint_bold(record.title(), use_color)
        )),
        None => out.push_str(&format!("{}\n", paint_bold(record.title(), use_color))),
    }
    out.push_str("--------------------------------\n");

    if let Some(blurb) = record.blurb() {
        out.push_str(blurb);
        out.push_str("\n\n");
    }

    let fields = record.summary();
    let label_width = fields.iter().map(|f| f.label.width()).max().unwrap_or(0);
    for field in &fields {
        let value = if field.value.is_empty() {
            PLACEHOLDER
        } else {
            field.value.as_str()
        };
        let label = format!("{}:", field.label);
        out.push_str(&format!(
            "{:<width$} {}\n",
            label,
            value,
            width = label_width + 1
        ));
    }

    for section in record.detail_sections() {
        if section.items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}\n", paint_bold(section.heading, use_color)));
        for item in &section.items {
            out.push_str(&format!("  - {}\n", item));
        }
    }

    out
}

fn badge(category: &str, use_color: bool) -> String {
    if !use_color {
        return format!("[{}]", category);
    }
    let tag = format!("[{}]", category);
    match category.to_ascii_lowercase().as_str() {
        "gold" => tag.yellow().bold().to_string(),
        "silver" => tag.cyan().to_string(),
        "beginner" => tag.green().to_string(),
        "intermediate" => tag.yellow().to_string(),
        "advanced" => tag.red().to_string(),
        _ => tag.normal().to_string(),
    }
}

fn paint_bold(s: &str, use_color: bool) -> String {
    if use_color {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

fn paint_dim(s: &str, use_color: bool) -> String {
    if use_color {
        s.dimmed().to_string()
    } else {
        s.to_string()
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

/// Relative time for ledger listings, right-padded to a stable column.
pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>14}", time_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_ride, Attraction, Member, MembershipTier};

    fn member() -> Member {
        Member {
            id: "m1".into(),
            name: "Premier Cocoa Exports".into(),
            description: "Cocoa sourcing and export".into(),
            address: "Dugbe, Ibadan".into(),
            phone: "+234 803 555 0001".into(),
            website: "https://www.premiercocoa.ng".into(),
            year_established: 1987,
            membership_level: MembershipTier::Gold,
            services: vec!["sourcing".into(), "export".into()],
        }
    }

    #[test]
    fn empty_view_renders_the_placeholder_once() {
        let records: Vec<&Member> = Vec::new();
        let output = render_internal(&records, ViewMode::Grid, false);
        assert_eq!(output, format!("{}\n", NO_RESULTS));
        let output = render_internal(&records, ViewMode::List, false);
        assert_eq!(output.matches(NO_RESULTS).count(), 1);
    }

    #[test]
    fn grid_card_shows_all_summary_attributes() {
        let m = member();
        let output = render_internal(&[&m], ViewMode::Grid, false);
        assert!(output.contains("[Gold]"));
        assert!(output.contains("Premier Cocoa Exports"));
        assert!(output.contains("Address:"));
        assert!(output.contains("Dugbe, Ibadan"));
        assert!(output.contains("premiercocoa.ng"));
        assert!(output.contains("1987"));
        assert!(output.contains("sourcing · export"));
    }

    #[test]
    fn list_line_is_one_line_per_record() {
        let a = member();
        let mut b = member();
        b.id = "m2".into();
        b.name = "Oke-Ado Motors".into();
        let output = render_internal(&[&a, &b], ViewMode::List, false);
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("Est. 1987 • Gold Member"));
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let m = member();
        let ride = sample_ride();
        for mode in [ViewMode::Grid, ViewMode::List] {
            let first = render_internal(&[&m], mode, false);
            let second = render_internal(&[&m], mode, false);
            assert_eq!(first, second);
            assert_eq!(first.matches("Premier Cocoa Exports").count(), 1);

            let first = render_internal(&[&ride], mode, false);
            let second = render_internal(&[&ride], mode, false);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn missing_display_values_fall_back_to_placeholders() {
        let mut ride = sample_ride();
        ride.duration = None;
        ride.meeting_point = None;
        let output = render_internal(&[&ride], ViewMode::Grid, false);
        assert!(output.contains(&format!("Duration:      {}", PLACEHOLDER)));
    }

    #[test]
    fn records_without_a_category_render_without_a_badge() {
        let attraction = Attraction {
            id: "a1".into(),
            name: "Mapo Hall".into(),
            address: "Mapo Hill, Ibadan".into(),
            description: "Historic town hall".into(),
            image: None,
            image_alt: None,
        };
        let output = render_internal(&[&attraction], ViewMode::Grid, false);
        assert!(output.contains("Mapo Hall"));
        assert!(!output.contains('['));
    }

    #[test]
    fn long_titles_are_truncated_with_ellipsis() {
        let mut m = member();
        m.name = "A".repeat(200);
        let output = render_internal(&[&m], ViewMode::List, false);
        assert!(output.contains('…'));
        for line in output.lines() {
            assert!(line.width() <= LINE_WIDTH);
        }
    }

    #[test]
    fn detail_view_includes_sections() {
        let ride = sample_ride();
        let output = render_detail_internal(&ride, false);
        assert!(output.contains("[Beginner] Sunrise Loop"));
        assert!(output.contains("What to expect"));
        assert!(output.contains("  - Helmet"));
        assert!(output.contains("of 15 spots available"));
    }

    #[test]
    fn mode_parses_and_displays() {
        assert_eq!("grid".parse::<ViewMode>().unwrap(), ViewMode::Grid);
        assert_eq!("LIST".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert!("cards".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Grid.to_string(), "grid");
    }
}
