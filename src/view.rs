//! Server-side rendering of the catalog page.
//!
//! Every value that originates from the store goes through `html_escape`
//! before it reaches the markup.

use std::fmt::Write;

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use url::Url;

use crate::models::{Episode, Link, Stats};

const PAGE_TEMPLATE: &str = include_str!("../templates/index.html");

const NO_LINKS: &str = r#"<div class="no-links">No streaming links available yet</div>"#;

/// Renders the full page with the stats block, the episode grid and the
/// options of the submission form.
pub fn render_page(episodes: &[Episode], stats: &Stats) -> String {
    let stats = render_stats(stats);
    let grid = render_episode_grid(episodes);
    let options = render_episode_options(episodes);
    fill(
        PAGE_TEMPLATE,
        &[
            ("stats", &stats),
            ("episodes", &grid),
            ("episode_options", &options),
        ],
    )
}

pub fn render_stats(stats: &Stats) -> String {
    format!(
        r#"<div class="stat-item"><span class="stat-number" data-stat="total_episodes">{}</span><span class="stat-label">Episodes</span></div><div class="stat-item"><span class="stat-number" data-stat="episodes_with_links">{}</span><span class="stat-label">With links</span></div><div class="stat-item"><span class="stat-number" data-stat="total_links">{}</span><span class="stat-label">Links</span></div>"#,
        stats.total_episodes, stats.episodes_with_links, stats.total_links,
    )
}

pub fn render_episode_grid(episodes: &[Episode]) -> String {
    let mut out = String::new();
    for (index, episode) in episodes.iter().enumerate() {
        render_episode_card(&mut out, episode, index);
    }
    out
}

fn render_episode_card(out: &mut String, episode: &Episode, index: usize) {
    let _ = write!(
        out,
        r#"<div class="episode-card" style="--card-index: {index}"><div class="episode-header"><span class="episode-number">{code}</span><span class="episode-date">{date}</span></div><h3 class="episode-title">{title}</h3><p class="episode-description">{description}</p><div class="episode-links">{links}</div></div>"#,
        code = encode_text(&episode.code()),
        date = format_air_date(episode.air_date),
        title = encode_text(&episode.title),
        description = encode_text(&episode.description),
        links = render_links(&episode.links),
    );
}

fn render_links(links: &[Link]) -> String {
    if links.is_empty() {
        return NO_LINKS.to_string();
    }
    let mut out = String::new();
    for link in links {
        let action = match watch_href(&link.url) {
            Some(href) => format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="watch-btn">Watch</a>"#,
                encode_double_quoted_attribute(&href)
            ),
            None => r#"<span class="watch-btn disabled" title="Unsupported link">Watch</span>"#
                .to_string(),
        };
        let _ = write!(
            out,
            r#"<div class="link-item"><div class="link-info"><span class="link-quality">{}</span><span class="link-source">{}</span></div>{action}</div>"#,
            encode_text(&link.quality),
            encode_text(&link.source),
        );
    }
    out
}

pub fn render_episode_options(episodes: &[Episode]) -> String {
    let mut out = String::new();
    for episode in episodes {
        let label = format!("{} - {}", episode.code(), episode.title);
        let _ = write!(
            out,
            r#"<option value="{}">{}</option>"#,
            episode.id,
            encode_text(&label)
        );
    }
    out
}

/// Formats an air date the way the cards display it, e.g. `May 25, 2025`.
pub fn format_air_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Only web links get a clickable target; anything else (`javascript:`,
/// `data:`, unparsable text) is rendered inert.
fn watch_href(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url.into()),
        _ => None,
    }
}

/// Substitutes `{{name}}` slots in a single pass so slot values are never
/// rescanned for further slots.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match slots.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SEASON;

    fn episode(links: Vec<Link>) -> Episode {
        Episode {
            id: 7,
            title: "The Rick, The Mort & The Ugly".into(),
            description: "<script>alert('broh')</script>".into(),
            season: SEASON,
            episode: 3,
            air_date: NaiveDate::from_ymd_opt(2025, 6, 8).unwrap(),
            links,
        }
    }

    fn link(url: &str) -> Link {
        Link {
            url: url.into(),
            quality: "1080p".into(),
            source: "google drive".into(),
        }
    }

    #[test]
    fn test_format_air_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        assert_eq!(format_air_date(date), "May 25, 2025");
        let date = NaiveDate::from_ymd_opt(2025, 7, 6).unwrap();
        assert_eq!(format_air_date(date), "Jul 6, 2025");
    }

    #[test]
    fn test_card_escapes_untrusted_text() {
        let html = render_episode_grid(&[episode(vec![])]);
        assert!(html.contains("The Rick, The Mort &amp; The Ugly"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("S8E3"));
        assert!(html.contains("Jun 8, 2025"));
    }

    #[test]
    fn test_card_without_links_shows_placeholder() {
        let html = render_episode_grid(&[episode(vec![])]);
        assert!(html.contains("No streaming links available yet"));
        assert!(!html.contains("link-item"));
    }

    #[test]
    fn test_card_renders_one_row_per_link() {
        let html = render_episode_grid(&[episode(vec![
            link("https://example.com/a"),
            link("http://example.com/b"),
        ])]);
        assert_eq!(html.matches("class=\"link-item\"").count(), 2);
        assert!(html.contains(r#"href="https://example.com/a""#));
        assert!(html.contains(r#"href="http://example.com/b""#));
        assert!(!html.contains("No streaming links"));
    }

    #[test]
    fn test_non_web_links_are_inert() {
        let html = render_episode_grid(&[episode(vec![
            link("javascript:alert(1)"),
            link("not a url"),
        ])]);
        assert!(!html.contains("href="));
        assert_eq!(html.matches("watch-btn disabled").count(), 2);
    }

    #[test]
    fn test_link_href_cannot_break_attribute() {
        let html = render_episode_grid(&[episode(vec![link(
            "https://example.com/?q=\"><img src=x>",
        )])]);
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_episode_options() {
        let html = render_episode_options(&[episode(vec![])]);
        assert_eq!(
            html,
            r#"<option value="7">S8E3 - The Rick, The Mort &amp; The Ugly</option>"#
        );
    }

    #[test]
    fn test_fill_is_single_pass() {
        let out = fill(
            "<a>{{ first }}</a><b>{{second}}</b>{{unknown}}",
            &[("first", "{{second}}"), ("second", "2")],
        );
        assert_eq!(out, "<a>{{second}}</a><b>2</b>{{unknown}}");
    }

    #[test]
    fn test_render_page_fills_every_slot() {
        let stats = Stats {
            total_episodes: 10,
            total_links: 1,
            episodes_with_links: 1,
        };
        let html = render_page(&[episode(vec![link("https://example.com")])], &stats);
        assert!(!html.contains("{{"));
        assert!(html.contains(r#"data-stat="total_episodes">10<"#));
        assert!(html.contains(r#"<option value="7">"#));
        assert!(html.contains("episode-card"));
    }
}
