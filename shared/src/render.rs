//! HTML rendering of the episode page.

use crate::Episode;

/// Site name appended to page titles.
pub const SITE_NAME: &str = "Podcastr";

const META_DESCRIPTION_CHARS: usize = 160;

// ---------------------------------------------------------------------------
// HTML escaping
// ---------------------------------------------------------------------------

/// Escape text for use between tags.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double-quoted attribute.
pub fn html_attr_escape(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Text utilities
// ---------------------------------------------------------------------------

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}

/// Drop tags from an HTML fragment, keeping text with collapsed whitespace.
fn strip_tags(html: &str) -> String {
    let mut buf = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                buf.push(' ');
            },
            _ if !in_tag => buf.push(ch),
            _ => {},
        }
    }
    buf.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// Render the full episode document.
///
/// Every field is escaped except `description`, which is injected verbatim.
pub fn render_episode_page(episode: &Episode) -> String {
    let page_title = format!("{} | {}", episode.title, SITE_NAME);
    let summary = truncate_text(&strip_tags(&episode.description), META_DESCRIPTION_CHARS);

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>{title}</title>
<meta name="description" content="{summary}" />
<meta property="og:title" content="{raw_title}" />
<meta property="og:description" content="{summary}" />
<meta property="og:image" content="{thumbnail}" />
<meta property="og:type" content="article" />
</head>
<body>
{body}
</body>
</html>"#,
        title = html_escape(&page_title),
        summary = html_attr_escape(&summary),
        raw_title = html_attr_escape(&episode.title),
        thumbnail = html_attr_escape(&episode.thumbnail),
        body = render_episode_body(episode),
    )
}

/// Render the episode markup without the surrounding document.
pub fn render_episode_body(episode: &Episode) -> String {
    format!(
        r#"<div class="episode">
  <div class="thumbnailContainer">
    <a href="/">
      <button type="button"><img src="/arrow-left.svg" alt="Voltar" /></button>
    </a>
    <img width="700" height="160" src="{thumbnail}" style="object-fit: cover" alt="{alt}" />
    <button type="button"><img src="/play.svg" alt="Tocar Episódio" /></button>
  </div>
  <header>
    <h1>{title}</h1>
    <span>{members}</span>
    <span>{published_at}</span>
    <span>{duration}</span>
  </header>
  <div class="description">{description}</div>
</div>"#,
        thumbnail = html_attr_escape(&episode.thumbnail),
        alt = html_attr_escape(&episode.title),
        title = html_escape(&episode.title),
        members = html_escape(&episode.members),
        published_at = html_escape(&episode.published_at),
        duration = html_escape(&episode.duration_as_string),
        description = episode.description,
    )
}
