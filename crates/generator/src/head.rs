use crate::metadata::LocalizedMetadata;
use serde_json::Value;

/// HTML-escape a string for text and attribute positions
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

fn meta_name(name: &str, content: &str) -> String {
    format!(
        "<meta name=\"{}\" content=\"{}\">\n",
        html_escape(name),
        html_escape(content)
    )
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        "<meta property=\"{}\" content=\"{}\">\n",
        property,
        html_escape(content)
    )
}

/// Serialize a metadata record into `<head>` tags
pub fn render_head(record: &LocalizedMetadata) -> String {
    let mut out = String::with_capacity(2048);

    out.push_str(&format!(
        "<title>{}</title>\n",
        html_escape(&record.document_title())
    ));
    out.push_str(&meta_name("description", &record.description));
    out.push_str(&format!(
        "<link rel=\"canonical\" href=\"{}\">\n",
        html_escape(&record.canonical)
    ));

    for (locale, href) in &record.alternates.languages {
        out.push_str(&format!(
            "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
            locale.code(),
            html_escape(href)
        ));
    }

    let og = &record.open_graph;
    out.push_str(&meta_property("og:type", og.kind.as_str()));
    out.push_str(&meta_property("og:locale", &og.locale));
    out.push_str(&meta_property("og:url", &og.url));
    out.push_str(&meta_property("og:site_name", &og.site_name));
    out.push_str(&meta_property("og:title", &og.title));
    out.push_str(&meta_property("og:description", &og.description));
    for image in &og.images {
        out.push_str(&meta_property("og:image", &image.url));
        out.push_str(&meta_property("og:image:width", &image.width.to_string()));
        out.push_str(&meta_property("og:image:height", &image.height.to_string()));
        out.push_str(&meta_property("og:image:alt", &image.alt));
    }

    if let Some(article) = &og.article {
        if let Some(published) = &article.published_time {
            out.push_str(&meta_property("article:published_time", published));
        }
        if let Some(modified) = &article.modified_time {
            out.push_str(&meta_property("article:modified_time", modified));
        }
        if let Some(author) = &article.author {
            out.push_str(&meta_property("article:author", author));
        }
        for tag in &article.tags {
            out.push_str(&meta_property("article:tag", tag));
        }
    }

    out.push_str(&meta_name("twitter:card", &record.twitter.card));
    out.push_str(&meta_name("twitter:site", &record.twitter.site));
    out.push_str(&meta_name("twitter:creator", &record.twitter.creator));

    for (name, content) in &record.other {
        out.push_str(&meta_name(name, content));
    }

    out
}

/// `<script type="application/ld+json">` block for structured data
pub fn render_json_ld(data: &Value) -> String {
    // `</` must not appear inside a script element
    let json = data.to_string().replace("</", "<\\/");
    format!(r#"<script type="application/ld+json">{}</script>"#, json)
}
