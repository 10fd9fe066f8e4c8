//! Text helpers for feed content.

pub mod feed {
    use scraper::Html;

    /// Plain text of a feed summary: markup dropped, entities decoded,
    /// whitespace collapsed. Stray `<` in prose is kept as text.
    pub fn extract_text_from_html(html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        // keep words on either side of a tag apart
        fragment
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join(" ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub mod text {
    /// Cut `text` to at most `max_chars` characters, on a char boundary.
    pub fn truncate_chars(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => text[..idx].to_string(),
            None => text.to_string(),
        }
    }

    /// Like [`truncate_chars`], but marks the cut with `...` while keeping the
    /// total at exactly `max_chars`.
    pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        if max_chars < 3 {
            return truncate_chars(text, max_chars);
        }
        let mut cut = truncate_chars(text, max_chars - 3);
        cut.push_str("...");
        cut
    }
}
