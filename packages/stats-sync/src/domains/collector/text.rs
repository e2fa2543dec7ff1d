use super::models::PostMap;

/// Preview used for posts with no text (media-only posts).
pub const NO_TEXT_SENTINEL: &str = "*пост без текста*";

/// Number of words kept in a preview.
pub const PREVIEW_WORDS: usize = 10;

/// Replace every post's text with its preview.
pub fn trim_text(posts: &mut PostMap) {
    for entry in posts.values_mut() {
        entry.text = preview(&entry.text);
    }
}

/// First ten words of `text` with tag markup removed, followed by `...`.
///
/// Tags act as word breaks, so `a<br>b` yields two words.
pub fn preview(text: &str) -> String {
    let plain = strip_markup(text);
    let words: Vec<&str> = plain.split_whitespace().take(PREVIEW_WORDS).collect();

    if words.is_empty() {
        NO_TEXT_SENTINEL.to_string()
    } else {
        format!("{}...", words.join(" "))
    }
}

/// Replace each `<...>` tag with a space so words joined by a tag stay apart.
/// An unmatched `<` and everything after it is kept verbatim.
fn strip_markup(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        plain.push_str(&rest[..open]);
        plain.push(' ');
        rest = &rest[open + close + 1..];
    }
    plain.push_str(rest);

    plain
}
