//! Display titles and outbound links derived from corpus file paths.

use std::borrow::Cow;

const TITLE_SUFFIX: &str = " - Wikipedia";

/// Percent-decode a path; input that does not decode to UTF-8 is kept as is.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    urlencoding::decode(path).unwrap_or(Cow::Borrowed(path))
}

/// Title of a corpus file: its file name up to the first `" - Wikipedia"`,
/// or the whole file name when the marker is missing.
pub fn title(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.find(TITLE_SUFFIX) {
        Some(end) => file_name[..end].to_owned(),
        None => file_name.to_owned(),
    }
}

/// External article URL for a title, e.g. `Rust (film)` becomes
/// `<base>Rust_%28film%29`.
pub fn article_url(base: &str, title: &str) -> String {
    let slug = title.replace(' ', "_");
    format!("{base}{}", urlencoding::encode(&slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_directory_and_suffix() {
        assert_eq!(title("/srv/wiki/Cat - Wikipedia.html"), "Cat");
        assert_eq!(title("Rust (programming language) - Wikipedia.html"), "Rust (programming language)");
    }

    #[test]
    fn keeps_file_name_without_suffix() {
        assert_eq!(title("/srv/wiki/notes.txt"), "notes.txt");
        assert_eq!(title("/srv/wiki/"), "");
    }

    #[test]
    fn decodes_escaped_paths() {
        assert_eq!(decode_path("/wiki/Caf%C3%A9%20-%20Wikipedia.html"), "/wiki/Café - Wikipedia.html");
        assert_eq!(title(&decode_path("/wiki/Rust%20-%20Wikipedia.html")), "Rust");
        assert_eq!(decode_path("/wiki/plain"), "/wiki/plain");
        // %FF alone is not UTF-8
        assert_eq!(decode_path("/wiki/%FF"), "/wiki/%FF");
    }

    #[test]
    fn article_url_uses_underscores_and_escapes() {
        assert_eq!(
            article_url("https://en.wikipedia.org/wiki/", "Rust (film)"),
            "https://en.wikipedia.org/wiki/Rust_%28film%29"
        );
        assert_eq!(article_url("https://x/wiki/", "Café"), "https://x/wiki/Caf%C3%A9");
    }
}
