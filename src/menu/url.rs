//! URL helpers for the links the menubar opens.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` escapes: everything except alphanumerics
/// and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode each segment of a `/` separated path, keeping the slashes.
pub fn encode_path_components(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, COMPONENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join URL pieces with single slashes, skipping empty pieces.
pub fn url_path_join(pieces: &[&str]) -> String {
    let mut url = String::new();
    for piece in pieces.iter().filter(|p| !p.is_empty()) {
        if url.is_empty() {
            url.push_str(piece);
            continue;
        }
        match (url.ends_with('/'), piece.starts_with('/')) {
            (true, true) => url.push_str(&piece[1..]),
            (false, false) => {
                url.push('/');
                url.push_str(piece);
            }
            _ => url.push_str(piece),
        }
    }
    url
}

/// Split a path into (directory, file name).
pub fn url_path_split(path: &str) -> (&str, &str) {
    path.rsplit_once('/').unwrap_or(("", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_slashes() {
        assert_eq!(encode_path_components("a b/c#d.ipynb"), "a%20b/c%23d.ipynb");
        assert_eq!(encode_path_components("it's (1)!"), "it's%20(1)!");
    }

    #[test]
    fn test_join() {
        assert_eq!(url_path_join(&["/", "tree", "dir"]), "/tree/dir");
        assert_eq!(url_path_join(&["/base/", "/files", "", "x.ipynb"]), "/base/files/x.ipynb");
        assert_eq!(url_path_join(&["http://host:8888/", "tree", ""]), "http://host:8888/tree");
    }

    #[test]
    fn test_split() {
        assert_eq!(url_path_split("a/b/c.ipynb"), ("a/b", "c.ipynb"));
        assert_eq!(url_path_split("c.ipynb"), ("", "c.ipynb"));
    }
}
