//! Design-file URL parsing.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    sequence::{pair, preceded},
    IResult,
};

/// `figma.com/file/<key>` or `figma.com/design/<key>`.
fn file_key(input: &str) -> IResult<&str, &str> {
    preceded(
        pair(tag("figma.com/"), alt((tag("file/"), tag("design/")))),
        take_while1(|c: char| c.is_ascii_alphanumeric()),
    )(input)
}

/// `node-id=<value>` query parameter.
fn node_id_param(input: &str) -> IResult<&str, &str> {
    preceded(tag("node-id="), take_while1(|c: char| c != '#'))(input)
}

/// Extract the file key from a design-file URL.
///
/// ```
/// assert_eq!(
///     scenec::extract_file_key("https://www.figma.com/file/AbC123/Landing"),
///     Some("AbC123")
/// );
/// ```
pub fn extract_file_key(url: &str) -> Option<&str> {
    url.char_indices()
        .find_map(|(i, _)| file_key(&url[i..]).ok().map(|(_, key)| key))
}

/// Extract the `node-id` query parameter as a node id (`1-2` becomes `1:2`).
pub fn extract_node_id(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .find_map(|param| node_id_param(param).ok())
        .map(|(_, raw)| {
            raw.replace("%3A", ":")
                .replace("%3a", ":")
                .replace('-', ":")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_urls() {
        assert_eq!(
            extract_file_key("https://www.figma.com/file/AbC123/My-Design?node-id=1-2"),
            Some("AbC123")
        );
        assert_eq!(
            extract_file_key("https://figma.com/design/XyZ9/Thing"),
            Some("XyZ9")
        );
        assert_eq!(extract_file_key("figma.com/file/k3y"), Some("k3y"));
    }

    #[test]
    fn test_rejects_other_urls() {
        assert_eq!(extract_file_key("https://example.com/file/abc"), None);
        assert_eq!(extract_file_key("https://www.figma.com/proto/abc"), None);
        assert_eq!(extract_file_key("https://www.figma.com/file/"), None);
        assert_eq!(extract_file_key(""), None);
    }

    #[test]
    fn test_node_id() {
        assert_eq!(
            extract_node_id("https://www.figma.com/design/k/x?t=abc&node-id=12-34").as_deref(),
            Some("12:34")
        );
        assert_eq!(
            extract_node_id("https://www.figma.com/file/k/x?node-id=1%3A2#top").as_deref(),
            Some("1:2")
        );
        assert_eq!(extract_node_id("https://www.figma.com/file/k/x"), None);
        assert_eq!(extract_node_id("https://www.figma.com/file/k/x?mode=dev"), None);
    }
}
