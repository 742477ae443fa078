//! `Link` header parsing.

/// Navigation URLs advertised by a list response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub first: Option<String>,
    pub prev: Option<String>,
    pub next: Option<String>,
    pub last: Option<String>,
}

impl PageLinks {
    /// Parse an RFC 5988 `Link` header value. Unknown relations and malformed entries are
    /// skipped.
    pub fn parse(header_value: &str) -> Self {
        let mut links = Self::default();

        for entry in header_value.split(',') {
            let mut parts = entry.split(';').map(str::trim);

            let Some(url) = parts
                .next()
                .and_then(|target| target.strip_prefix('<'))
                .and_then(|target| target.strip_suffix('>'))
            else {
                continue;
            };

            let rel = parts.find_map(|param| {
                param
                    .strip_prefix("rel=")
                    .map(|value| value.trim_matches('"'))
            });

            let slot = match rel {
                Some("first") => &mut links.first,
                Some("prev" | "previous") => &mut links.prev,
                Some("next") => &mut links.next,
                Some("last") => &mut links.last,
                _ => continue,
            };

            *slot = Some(url.to_string());
        }

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_four_relations_are_read() {
        let links = PageLinks::parse(
            "</api/products?pageNumber=1&pageSize=10>; rel=\"first\", \
             </api/products?pageNumber=1&pageSize=10>; rel=\"prev\", \
             </api/products?pageNumber=3&pageSize=10>; rel=\"next\", \
             </api/products?pageNumber=5&pageSize=10>; rel=\"last\"",
        );

        assert_eq!(
            links,
            PageLinks {
                first: Some("/api/products?pageNumber=1&pageSize=10".to_string()),
                prev: Some("/api/products?pageNumber=1&pageSize=10".to_string()),
                next: Some("/api/products?pageNumber=3&pageSize=10".to_string()),
                last: Some("/api/products?pageNumber=5&pageSize=10".to_string()),
            }
        );
    }

    #[test]
    fn last_page_has_no_next() {
        let links = PageLinks::parse(
            "</api/categories?pageNumber=1&pageSize=2>; rel=\"first\", \
             </api/categories?pageNumber=1&pageSize=2>; rel=\"prev\", \
             </api/categories?pageNumber=2&pageSize=2>; rel=\"last\"",
        );

        assert_eq!(links.next, None);
        assert_eq!(
            links.last.as_deref(),
            Some("/api/categories?pageNumber=2&pageSize=2")
        );
    }

    #[test]
    fn garbage_is_ignored() {
        assert_eq!(
            PageLinks::parse("nonsense, <x>; rel=\"self\", <y>"),
            PageLinks::default()
        );
    }
}
