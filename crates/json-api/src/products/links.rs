//! Absolute links to neighbouring pages.

use salvo::{http::header::HOST, prelude::Request};
use url::Url;

use shopfront_app::pagination::Page;

const PAGE_PARAM: &str = "page";

/// Absolute URL of the current request, falling back to the `Host` header
/// when the request line carries no authority.
pub(crate) fn request_url(req: &Request) -> Result<Url, url::ParseError> {
    let uri = req.uri();

    let scheme = uri.scheme_str().unwrap_or_else(|| req.scheme().as_str());
    let host = uri
        .authority()
        .map(|authority| authority.as_str().to_string())
        .or_else(|| {
            req.headers()
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| "localhost".to_string());

    let path_and_query = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());

    Url::parse(&format!("{scheme}://{host}{path_and_query}"))
}

/// `url` with its `page` parameter replaced, or removed when `page` is `None`.
/// Remaining parameters are kept and sorted by name.
pub(crate) fn with_page(url: &Url, page: Option<u64>) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if let Some(page) = page {
        pairs.push((PAGE_PARAM.to_string(), page.to_string()));
    }

    pairs.sort_by(|(left, _), (right, _)| left.cmp(right));

    let mut url = url.clone();

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.into()
}

/// `(next, previous)` links for `page`. The link back to the first page omits `page`.
pub(crate) fn neighbours<T>(url: &Url, page: &Page<T>) -> (Option<String>, Option<String>) {
    let next = page
        .next_number()
        .map(|number| with_page(url, Some(number)));

    let previous = page.previous_number().map(|number| {
        if number == 1 {
            with_page(url, None)
        } else {
            with_page(url, Some(number))
        }
    });

    (next, previous)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn page(number: u64) -> Page<()> {
        Page::new(vec![], 25, number, 10)
    }

    #[test]
    fn first_page_links_forward_only() -> TestResult {
        let url = Url::parse("http://testserver/products?name=prod")?;

        assert_eq!(
            neighbours(&url, &page(1)),
            (
                Some("http://testserver/products?name=prod&page=2".to_string()),
                None
            )
        );

        Ok(())
    }

    #[test]
    fn middle_page_replaces_the_page_param_and_keeps_filters() -> TestResult {
        let url = Url::parse("http://testserver/products?page=2&min_price=100")?;

        assert_eq!(
            neighbours(&url, &page(2)),
            (
                Some("http://testserver/products?min_price=100&page=3".to_string()),
                Some("http://testserver/products?min_price=100".to_string())
            )
        );

        Ok(())
    }

    #[test]
    fn last_page_links_backward_only() -> TestResult {
        let url = Url::parse("http://testserver/products?page=last")?;

        assert_eq!(
            neighbours(&url, &page(3)),
            (None, Some("http://testserver/products?page=2".to_string()))
        );

        Ok(())
    }

    #[test]
    fn removing_the_only_param_drops_the_query() -> TestResult {
        let url = Url::parse("http://testserver/products?page=2")?;

        assert_eq!(with_page(&url, None), "http://testserver/products");

        Ok(())
    }
}
