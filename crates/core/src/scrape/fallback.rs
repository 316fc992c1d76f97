use crate::scrape::fetch::PageFetcher;
use crate::scrape::page::{PageView, Symbol};

/// Runs `extract` against the consolidated view first and falls back to the
/// standalone view when the first attempt fetches nothing or `is_empty` says
/// the extracted result has no usable field. Returns `None` only when both
/// views come up empty. Every extraction task shares this procedure and brings
/// its own emptiness predicate.
pub async fn resolve_with_fallback<T, E, P>(
    fetcher: &dyn PageFetcher,
    base_url: &str,
    symbol: &Symbol,
    extract: E,
    is_empty: P,
) -> Option<T>
where
    E: Fn(&str) -> T,
    P: Fn(&T) -> bool,
{
    for view in [PageView::Consolidated, PageView::Standalone] {
        let url = view.url(base_url, symbol);

        let Some(body) = fetcher.fetch(&url).await else {
            tracing::debug!(%symbol, ?view, "page unavailable");
            continue;
        };

        let out = extract(&body);
        if !is_empty(&out) {
            return Some(out);
        }
        tracing::debug!(%symbol, ?view, "extraction yielded no usable fields");
    }

    None
}
