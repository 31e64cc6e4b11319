mod carousel;
mod confirm;
mod flash;
mod lazy_image;
mod rating;
mod search;

pub use carousel::Carousel;
pub use confirm::ConfirmGuard;
pub use flash::FlashAutoHide;
pub use lazy_image::LazyImageLoader;
pub use rating::RatingWidget;
pub use search::SearchDebouncer;

use crate::Result;
use crate::dom::{Dom, NodeId};

/// Elements matching `selector` at or below `root`, in document order.
pub(crate) fn scan_scope(dom: &Dom, root: NodeId, selector: &str) -> Result<Vec<NodeId>> {
    let mut found = Vec::new();
    if dom.matches_selector(root, selector)? {
        found.push(root);
    }
    found.extend(dom.query_selector_all_from(root, selector)?);
    Ok(found)
}

/// Integer prefix of `raw` the way `parseInt` reads it: optional sign, then
/// leading decimal digits. Anything without a digit prefix is `None`.
pub(crate) fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
