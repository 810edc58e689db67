//! Offset window primitives shared by listing endpoints.
//!
//! A listing request names a zero-based `page` index and a `limit`. The window
//! it selects starts at row `page * limit` and spans at most `limit` rows.
//! Validation happens once, when a [`PageRequest`] is built, so the resolved
//! [`PageWindow`] can be handed to a store without further checks.
//!
//! ```
//! use pagination::{PageParams, PageRequest};
//!
//! let params = PageParams { page: Some(1), limit: Some(3) };
//! let request = PageRequest::try_from(params).expect("valid window");
//! assert_eq!(request.window().offset(), 3);
//! assert_eq!(request.window().limit(), 3);
//! ```

use serde::Deserialize;

/// Page index used when the caller does not supply one.
pub const DEFAULT_PAGE: u64 = 0;

/// Row limit used when the caller does not supply one.
pub const DEFAULT_LIMIT: u64 = 50;

/// Largest row limit a single request may ask for.
pub const MAX_LIMIT: u64 = 1000;

// Must agree with DEFAULT_PAGE * DEFAULT_LIMIT and DEFAULT_LIMIT.
const DEFAULT_WINDOW: PageWindow = PageWindow {
    offset: 0,
    limit: 50,
};

/// Reasons a page request is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The requested limit exceeds [`MAX_LIMIT`].
    #[error("limit {limit} exceeds the maximum of {max}")]
    LimitTooLarge {
        /// Limit supplied by the caller.
        limit: u64,
        /// Upper bound enforced by this crate.
        max: u64,
    },
    /// `page * limit` does not fit in a signed 64-bit offset.
    #[error("page {page} with limit {limit} starts beyond the addressable range")]
    OffsetOverflow {
        /// Page index supplied by the caller.
        page: u64,
        /// Limit supplied by the caller.
        limit: u64,
    },
}

/// Row window in store-native units.
///
/// Both values are non-negative and fit the `OFFSET`/`LIMIT` parameters of
/// a SQL query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: i64,
    limit: i64,
}

impl PageWindow {
    /// Number of rows skipped before the window begins.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.offset
    }

    /// Maximum number of rows in the window.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

/// Validated listing request.
///
/// ## Invariants
/// - `limit <= MAX_LIMIT`.
/// - `page * limit <= i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
    window: PageWindow,
}

impl PageRequest {
    /// Build a request for the zero-based `page` of `limit` rows.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::LimitTooLarge`] when `limit` exceeds
    /// [`MAX_LIMIT`], and [`PageRequestError::OffsetOverflow`] when the window
    /// start cannot be represented as an `i64`.
    pub fn new(page: u64, limit: u64) -> Result<Self, PageRequestError> {
        if limit > MAX_LIMIT {
            return Err(PageRequestError::LimitTooLarge {
                limit,
                max: MAX_LIMIT,
            });
        }

        let overflow = PageRequestError::OffsetOverflow { page, limit };
        let offset = page
            .checked_mul(limit)
            .and_then(|start| i64::try_from(start).ok())
            .ok_or(overflow)?;
        let window_limit = i64::try_from(limit).map_err(|_| overflow)?;

        Ok(Self {
            page,
            limit,
            window: PageWindow {
                offset,
                limit: window_limit,
            },
        })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of rows requested.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Resolved row window.
    #[must_use]
    pub const fn window(&self) -> PageWindow {
        self.window
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Raw `page`/`limit` query parameters before validation.
///
/// Missing values fall back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].
/// Deserialisation already rejects negative numbers and repeated keys;
/// unrelated keys such as cache busters are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    /// Zero-based page index.
    pub page: Option<u64>,
    /// Maximum number of rows to return.
    pub limit: Option<u64>,
}

impl TryFrom<PageParams> for PageRequest {
    type Error = PageRequestError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Self::new(
            params.page.unwrap_or(DEFAULT_PAGE),
            params.limit.unwrap_or(DEFAULT_LIMIT),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Window arithmetic and parameter validation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 50, 0)]
    #[case(1, 3, 3)]
    #[case(3, 3, 9)]
    #[case(7, 0, 0)]
    fn window_starts_at_page_times_limit(
        #[case] page: u64,
        #[case] limit: u64,
        #[case] offset: i64,
    ) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.window().offset(), offset);
        assert_eq!(request.window().limit(), i64::try_from(limit).expect("small"));
    }

    #[test]
    fn default_request_matches_default_params() {
        let from_params = PageRequest::try_from(PageParams::default()).expect("defaults valid");
        assert_eq!(from_params, PageRequest::default());
        assert_eq!(
            PageRequest::new(DEFAULT_PAGE, DEFAULT_LIMIT).expect("defaults valid"),
            PageRequest::default()
        );
        assert_eq!(from_params.page(), DEFAULT_PAGE);
        assert_eq!(from_params.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn rejects_limit_above_maximum() {
        let err = PageRequest::new(0, MAX_LIMIT + 1).expect_err("limit too large");
        assert_eq!(
            err,
            PageRequestError::LimitTooLarge {
                limit: MAX_LIMIT + 1,
                max: MAX_LIMIT
            }
        );
    }

    #[test]
    fn rejects_offsets_beyond_i64() {
        let err = PageRequest::new(u64::MAX / 2, MAX_LIMIT).expect_err("offset overflow");
        assert!(matches!(err, PageRequestError::OffsetOverflow { .. }));
    }

    #[test]
    fn params_reject_negative_and_repeated_keys() {
        assert!(serde_json::from_str::<PageParams>(r#"{"page":-1}"#).is_err());
        assert!(serde_json::from_str::<PageParams>(r#"{"page":1,"page":2}"#).is_err());
        let params: PageParams =
            serde_json::from_str(r#"{"limit":5}"#).expect("partial params decode");
        assert_eq!(params.page, None);
        assert_eq!(params.limit, Some(5));
    }

    #[test]
    fn params_ignore_unrelated_keys() {
        let params: PageParams = serde_json::from_str(r#"{"_":"1700000000","page":2}"#)
            .expect("cache busters are ignored");
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, None);
    }
}
