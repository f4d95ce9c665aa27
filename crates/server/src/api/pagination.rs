//! Limit/offset pagination for list endpoints.

use serde::Serialize;

use additions_core::config::PaginationConfig;

pub const LIMIT_PARAM: &str = "limit";
pub const OFFSET_PARAM: &str = "offset";

/// A requested window into a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

/// A page of results with links to its neighbours.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    /// Total number of results before slicing.
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl PageRequest {
    /// Pull `limit` and `offset` out of raw query pairs.
    ///
    /// Returns the page window plus the remaining pairs in their original
    /// order. Blank values fall back to the defaults; a limit above the
    /// configured maximum is capped.
    pub fn extract(
        params: Vec<(String, String)>,
        config: &PaginationConfig,
    ) -> Result<(Self, Vec<(String, String)>), String> {
        let mut page = Self {
            limit: config.default_limit,
            offset: 0,
        };
        let mut rest = Vec::with_capacity(params.len());

        for (name, value) in params {
            match name.as_str() {
                LIMIT_PARAM => {
                    if let Some(limit) = parse_param(LIMIT_PARAM, &value)? {
                        if limit == 0 {
                            return Err("limit must be a positive integer".to_string());
                        }
                        page.limit = limit.min(config.max_limit);
                    }
                }
                OFFSET_PARAM => {
                    if let Some(offset) = parse_param(OFFSET_PARAM, &value)? {
                        page.offset = offset;
                    }
                }
                _ => rest.push((name, value)),
            }
        }

        Ok((page, rest))
    }

    /// Slice `items` and build `next`/`previous` links relative to `path`.
    ///
    /// `params` are the non-pagination query pairs, repeated in every link.
    pub fn paginate<T>(&self, items: Vec<T>, path: &str, params: &[(String, String)]) -> Page<T> {
        let count = items.len();

        let next_offset = self.offset.saturating_add(self.limit);
        let next = (next_offset < count).then(|| self.link(path, params, next_offset));
        let previous = (self.offset > 0)
            .then(|| self.link(path, params, self.offset.saturating_sub(self.limit)));

        let results = items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect();

        Page {
            count,
            next,
            previous,
            results,
        }
    }

    fn link(&self, path: &str, params: &[(String, String)], offset: usize) -> String {
        let mut pairs: Vec<String> = params
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect();
        pairs.push(format!("{}={}", LIMIT_PARAM, self.limit));
        if offset > 0 {
            pairs.push(format!("{}={}", OFFSET_PARAM, offset));
        }
        format!("{}?{}", path, pairs.join("&"))
    }
}

fn parse_param(name: &str, value: &str) -> Result<Option<usize>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<usize>()
        .map(Some)
        .map_err(|_| format!("{} must be a non-negative integer, got '{}'", name, value))
}
