use log::debug;

use crate::{Error, Result, api::GitHubApi, model::Issue, target::RepoTarget};

pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_MAX_PAGES: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub per_page: u32,
    /// Upper bound on page requests, for APIs that never stop paginating.
    pub max_pages: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        PageOptions { per_page: DEFAULT_PER_PAGE, max_pages: DEFAULT_MAX_PAGES }
    }
}

/// Every closed issue of `target`, in the order the pages arrive.
///
/// A failed page request discards whatever was collected so far.
pub fn closed_issues(
    api: &impl GitHubApi,
    target: &RepoTarget,
    options: PageOptions,
) -> Result<Vec<Issue>> {
    let mut all = Vec::new();
    let mut page = 1;
    let mut requested = 0;
    loop {
        if requested == options.max_pages {
            return Err(Error::PaginationLimit { limit: options.max_pages });
        }
        requested += 1;

        let resp = api.list_closed_issues(&target.owner, &target.name, page, options.per_page)?;
        debug!(
            "page {page} of closed issues for {target}: {} issues, next page: {:?}",
            resp.items.len(),
            resp.next_page
        );
        all.extend(resp.items);
        match resp.next_page {
            Some(next) => page = next,
            None => return Ok(all),
        }
    }
}
