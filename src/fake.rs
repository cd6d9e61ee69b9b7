//! Recording test double for [`GitHubApi`].

use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};
use reqwest::StatusCode;

use crate::{
    Error, Result,
    api::GitHubApi,
    model::{CombinedStatus, Issue, Page, Rate, RateLimits, Repository},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Repository,
    CombinedStatus(String),
    ClosedIssues { page: u32, per_page: u32 },
    RateLimit,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    /// `None` answers 404.
    pub repository: Option<Repository>,
    pub pages: Vec<Vec<Issue>>,
    pub failing_page: Option<u32>,
    /// Every page points at another one.
    pub endless: bool,
    pub status_fails: bool,
    /// `None` answers 403.
    pub rate_limit: Option<RateLimits>,
    calls: RefCell<Vec<Call>>,
}

impl FakeApi {
    pub fn with_repository(repository: Repository) -> Self {
        FakeApi {
            repository: Some(repository),
            rate_limit: Some(rate_limits()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn page_requests(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::ClosedIssues { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn api_error(status: StatusCode) -> Error {
    Error::Api { status, message: status.canonical_reason().unwrap_or_default().to_string() }
}

impl GitHubApi for FakeApi {
    fn get_repository(&self, _owner: &str, _repo: &str) -> Result<Repository> {
        self.record(Call::Repository);
        self.repository.clone().ok_or_else(|| api_error(StatusCode::NOT_FOUND))
    }

    fn get_combined_status(
        &self,
        _owner: &str,
        _repo: &str,
        reference: &str,
    ) -> Result<CombinedStatus> {
        self.record(Call::CombinedStatus(reference.to_string()));
        if self.status_fails {
            return Err(api_error(StatusCode::UNPROCESSABLE_ENTITY));
        }
        Ok(CombinedStatus { state: "success".into(), total_count: 1 })
    }

    fn list_closed_issues(
        &self,
        _owner: &str,
        _repo: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Issue>> {
        self.record(Call::ClosedIssues { page, per_page });
        if self.failing_page == Some(page) {
            return Err(api_error(StatusCode::INTERNAL_SERVER_ERROR));
        }
        if self.endless {
            return Ok(Page { items: Vec::new(), next_page: Some(page + 1) });
        }
        let items = (page as usize)
            .checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .cloned()
            .unwrap_or_default();
        let next_page = ((page as usize) < self.pages.len()).then_some(page + 1);
        Ok(Page { items, next_page })
    }

    fn get_rate_limit(&self) -> Result<RateLimits> {
        self.record(Call::RateLimit);
        self.rate_limit.ok_or_else(|| api_error(StatusCode::FORBIDDEN))
    }
}

pub(crate) fn repository(has_issues: bool) -> Repository {
    Repository {
        full_name: "projectatomic/atomicapp".into(),
        stargazers_count: 37,
        open_issues_count: 74,
        has_issues,
        default_branch: Some("master".into()),
    }
}

pub(crate) fn at(day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 11, day, hour, min, sec).unwrap()
}

pub(crate) fn closed_issue(number: u64, created: DateTime<Utc>, closed: DateTime<Utc>) -> Issue {
    Issue {
        number,
        state: "closed".into(),
        title: format!("issue {number}"),
        created_at: created,
        closed_at: Some(closed),
    }
}

pub(crate) fn rate_limits() -> RateLimits {
    RateLimits {
        core: Rate { limit: 5000, remaining: 4987, reset: 1_448_035_200 },
        search: Rate { limit: 30, remaining: 30, reset: 1_448_031_660 },
    }
}
