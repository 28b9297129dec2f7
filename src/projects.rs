use crate::repos::{RepoRecord, RepoSource};
use crate::telemetry::{log_event, LogLevel};
use serde_json::json;
use std::{cell::Cell, rc::Rc};

pub const MAX_PROJECTS: usize = 6;
pub const MISSING_DESCRIPTION: &str = "No description available.";
const PREVIEW_IMAGE_BASE: &str = "https://opengraph.githubassets.com/1";
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x200/ffffff/000000?text=Project";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub url: String,
    pub image: String,
}

impl Project {
    fn from_repo(repo: RepoRecord) -> Self {
        let image = format!("{PREVIEW_IMAGE_BASE}/{}/{}", repo.owner.login, repo.name);
        let description = repo
            .description
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| MISSING_DESCRIPTION.to_string());

        Self {
            name: repo.name,
            description,
            url: repo.html_url,
            image,
        }
    }

    fn placeholder(name: &str, description: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Drops the owner's profile repository and keeps the first
/// [`MAX_PROJECTS`] of the rest, in listing order.
pub fn select_projects(owner: &str, repos: Vec<RepoRecord>) -> Vec<Project> {
    repos
        .into_iter()
        .filter(|repo| !repo.name.eq_ignore_ascii_case(owner))
        .take(MAX_PROJECTS)
        .map(Project::from_repo)
        .collect()
}

pub fn fallback_projects() -> Vec<Project> {
    const PROFILE: &str = "https://github.com/dinonuwg";

    vec![
        Project::placeholder("Project 1", "A cool project built with React Native.", PROFILE),
        Project::placeholder("Project 2", "Another awesome project.", PROFILE),
        Project::placeholder("Project 3", "Innovative solution.", PROFILE),
    ]
}

/// Loads the project cards for `owner`. Never fails; any error is logged and
/// replaced by [`fallback_projects`].
pub async fn load_projects<S: RepoSource>(source: &S, owner: &str) -> Vec<Project> {
    match source.list_repos(owner).await {
        Ok(repos) => {
            let listed = repos.len();
            let projects = select_projects(owner, repos);
            log_event(
                LogLevel::Debug,
                "projects_loaded",
                json!({ "owner": owner, "listed": listed, "shown": projects.len() }),
            );
            projects
        }
        Err(error) => {
            log_event(
                LogLevel::Warn,
                "projects_fetch_failed",
                json!({
                    "owner": owner,
                    "error_class": error.as_str(),
                    "status_code": error.status_code(),
                }),
            );
            fallback_projects()
        }
    }
}

/// Set once the owner of an in-flight load goes away.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Like [`load_projects`], but yields nothing when `token` was cancelled
/// while the request was in flight.
pub async fn load_projects_until_cancelled<S: RepoSource>(
    source: &S,
    owner: &str,
    token: &CancelToken,
) -> Option<Vec<Project>> {
    let projects = load_projects(source, owner).await;
    if token.is_cancelled() {
        log_event(LogLevel::Debug, "projects_discarded", json!({ "owner": owner }));
        return None;
    }

    Some(projects)
}
