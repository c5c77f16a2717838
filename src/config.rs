use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid repository '{0}': expected owner/name")]
    InvalidRepo(String),
    #[error("no pull request number: pass --pr or run on a pull_request event (GITHUB_REF was {0:?})")]
    MissingPrNumber(Option<String>),
}

/// Immutable per-run context assembled from the CLI inputs and the GitHub
/// Actions environment.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub owner: String,
    pub repo: String,
    pub pr_number: u32,
    pub run_id: String,
}

impl RunContext {
    /// Validate and split the `owner/name` repository string and resolve the
    /// pull request number, falling back to the `refs/pull/<n>/merge` ref a
    /// `pull_request` workflow runs on when `--pr` was not given.
    pub fn resolve(
        repo: &str,
        pr: Option<u32>,
        github_ref: Option<String>,
        run_id: String,
    ) -> Result<Self, InputError> {
        let (owner, name) = split_repo(repo)?;
        let pr_number = match pr {
            Some(number) => number,
            None => pr_number_from_ref(github_ref.as_deref())
                .ok_or(InputError::MissingPrNumber(github_ref))?,
        };

        Ok(Self {
            owner,
            repo: name,
            pr_number,
            run_id,
        })
    }
}

fn split_repo(repo: &str) -> Result<(String, String), InputError> {
    match repo.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(InputError::InvalidRepo(repo.to_string())),
    }
}

/// Extract the pull request number from a `refs/pull/<n>/merge` ref.
fn pr_number_from_ref(github_ref: Option<&str>) -> Option<u32> {
    let rest = github_ref?.strip_prefix("refs/pull/")?;
    let (number, _) = rest.split_once('/')?;
    number.parse().ok()
}
