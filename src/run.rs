use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::config::RunContext;
use crate::github;
use crate::marker;

/// Execute the full pipeline: read the diff, collapse stale diff comments
/// left by earlier runs, then post the new diff comment.
///
/// Any error except a failed minimize aborts the run.
pub async fn post_diff_comment(token: &str, ctx: &RunContext, diff_path: &Path) -> Result<()> {
    info!(path = %diff_path.display(), "reading diff");
    let diff = std::fs::read_to_string(diff_path)
        .with_context(|| format!("Failed to read diff file: {}", diff_path.display()))?;
    if diff.trim().is_empty() {
        warn!(path = %diff_path.display(), "diff file is empty, posting an empty diff block");
    }

    let comments = github::fetch_recent_comments(token, ctx).await?;
    debug!(?comments, "fetched comments");

    let run_marker = marker::run_marker(&ctx.run_id);
    let stale: Vec<&github::IssueComment> = comments
        .iter()
        .filter(|c| marker::is_stale_diff_comment(c, &run_marker))
        .collect();
    info!(total = comments.len(), stale = stale.len(), "filtered outdated diff comments");

    // Best-effort cleanup: a failed minimize must not block the remaining
    // comments or the new post.
    for comment in stale {
        if let Err(e) = github::minimize_comment(token, &comment.id).await {
            error!(comment_id = %comment.id, "failed to minimize comment: {e:#}");
        }
    }

    let body = marker::compose_body(&diff, &ctx.run_id);
    let created = github::create_comment(token, ctx, &body).await?;
    info!(id = created.id, url = %created.html_url, "created diff comment");

    Ok(())
}
