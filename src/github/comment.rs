use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::{gh_api_post, gh_graphql, FieldValue};
use crate::config::RunContext;

/// A discussion comment on the pull request, as returned by the comments
/// query. `author` only resolves for Bot accounts (inline fragment), so it
/// is an empty object for human authors and null for deleted accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueComment {
    /// GraphQL node id, usable as a mutation subject.
    pub id: String,
    pub body: String,
    pub is_minimized: bool,
    #[serde(default)]
    pub author: Option<CommentAuthor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentAuthor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

/// The REST response of the create-comment call.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedComment {
    pub id: u64,
    pub html_url: String,
}

const COMMENTS_QUERY: &str = "\
query comments($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    pullRequest(number: $number) {
      id
      comments(last: 10) {
        nodes {
          id
          body
          isMinimized
          author {
            ... on Bot {
              id
              login
            }
          }
        }
      }
    }
  }
}";

const MINIMIZE_MUTATION: &str = "\
mutation minimize($subjectId: ID!) {
  minimizeComment(input: {subjectId: $subjectId, classifier: OUTDATED}) {
    clientMutationId
  }
}";

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct CommentsData {
    repository: RepositoryNode,
}

#[derive(Debug, Deserialize)]
struct RepositoryNode {
    #[serde(rename = "pullRequest")]
    pull_request: PullRequestNode,
}

#[derive(Debug, Deserialize)]
struct PullRequestNode {
    id: String,
    comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
struct CommentConnection {
    nodes: Vec<IssueComment>,
}

/// Fetch the last 10 comments on the pull request.
pub async fn fetch_recent_comments(token: &str, ctx: &RunContext) -> Result<Vec<IssueComment>> {
    let number = ctx.pr_number.to_string();
    info!(
        owner = %ctx.owner,
        repo = %ctx.repo,
        pr = ctx.pr_number,
        "querying pull request comments"
    );

    let json = gh_graphql(
        token,
        COMMENTS_QUERY,
        &[
            ("owner", FieldValue::String(&ctx.owner)),
            ("repo", FieldValue::String(&ctx.repo)),
            ("number", FieldValue::Raw(&number)),
        ],
    )
    .await?;

    let envelope: GraphQlEnvelope<CommentsData> =
        serde_json::from_value(json).context("Failed to parse comments query response")?;
    let pr = envelope.data.repository.pull_request;
    debug!(pr_id = %pr.id, "resolved pull request node");

    Ok(pr.comments.nodes)
}

/// Collapse a comment as outdated. Remote state change only; the fetched
/// snapshot is not touched.
pub async fn minimize_comment(token: &str, comment_id: &str) -> Result<()> {
    info!(comment_id, "minimizing outdated comment");
    gh_graphql(
        token,
        MINIMIZE_MUTATION,
        &[("subjectId", FieldValue::String(comment_id))],
    )
    .await?;
    Ok(())
}

/// Create a new comment on the pull request's discussion thread.
pub async fn create_comment(token: &str, ctx: &RunContext, body: &str) -> Result<CreatedComment> {
    let endpoint = format!(
        "repos/{}/{}/issues/{}/comments",
        ctx.owner, ctx.repo, ctx.pr_number
    );
    info!(endpoint = %endpoint, body_len = body.len(), "creating comment");

    let json = gh_api_post(token, &endpoint, &[("body", FieldValue::String(body))]).await?;
    serde_json::from_value(json).context("Failed to parse created comment response")
}
