use crate::github::IssueComment;

/// First line of every comment this tool creates. Comments without this
/// exact prefix are never touched.
pub const COMMENT_HEADER: &str = "<!-- ActionId: pull-request-diff-comment-action -->\n";

/// Login GitHub assigns to comments created with a workflow token.
pub const BOT_LOGIN: &str = "github-actions";

const DIFF_FENCE_OPEN: &str = "```diff\n";
const DIFF_FENCE_CLOSE: &str = "\n```";

/// Marker line embedding the CI run identifier. Distinguishes the current
/// run's comment from comments left by earlier runs.
pub fn run_marker(run_id: &str) -> String {
    format!("<!-- RunId: {} -->\n", run_id)
}

/// Assemble the comment body: header marker, run marker, then the diff in a
/// fenced code block. The diff is trimmed of surrounding whitespace.
pub fn compose_body(diff: &str, run_id: &str) -> String {
    format!(
        "{}{}{}{}{}",
        COMMENT_HEADER,
        run_marker(run_id),
        DIFF_FENCE_OPEN,
        diff.trim(),
        DIFF_FENCE_CLOSE
    )
}

/// Whether `comment` is an expanded diff comment left over from an earlier
/// run, i.e. it should be collapsed before the new comment is posted.
///
/// Matches only comments that are not already minimized, were created under
/// the automation login, start with the header marker, and do not carry the
/// current run's marker (a rerun must not collapse its own comment).
pub fn is_stale_diff_comment(comment: &IssueComment, run_marker: &str) -> bool {
    if comment.is_minimized {
        return false;
    }

    // The comments query only resolves `author` for Bot accounts; anything
    // else (human author, deleted account) never matches.
    let login = comment.author.as_ref().and_then(|a| a.login.as_deref());
    if login != Some(BOT_LOGIN) {
        return false;
    }

    if !comment.body.starts_with(COMMENT_HEADER) {
        return false;
    }

    // The header is ASCII, so slicing past it stays on a char boundary.
    if comment.body[COMMENT_HEADER.len()..].contains(run_marker) {
        return false;
    }

    true
}
