mod client;
pub mod comment;

pub use comment::{
    create_comment, fetch_recent_comments, minimize_comment, CommentAuthor, CreatedComment,
    IssueComment,
};
