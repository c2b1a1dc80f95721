//! Domain entities - the core business objects.

mod account;
mod post;

pub use account::{
    Account, NAME_MAX_LEN, NAME_MIN_LEN, PASSWORD_MIN_LEN, normalize_name, validate_password,
};
pub use post::{NewPost, Post, PostChanges, PostStatus, SUMMARY_MAX_LEN, TITLE_MAX_LEN};
