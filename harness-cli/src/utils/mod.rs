pub mod homedir;
pub mod output;
