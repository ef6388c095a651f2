//! Database repositories.

#![allow(missing_docs)]

pub mod account;
pub mod comment;
pub mod feed_post;
pub mod filter;
pub mod like;
pub mod phase;
pub mod product;
pub mod project;

pub use account::AccountRepository;
pub use comment::CommentRepository;
pub use feed_post::FeedPostRepository;
pub use filter::FilterCriteria;
pub use like::LikeRepository;
pub use phase::PhaseRepository;
pub use product::ProductRepository;
pub use project::ProjectRepository;
