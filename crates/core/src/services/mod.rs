//! Business-logic services.

#![allow(missing_docs)]

pub mod account;
pub mod comment;
pub mod feed;
pub mod like;
pub mod media_cleanup;
pub mod phase;
pub mod product;
pub mod project;
pub mod storage;
pub mod upload;

pub use account::{AccountService, RegisterInput, SetupProfileInput, UpdateProfileInput};
pub use comment::{CommentService, CreateCommentInput};
pub use feed::{CreateFeedPostInput, FeedPostWithCounts, FeedService, UpdateFeedPostInput};
pub use like::{LikeService, LikeToggle};
pub use media_cleanup::MediaCleanup;
pub use phase::{CreatePhaseInput, PhaseService, UpdatePhaseInput};
pub use product::{CreateProductInput, ProductService, UpdateProductInput};
pub use project::{CreateProjectInput, ProjectService, UpdateProjectInput};
pub use storage::{LocalStorage, NoOpStorage, ObjectStorage, StorageService};
pub use upload::{UploadImageInput, UploadService, UploadedImage};
