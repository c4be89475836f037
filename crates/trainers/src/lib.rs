pub use errors::RepositoryError;
pub use repository::TrainerRepository;
pub use repository_trait::TrainerRepositoryTrait;
pub use types::{Trainer, TrainerKey};

pub mod errors;
pub mod repository;
pub mod repository_trait;
pub mod types;
