pub mod audio_file_repository;
pub mod content_provider;
pub mod generated_content_repository;
pub mod health_check_repository;
pub mod openai_content_provider;
pub mod user_repository;

pub use audio_file_repository::AudioFileRepository;
pub use content_provider::{ContentProvider, ProviderError, ProviderPrompt};
pub use generated_content_repository::GeneratedContentRepository;
pub use health_check_repository::{HealthCheckRecord, HealthCheckRepository, HealthStatus};
pub use openai_content_provider::OpenAiContentProvider;
pub use user_repository::UserRepository;
