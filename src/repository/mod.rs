// ==========================================
// Núcleo BI Cartorial - Camada de repositórios
// ==========================================
// Responsabilidade: acesso a dados sobre SQLite, sem regra de
// negócio. Toda consulta é parametrizada.
// ==========================================

pub mod dataset_repo;
pub mod error;
pub mod import_log_repo;
pub mod usuario_repo;

// Reexporta os repositórios centrais
pub use dataset_repo::DatasetRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use import_log_repo::ImportLogRepository;
pub use usuario_repo::{UsuarioCredencial, UsuarioRepository};
