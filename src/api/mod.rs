// ==========================================
// Núcleo BI Cartorial - Camada de API
// ==========================================
// Fachadas expostas ao binário e a quem embutir o crate:
// importação, consultas de BI e trilha de auditoria. Toda saída
// carrega código do catálogo (IMPORT_*, BI_*, DB_*, SYS_*).
// ==========================================

pub mod bi_api;
pub mod error;
pub mod import_api;
pub mod logs_api;

pub use bi_api::{BiApi, BiQueryResponse};
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse};
pub use logs_api::LogsApi;
