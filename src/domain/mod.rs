// ==========================================
// Núcleo BI Cartorial - Camada de domínio
// ==========================================
// Responsabilidade: entidades, enums e catálogos de código.
// Não contém acesso a dados nem lógica de pipeline.
// ==========================================

pub mod codes;
pub mod identity;
pub mod import_log;
pub mod records;
pub mod types;

// Reexporta os tipos centrais
pub use codes::{ErrorCode, SuccessCode};
pub use identity::{Identity, UserRole};
pub use import_log::{ImportLog, ImportLogFilter, ImportLogPage, NewImportLog};
pub use records::{
    HisSeloDetalheRecord, HisSeloRecord, OsLancRecord, OsSeloRecord, RecordBatch,
    TipoLancamentoRecord,
};
pub use types::{DatasetKind, ImportStatus, LoadMode, Natureza, TenantScope};
