// ==========================================
// Núcleo BI Cartorial - API da trilha de auditoria
// ==========================================
// Listagem e consulta dos logs de importação. O filtro que chega
// do chamador nunca decide o escopo: ele é sobrescrito pelo
// escopo da identidade antes de tocar o repositório.
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::domain::identity::Identity;
use crate::domain::import_log::{ImportLog, ImportLogFilter, ImportLogPage};
use crate::repository::ImportLogRepository;

use super::error::ApiResult;

// ==========================================
// LogsApi
// ==========================================
pub struct LogsApi {
    logs: ImportLogRepository,
}

impl LogsApi {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            logs: ImportLogRepository::new(conn),
        }
    }

    pub fn listar(
        &self,
        identity: &Identity,
        mut filtro: ImportLogFilter,
    ) -> ApiResult<ImportLogPage> {
        filtro.scope = identity.scope();
        Ok(self.logs.list(&filtro)?)
    }

    /// `None` quando o log não existe ou pertence a outro contrato.
    pub fn obter(&self, identity: &Identity, log_id: i64) -> ApiResult<Option<ImportLog>> {
        Ok(self.logs.find_by_id(log_id, identity.scope())?)
    }
}
