// ==========================================
// Núcleo BI Cartorial - Log de importação (auditoria)
// ==========================================
// Trilha append-only: uma linha por tentativa de importação,
// aberta como PROCESSING e fechada exatamente uma vez com um
// status terminal. Contrato estável para consumidores de auditoria.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::types::{DatasetKind, ImportStatus, LoadMode, TenantScope};

// ==========================================
// ImportLog - Entrada da tabela importacoes_log
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLog {
    pub id: i64,
    pub contrato_id: i64,
    /// Nulo para datasets globais (dimensão).
    pub sistema_origem_id: Option<i64>,
    pub usuario_id: i64,
    pub usuario_email: String,
    pub tipo_arquivo: DatasetKind,
    pub modo_importacao: LoadMode,
    pub nome_arquivo: String,
    pub status: ImportStatus,
    pub success_code: Option<String>,
    pub error_code: Option<String>,
    pub mensagem: Option<String>,
    /// Linhas lidas do arquivo (antes de qualquer filtro).
    pub total_registros: i64,
    /// Linhas efetivamente aceitas pelo banco.
    pub registros_processados: i64,
    pub started_at: NaiveDateTime,
    /// Nulo enquanto PROCESSING.
    pub finished_at: Option<NaiveDateTime>,
}

// ==========================================
// NewImportLog - Payload do open()
// ==========================================
#[derive(Debug, Clone)]
pub struct NewImportLog {
    pub contrato_id: i64,
    pub sistema_origem_id: Option<i64>,
    pub usuario_id: i64,
    pub usuario_email: String,
    pub tipo_arquivo: DatasetKind,
    pub modo_importacao: LoadMode,
    pub nome_arquivo: String,
    pub total_registros: i64,
}

// ==========================================
// ImportLogFilter - Filtros da listagem de auditoria
// ==========================================
// Escopo de contrato obrigatório; demais filtros opcionais.
#[derive(Debug, Clone)]
pub struct ImportLogFilter {
    pub scope: TenantScope,
    pub tipo_arquivo: Option<DatasetKind>,
    pub status: Option<ImportStatus>,
    pub error_code: Option<String>,
    /// Busca parcial, sem distinção de maiúsculas.
    pub usuario_email: Option<String>,
    pub started_de: Option<NaiveDateTime>,
    pub started_ate: Option<NaiveDateTime>,
    pub limit: i64,
    pub offset: i64,
}

impl ImportLogFilter {
    pub fn new(scope: TenantScope) -> Self {
        Self {
            scope,
            tipo_arquivo: None,
            status: None,
            error_code: None,
            usuario_email: None,
            started_de: None,
            started_ate: None,
            limit: 50,
            offset: 0,
        }
    }
}

// ==========================================
// ImportLogPage - Resultado paginado da listagem
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportLogPage {
    pub items: Vec<ImportLog>,
    /// Total sob o filtro, ignorando a paginação.
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
