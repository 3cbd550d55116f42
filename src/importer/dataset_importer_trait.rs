// ==========================================
// Núcleo BI Cartorial - Contrato do pipeline de importação
// ==========================================
// Pedido, resultado e o trait do orquestrador. A implementação
// concreta fica em dataset_importer_impl.
// ==========================================

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::codes::SuccessCode;
use crate::domain::identity::Identity;
use crate::domain::types::{DatasetKind, ImportStatus, LoadMode};

use super::error::ImportError;

// ==========================================
// ImportRequest - Pedido de importação de um arquivo
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub caminho_arquivo: PathBuf,
    pub tipo_arquivo: DatasetKind,
    pub contrato_id: i64,
    /// Obrigatório nos datasets por sistema; ignorado na dimensão.
    pub sistema_origem_id: Option<i64>,
    pub modo_importacao: LoadMode,
    /// Reconfirmação exigida na carga FULL_RELOAD.
    pub senha_confirmacao: Option<String>,
}

// ==========================================
// ImportOutcome - Resultado de uma tentativa
// ==========================================
// SUCCESS e NO_DATA retornam por aqui; falhas viram ImportError.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    /// Correlaciona as linhas de log de uma mesma tentativa.
    pub import_id: Uuid,
    /// Linha correspondente em importacoes_log.
    pub log_id: i64,
    pub arquivo: String,
    pub tipo_arquivo: DatasetKind,
    pub modo_importacao: LoadMode,
    /// Linhas lidas do arquivo, antes de qualquer filtro.
    pub registros_lidos: i64,
    /// Linhas efetivamente aceitas pelo banco.
    pub registros_processados: i64,
    pub status: ImportStatus,
    pub success_code: SuccessCode,
    pub elapsed_ms: u64,
}

// ==========================================
// DatasetImporter - Orquestrador do pipeline
// ==========================================
#[async_trait]
pub trait DatasetImporter: Send + Sync {
    /// Executa o pipeline completo para um arquivo: leitura,
    /// abertura do log, validações, normalização, controle de modo
    /// e persistência. Toda tentativa fecha o log exatamente uma
    /// vez com status terminal.
    async fn importar_arquivo(
        &self,
        identity: &Identity,
        pedido: ImportRequest,
    ) -> Result<ImportOutcome, ImportError>;

    /// Importa vários arquivos em paralelo. Um resultado por
    /// pedido, na ordem de entrada; a falha de um arquivo não
    /// interrompe os demais.
    async fn importar_lote(
        &self,
        identity: &Identity,
        pedidos: Vec<ImportRequest>,
    ) -> Vec<Result<ImportOutcome, ImportError>>;
}
