// ==========================================
// Núcleo BI Cartorial - API de importação
// ==========================================
// Fachada sobre o pipeline: monta os componentes uma vez por
// conexão e converte o resultado interno no contrato externo.
// SUCCESS e NO_DATA retornam Ok; as demais saídas viram ApiError
// com código do catálogo.
// ==========================================

use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::auth::{CredentialVerifier, DbCredentialVerifier};
use crate::config::DatasetCatalog;
use crate::domain::identity::Identity;
use crate::domain::types::DatasetKind;
use crate::importer::{DatasetImporter, DatasetImporterImpl, ImportOutcome, ImportRequest};
use crate::repository::UsuarioRepository;

use super::error::{ApiError, ApiResult};

// ==========================================
// ImportApi
// ==========================================
pub struct ImportApi {
    importer: DatasetImporterImpl,
    catalogo: Arc<DatasetCatalog>,
}

impl ImportApi {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        let catalogo = Arc::new(DatasetCatalog::padrao());
        let verifier: Arc<dyn CredentialVerifier> = Arc::new(DbCredentialVerifier::new(
            UsuarioRepository::new(conn.clone()),
        ));
        Self {
            importer: DatasetImporterImpl::new(conn, catalogo.clone(), verifier),
            catalogo,
        }
    }

    /// Resolve o identificador textual (CLI, rota) contra o
    /// catálogo; desconhecido vira IMPORT_007.
    pub fn resolver_tipo(&self, tipo_arquivo: &str) -> ApiResult<DatasetKind> {
        self.catalogo
            .find(tipo_arquivo)
            .map(|config| config.kind)
            .ok_or_else(|| ApiError::tipo_nao_configurado(tipo_arquivo))
    }

    pub async fn importar_arquivo(
        &self,
        identity: &Identity,
        pedido: ImportRequest,
    ) -> ApiResult<ImportApiResponse> {
        let outcome = self.importer.importar_arquivo(identity, pedido).await?;
        Ok(ImportApiResponse::from(outcome))
    }

    /// Vários arquivos em paralelo; um resultado por pedido, na
    /// ordem de entrada.
    pub async fn importar_lote(
        &self,
        identity: &Identity,
        pedidos: Vec<ImportRequest>,
    ) -> Vec<ApiResult<ImportApiResponse>> {
        self.importer
            .importar_lote(identity, pedidos)
            .await
            .into_iter()
            .map(|resultado| {
                resultado
                    .map(ImportApiResponse::from)
                    .map_err(ApiError::from)
            })
            .collect()
    }
}

// ==========================================
// ImportApiResponse - Contrato externo da importação
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ImportApiResponse {
    pub import_id: String,
    pub log_id: i64,
    pub arquivo: String,
    pub tipo_arquivo: String,
    pub modo_importacao: String,
    pub registros_lidos: i64,
    pub registros_processados: i64,
    /// SUCCESS ou NO_DATA; falhas não chegam aqui.
    pub status: String,
    pub success_code: Option<String>,
    pub mensagem: String,
    pub elapsed_ms: u64,
}

impl From<ImportOutcome> for ImportApiResponse {
    fn from(o: ImportOutcome) -> Self {
        Self {
            import_id: o.import_id.to_string(),
            log_id: o.log_id,
            arquivo: o.arquivo,
            tipo_arquivo: o.tipo_arquivo.as_str().to_string(),
            modo_importacao: o.modo_importacao.as_str().to_string(),
            registros_lidos: o.registros_lidos,
            registros_processados: o.registros_processados,
            status: o.status.as_str().to_string(),
            success_code: Some(o.success_code.as_str().to_string()),
            mensagem: o.success_code.mensagem().to_string(),
            elapsed_ms: o.elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codes::SuccessCode;
    use crate::domain::types::{ImportStatus, LoadMode};
    use uuid::Uuid;

    #[test]
    fn test_conversao_para_resposta() {
        let outcome = ImportOutcome {
            import_id: Uuid::new_v4(),
            log_id: 7,
            arquivo: "os_selo_jan.csv".to_string(),
            tipo_arquivo: DatasetKind::OsSelo,
            modo_importacao: LoadMode::Incremental,
            registros_lidos: 10,
            registros_processados: 8,
            status: ImportStatus::Success,
            success_code: SuccessCode::ImportSuccess,
            elapsed_ms: 42,
        };

        let resposta = ImportApiResponse::from(outcome);
        assert_eq!(resposta.tipo_arquivo, "os_selo");
        assert_eq!(resposta.modo_importacao, "INCREMENTAL");
        assert_eq!(resposta.status, "SUCCESS");
        assert_eq!(resposta.success_code, Some("IMPORT_SUCCESS".to_string()));
        assert_eq!(resposta.registros_processados, 8);
    }
}
