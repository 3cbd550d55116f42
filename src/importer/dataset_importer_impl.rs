// ==========================================
// Núcleo BI Cartorial - Pipeline de importação
// ==========================================
// Ordem fixa das etapas:
//   leitura -> abertura do log -> arquivo vazio -> layout ->
//   normalização -> modo de carga -> persistência -> fechamento
// O log abre como PROCESSING com o total lido e fecha exatamente
// uma vez com status terminal, em qualquer caminho de saída.
// Arquivo vazio é benigno: fecha como NO_DATA e o chamador recebe
// um resultado de sucesso sem registros.
// ==========================================

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::auth::CredentialVerifier;
use crate::config::{DatasetCatalog, DatasetConfig};
use crate::domain::codes::{ErrorCode, SuccessCode};
use crate::domain::identity::Identity;
use crate::domain::import_log::NewImportLog;
use crate::domain::types::ImportStatus;
use crate::repository::{DatasetRepository, ImportLogRepository};

use super::dataset_importer_trait::{DatasetImporter, ImportOutcome, ImportRequest};
use super::error::ImportError;
use super::file_parser::{FileParser, RawTable, UniversalFileParser};
use super::load_mode::LoadModeController;
use super::normalizer::Normalizer;
use super::schema_validator::SchemaValidator;

// ==========================================
// DatasetImporterImpl
// ==========================================
pub struct DatasetImporterImpl {
    catalogo: Arc<DatasetCatalog>,
    parser: Box<dyn FileParser>,
    gate: LoadModeController,
    datasets: DatasetRepository,
    logs: ImportLogRepository,
}

impl DatasetImporterImpl {
    pub fn new(
        conn: Arc<Mutex<Connection>>,
        catalogo: Arc<DatasetCatalog>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            catalogo,
            parser: Box::new(UniversalFileParser),
            gate: LoadModeController::new(verifier),
            datasets: DatasetRepository::new(conn.clone()),
            logs: ImportLogRepository::new(conn),
        }
    }

    /// Resolve o catálogo e lê o arquivo. Roda antes da abertura
    /// do log porque o total de linhas lido faz parte da abertura.
    fn preparar(&self, pedido: &ImportRequest) -> Result<(&DatasetConfig, RawTable), ImportError> {
        let config = self.catalogo.get(pedido.tipo_arquivo).ok_or_else(|| {
            ImportError::DatasetNotConfigured {
                tipo_arquivo: pedido.tipo_arquivo.to_string(),
            }
        })?;
        let raw = self.parser.parse(&pedido.caminho_arquivo)?;
        Ok((config, raw))
    }

    /// Etapas entre a abertura e o fechamento do log.
    async fn executar(
        &self,
        identity: &Identity,
        pedido: &ImportRequest,
        config: &DatasetConfig,
        raw: &RawTable,
    ) -> Result<i64, ImportError> {
        if raw.rows.is_empty() {
            return Err(ImportError::EmptyFile { detalhe: None });
        }

        SchemaValidator::validar(&raw.columns, config)?;

        let lote = Normalizer::normalizar(raw, config);
        debug!(
            linhas_lidas = raw.rows.len(),
            registros_validos = lote.len(),
            "lote normalizado"
        );
        if lote.is_empty() {
            return Err(ImportError::EmptyFile {
                detalhe: Some("nenhum registro válido após as coerções".to_string()),
            });
        }

        self.gate
            .autorizar(
                config,
                pedido.modo_importacao,
                &identity.usuario_email,
                pedido.senha_confirmacao.as_deref(),
            )
            .await?;

        let processados = self.datasets.persist(
            &lote,
            pedido.modo_importacao,
            pedido.contrato_id,
            pedido.sistema_origem_id,
            config,
        )?;
        Ok(processados as i64)
    }
}

#[async_trait]
impl DatasetImporter for DatasetImporterImpl {
    #[instrument(skip(self, identity, pedido))]
    async fn importar_arquivo(
        &self,
        identity: &Identity,
        pedido: ImportRequest,
    ) -> Result<ImportOutcome, ImportError> {
        let inicio = Instant::now();
        let import_id = Uuid::new_v4();
        let arquivo = nome_do_arquivo(&pedido.caminho_arquivo);

        info!(
            import_id = %import_id,
            arquivo = %arquivo,
            tipo_arquivo = %pedido.tipo_arquivo,
            modo = %pedido.modo_importacao,
            contrato_id = pedido.contrato_id,
            usuario = %identity.usuario_email,
            "iniciando importação"
        );

        let preparo = self.preparar(&pedido);
        let registros_lidos = preparo
            .as_ref()
            .map(|(_, raw)| raw.rows.len() as i64)
            .unwrap_or(0);
        // A dimensão global é auditada sem sistema de origem
        let sistema_log = match &preparo {
            Ok((config, _)) if config.is_dimensao() => None,
            _ => pedido.sistema_origem_id,
        };

        // A abertura precisa existir antes de qualquer efeito
        // visível; falha aqui aborta a tentativa inteira.
        let log_id = self.logs.open(&NewImportLog {
            contrato_id: pedido.contrato_id,
            sistema_origem_id: sistema_log,
            usuario_id: identity.usuario_id,
            usuario_email: identity.usuario_email.clone(),
            tipo_arquivo: pedido.tipo_arquivo,
            modo_importacao: pedido.modo_importacao,
            nome_arquivo: arquivo.clone(),
            total_registros: registros_lidos,
        })?;

        let resultado = match preparo {
            Ok((config, raw)) => self.executar(identity, &pedido, config, &raw).await,
            Err(e) => Err(e),
        };

        match resultado {
            Ok(processados) => {
                self.logs.close(
                    log_id,
                    ImportStatus::Success,
                    processados,
                    Some(SuccessCode::ImportSuccess.as_str()),
                    None,
                    Some(SuccessCode::ImportSuccess.mensagem()),
                )?;
                let elapsed_ms = inicio.elapsed().as_millis() as u64;
                info!(
                    import_id = %import_id,
                    log_id,
                    registros_lidos,
                    processados,
                    elapsed_ms,
                    "importação concluída"
                );
                Ok(ImportOutcome {
                    import_id,
                    log_id,
                    arquivo,
                    tipo_arquivo: pedido.tipo_arquivo,
                    modo_importacao: pedido.modo_importacao,
                    registros_lidos,
                    registros_processados: processados,
                    status: ImportStatus::Success,
                    success_code: SuccessCode::ImportSuccess,
                    elapsed_ms,
                })
            }
            Err(ImportError::EmptyFile { detalhe }) => {
                // NO_DATA carrega os dois códigos: o de sucesso para
                // o chamador e o do catálogo de erro para a triagem
                let mensagem = detalhe
                    .unwrap_or_else(|| ErrorCode::EmptyFile.mensagem().to_string());
                self.logs.close(
                    log_id,
                    ImportStatus::NoData,
                    0,
                    Some(SuccessCode::ImportNoData.as_str()),
                    Some(ErrorCode::EmptyFile.as_str()),
                    Some(&mensagem),
                )?;
                let elapsed_ms = inicio.elapsed().as_millis() as u64;
                info!(import_id = %import_id, log_id, "arquivo sem registros, NO_DATA");
                Ok(ImportOutcome {
                    import_id,
                    log_id,
                    arquivo,
                    tipo_arquivo: pedido.tipo_arquivo,
                    modo_importacao: pedido.modo_importacao,
                    registros_lidos,
                    registros_processados: 0,
                    status: ImportStatus::NoData,
                    success_code: SuccessCode::ImportNoData,
                    elapsed_ms,
                })
            }
            Err(erro) => {
                let codigo = erro.error_code();
                let mensagem = erro.to_string();
                // O erro do pipeline prevalece sobre uma falha no
                // fechamento do log
                if let Err(falha_log) = self.logs.close(
                    log_id,
                    ImportStatus::Error,
                    0,
                    None,
                    Some(codigo.as_str()),
                    Some(&mensagem),
                ) {
                    warn!(
                        import_id = %import_id,
                        log_id,
                        erro = %falha_log,
                        "falha ao fechar o log de importação"
                    );
                }
                warn!(
                    import_id = %import_id,
                    log_id,
                    error_code = codigo.as_str(),
                    erro = %mensagem,
                    "importação falhou"
                );
                Err(erro)
            }
        }
    }

    async fn importar_lote(
        &self,
        identity: &Identity,
        pedidos: Vec<ImportRequest>,
    ) -> Vec<Result<ImportOutcome, ImportError>> {
        info!(total_arquivos = pedidos.len(), "iniciando importação em lote");

        let tarefas: Vec<_> = pedidos
            .into_iter()
            .map(|pedido| self.importar_arquivo(identity, pedido))
            .collect();
        futures::future::join_all(tarefas).await
    }
}

fn nome_do_arquivo(caminho: &Path) -> String {
    caminho
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| caminho.display().to_string())
}
