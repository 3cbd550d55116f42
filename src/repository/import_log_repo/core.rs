use crate::domain::import_log::NewImportLog;
use crate::domain::types::ImportStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// ImportLogRepository - Trilha de auditoria das importações
// ==========================================
// Regra: repositório não faz lógica de negócio, só mapeamento.
// open() e close() rodam cada um em autocommit próprio, fora da
// transação de dados: rollback da carga não apaga a trilha.
pub struct ImportLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ImportLogRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // Escrita
    // ==========================================

    /// Abre o log da tentativa com status PROCESSING.
    ///
    /// # Retorno
    /// - `Ok(log_id)`: id da linha criada em importacoes_log
    pub fn open(&self, novo: &NewImportLog) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO importacoes_log (
                contrato_id, sistema_origem_id, usuario_id, usuario_email,
                tipo_arquivo, modo_importacao, nome_arquivo, status,
                total_registros, registros_processados, started_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, ?)
            "#,
            params![
                novo.contrato_id,
                novo.sistema_origem_id,
                novo.usuario_id,
                novo.usuario_email,
                novo.tipo_arquivo.as_str(),
                novo.modo_importacao.as_str(),
                novo.nome_arquivo,
                ImportStatus::Processing.as_str(),
                novo.total_registros,
                Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Fecha o log com um status terminal. Vale exatamente uma vez:
    /// a cláusula WHERE exige status PROCESSING, então um segundo
    /// fechamento (ou fechar um id inexistente) é erro.
    pub fn close(
        &self,
        log_id: i64,
        status: ImportStatus,
        registros_processados: i64,
        success_code: Option<&str>,
        error_code: Option<&str>,
        mensagem: Option<&str>,
    ) -> RepositoryResult<()> {
        if !status.is_terminal() {
            return Err(RepositoryError::InvalidStateTransition {
                from: ImportStatus::Processing.as_str().to_string(),
                to: status.as_str().to_string(),
            });
        }

        let conn = self.get_conn()?;

        let rows = conn.execute(
            r#"
            UPDATE importacoes_log
            SET status = ?,
                registros_processados = ?,
                success_code = ?,
                error_code = ?,
                mensagem = ?,
                finished_at = ?
            WHERE id = ?
              AND status = ?
            "#,
            params![
                status.as_str(),
                registros_processados,
                success_code,
                error_code,
                mensagem,
                Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string(),
                log_id,
                ImportStatus::Processing.as_str(),
            ],
        )?;

        if rows == 0 {
            return Err(RepositoryError::InvalidStateTransition {
                from: "terminal".to_string(),
                to: status.as_str().to_string(),
            });
        }

        Ok(())
    }
}
