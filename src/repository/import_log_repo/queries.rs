use super::core::ImportLogRepository;
use crate::domain::import_log::{ImportLog, ImportLogFilter, ImportLogPage};
use crate::domain::types::{DatasetKind, ImportStatus, LoadMode, TenantScope};
use crate::repository::error::RepositoryResult;
use chrono::NaiveDateTime;
use rusqlite::{Result as SqliteResult, Row};

impl ImportLogRepository {
    // ==========================================
    // Consultas de auditoria
    // ==========================================

    /// Lista logs sob o filtro, com o total sem paginação.
    ///
    /// Escopo de contrato obrigatório via filtro; demais condições
    /// entram somente quando presentes. Ordenação fixa:
    /// started_at DESC, id DESC (desempate estável para paginação).
    pub fn list(&self, filtro: &ImportLogFilter) -> RepositoryResult<ImportLogPage> {
        let conn = self.get_conn()?;

        let mut condicoes: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let TenantScope::Contrato(contrato_id) = filtro.scope {
            condicoes.push("contrato_id = ?".to_string());
            params.push(Box::new(contrato_id));
        }

        if let Some(tipo) = filtro.tipo_arquivo {
            condicoes.push("tipo_arquivo = ?".to_string());
            params.push(Box::new(tipo.as_str()));
        }

        if let Some(status) = filtro.status {
            condicoes.push("status = ?".to_string());
            params.push(Box::new(status.as_str()));
        }

        if let Some(ref error_code) = filtro.error_code {
            condicoes.push("error_code = ?".to_string());
            params.push(Box::new(error_code.clone()));
        }

        // Busca parcial no e-mail, sem distinção de maiúsculas
        if let Some(ref email) = filtro.usuario_email {
            condicoes.push("LOWER(usuario_email) LIKE LOWER(?)".to_string());
            params.push(Box::new(format!("%{}%", email)));
        }

        if let Some(de) = filtro.started_de {
            condicoes.push("started_at >= ?".to_string());
            params.push(Box::new(de.format("%Y-%m-%d %H:%M:%S").to_string()));
        }

        if let Some(ate) = filtro.started_ate {
            condicoes.push("started_at <= ?".to_string());
            params.push(Box::new(ate.format("%Y-%m-%d %H:%M:%S").to_string()));
        }

        let where_clause = if condicoes.is_empty() {
            String::from("1 = 1")
        } else {
            condicoes.join(" AND ")
        };

        let total: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM importacoes_log WHERE {}", where_clause),
            rusqlite::params_from_iter(&params),
            |row| row.get(0),
        )?;

        let sql = format!(
            r#"
            SELECT id, contrato_id, sistema_origem_id, usuario_id, usuario_email,
                   tipo_arquivo, modo_importacao, nome_arquivo, status,
                   success_code, error_code, mensagem,
                   total_registros, registros_processados, started_at, finished_at
            FROM importacoes_log
            WHERE {}
            ORDER BY started_at DESC, id DESC
            LIMIT ?
            OFFSET ?
            "#,
            where_clause
        );
        params.push(Box::new(filtro.limit));
        params.push(Box::new(filtro.offset));

        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(rusqlite::params_from_iter(params), |row| self.map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(ImportLogPage {
            items,
            total,
            limit: filtro.limit,
            offset: filtro.offset,
        })
    }

    /// Busca um log por id, respeitando o escopo de contrato.
    pub fn find_by_id(
        &self,
        log_id: i64,
        scope: TenantScope,
    ) -> RepositoryResult<Option<ImportLog>> {
        let conn = self.get_conn()?;

        let mut sql = String::from(
            r#"
            SELECT id, contrato_id, sistema_origem_id, usuario_id, usuario_email,
                   tipo_arquivo, modo_importacao, nome_arquivo, status,
                   success_code, error_code, mensagem,
                   total_registros, registros_processados, started_at, finished_at
            FROM importacoes_log
            WHERE id = ?
            "#,
        );
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(log_id)];

        if let TenantScope::Contrato(contrato_id) = scope {
            sql.push_str(" AND contrato_id = ?");
            params.push(Box::new(contrato_id));
        }

        let mut stmt = conn.prepare(&sql)?;
        match stmt.query_row(rusqlite::params_from_iter(params), |row| self.map_row(row)) {
            Ok(log) => Ok(Some(log)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ==========================================
    // Auxiliares
    // ==========================================

    /// Mapeia uma linha do banco para a entidade ImportLog
    fn map_row(&self, row: &Row) -> SqliteResult<ImportLog> {
        let tipo_arquivo_str: String = row.get(5)?;
        let modo_str: String = row.get(6)?;
        let status_str: String = row.get(8)?;
        let started_at_str: String = row.get(14)?;
        let finished_at_str: Option<String> = row.get(15)?;

        let tipo_arquivo = DatasetKind::parse(&tipo_arquivo_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                format!("tipo_arquivo inválido: {}", tipo_arquivo_str).into(),
            )
        })?;

        let modo_importacao = LoadMode::parse(&modo_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                rusqlite::types::Type::Text,
                format!("modo_importacao inválido: {}", modo_str).into(),
            )
        })?;

        let status = ImportStatus::parse(&status_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                rusqlite::types::Type::Text,
                format!("status inválido: {}", status_str).into(),
            )
        })?;

        let started_at = NaiveDateTime::parse_from_str(&started_at_str, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    14,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        let finished_at = finished_at_str
            .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok());

        Ok(ImportLog {
            id: row.get(0)?,
            contrato_id: row.get(1)?,
            sistema_origem_id: row.get(2)?,
            usuario_id: row.get(3)?,
            usuario_email: row.get(4)?,
            tipo_arquivo,
            modo_importacao,
            nome_arquivo: row.get(7)?,
            status,
            success_code: row.get(9)?,
            error_code: row.get(10)?,
            mensagem: row.get(11)?,
            total_registros: row.get(12)?,
            registros_processados: row.get(13)?,
            started_at,
            finished_at,
        })
    }
}
