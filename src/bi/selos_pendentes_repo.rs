// ==========================================
// Núcleo BI Cartorial - Selos pendentes de confirmação FNC
// ==========================================
// Selo baixado (his_selo_detalhe_pr) que existe no histórico de
// emissão (his_selo) mas não tem confirmação em os_selo dentro do
// recorte (contrato, sistema). Os joins carregam contrato e
// sistema para nunca casar selos de serventias diferentes.
// Data de negócio: COALESCE(data_ato, date(created_at)).
// A descrição do código de ato vem da dimensão vigente na data.
// ==========================================

use rusqlite::{Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

use crate::domain::types::TenantScope;
use crate::repository::{RepositoryError, RepositoryResult};

use super::models::{PeriodoConsulta, SeloPendente};

pub struct SelosPendentesRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SelosPendentesRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Lista os selos pendentes no período, do mais recente para o
    /// mais antigo; selo como desempate para saída estável.
    pub fn listar(
        &self,
        scope: TenantScope,
        periodo: &PeriodoConsulta,
    ) -> RepositoryResult<Vec<SeloPendente>> {
        let conn = self.get_conn()?;

        let mut sql = String::from(
            r#"
            SELECT DISTINCT
                hsd.selo_principal,
                hs.tipo_ato,
                hsd.id_codigo_ato,
                dca.descricao AS descricao_codigo_ato,
                COALESCE(hsd.data_ato, date(hsd.created_at)) AS data_ato
            FROM his_selo_detalhe_pr hsd
            INNER JOIN his_selo hs
                    ON hs.selo = hsd.selo_principal
                   AND hs.contrato_id = hsd.contrato_id
                   AND hs.sistema_origem_id = hsd.sistema_origem_id
            LEFT JOIN os_selo os
                   ON os.selo = hsd.selo_principal
                  AND os.contrato_id = hsd.contrato_id
                  AND os.sistema_origem_id = hsd.sistema_origem_id
            LEFT JOIN dim_codigo_ato dca
                   ON dca.id_codigo_ato = hsd.id_codigo_ato
                  AND COALESCE(hsd.data_ato, date(hsd.created_at)) >= dca.vigencia_inicio
                  AND (dca.vigencia_fim IS NULL
                       OR COALESCE(hsd.data_ato, date(hsd.created_at)) <= dca.vigencia_fim)
            WHERE os.selo IS NULL
              AND COALESCE(hsd.data_ato, date(hsd.created_at)) BETWEEN ? AND ?
            "#,
        );

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(periodo.data_inicio.format("%Y-%m-%d").to_string()),
            Box::new(periodo.data_fim.format("%Y-%m-%d").to_string()),
        ];

        if let TenantScope::Contrato(contrato_id) = scope {
            sql.push_str(" AND hsd.contrato_id = ?");
            params.push(Box::new(contrato_id));
        }

        sql.push_str(" ORDER BY data_ato DESC, hsd.selo_principal ASC");

        let mut stmt = conn.prepare(&sql)?;
        let registros = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_selo_pendente)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(registros)
    }
}

fn row_to_selo_pendente(row: &Row) -> SqliteResult<SeloPendente> {
    Ok(SeloPendente {
        selo_principal: row.get("selo_principal")?,
        tipo_ato: row.get("tipo_ato")?,
        id_codigo_ato: row.get("id_codigo_ato")?,
        descricao_codigo_ato: row.get("descricao_codigo_ato")?,
        data_ato: row.get("data_ato")?,
    })
}
