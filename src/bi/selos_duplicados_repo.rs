// ==========================================
// Núcleo BI Cartorial - Selos duplicados
// ==========================================
// Duas visões sobre his_selo_detalhe_pr:
//  - mesmo sistema: o mesmo selo baixado mais de uma vez dentro
//    de um sistema de origem (linhas com ids distintos);
//  - entre sistemas: o mesmo selo aparecendo em sistemas de
//    origem diferentes do recorte.
// O recorte de período usa a data_ato persistida.
// ==========================================

use rusqlite::{Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

use crate::domain::types::TenantScope;
use crate::repository::{RepositoryError, RepositoryResult};

use super::models::{PeriodoConsulta, SeloDuplicadoEntreSistemas, SeloDuplicadoMesmoSistema};

pub struct SelosDuplicadosRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SelosDuplicadosRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Selos com mais de uma baixa no mesmo sistema de origem.
    /// Grupos com mais ocorrências primeiro.
    pub fn listar_mesmo_sistema(
        &self,
        scope: TenantScope,
        periodo: &PeriodoConsulta,
    ) -> RepositoryResult<Vec<SeloDuplicadoMesmoSistema>> {
        let conn = self.get_conn()?;

        let mut sql = String::from(
            r#"
            SELECT
                hsd.selo_principal,
                hsd.sistema_origem_id,
                hs.tipo_ato,
                hs.livro,
                hs.folha,
                hsd.data_ato,
                COUNT(*) AS total_ocorrencias
            FROM his_selo_detalhe_pr hsd
            LEFT JOIN his_selo hs
                   ON hs.selo = hsd.selo_principal
                  AND hs.contrato_id = hsd.contrato_id
                  AND hs.sistema_origem_id = hsd.sistema_origem_id
            WHERE hsd.data_ato BETWEEN ? AND ?
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

        sql.push_str(
            r#"
            GROUP BY hsd.selo_principal, hsd.sistema_origem_id,
                     hs.tipo_ato, hs.livro, hs.folha, hsd.data_ato
            HAVING COUNT(*) > 1
            ORDER BY total_ocorrencias DESC, hsd.selo_principal ASC
            "#,
        );

        let mut stmt = conn.prepare(&sql)?;
        let registros = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_mesmo_sistema)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(registros)
    }

    /// Selos presentes em mais de um sistema de origem.
    /// Grupos tocando mais sistemas primeiro.
    pub fn listar_entre_sistemas(
        &self,
        scope: TenantScope,
        periodo: &PeriodoConsulta,
    ) -> RepositoryResult<Vec<SeloDuplicadoEntreSistemas>> {
        let conn = self.get_conn()?;

        let mut sql = String::from(
            r#"
            SELECT
                hsd.selo_principal,
                COUNT(DISTINCT hsd.sistema_origem_id) AS total_sistemas,
                GROUP_CONCAT(DISTINCT hsd.sistema_origem_id) AS sistemas_origem,
                MIN(hsd.data_ato) AS primeira_ocorrencia,
                MAX(hsd.data_ato) AS ultima_ocorrencia
            FROM his_selo_detalhe_pr hsd
            WHERE hsd.data_ato BETWEEN ? AND ?
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

        sql.push_str(
            r#"
            GROUP BY hsd.selo_principal
            HAVING COUNT(DISTINCT hsd.sistema_origem_id) > 1
            ORDER BY total_sistemas DESC, hsd.selo_principal ASC
            "#,
        );

        let mut stmt = conn.prepare(&sql)?;
        let registros = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_entre_sistemas)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(registros)
    }
}

fn row_to_mesmo_sistema(row: &Row) -> SqliteResult<SeloDuplicadoMesmoSistema> {
    Ok(SeloDuplicadoMesmoSistema {
        selo_principal: row.get("selo_principal")?,
        sistema_origem_id: row.get("sistema_origem_id")?,
        tipo_ato: row.get("tipo_ato")?,
        livro: row.get("livro")?,
        folha: row.get("folha")?,
        data_ato: row.get("data_ato")?,
        total_ocorrencias: row.get("total_ocorrencias")?,
    })
}

fn row_to_entre_sistemas(row: &Row) -> SqliteResult<SeloDuplicadoEntreSistemas> {
    let concatenado: Option<String> = row.get("sistemas_origem")?;
    Ok(SeloDuplicadoEntreSistemas {
        selo_principal: row.get("selo_principal")?,
        total_sistemas: row.get("total_sistemas")?,
        sistemas_origem: parse_sistemas(concatenado),
        primeira_ocorrencia: row.get("primeira_ocorrencia")?,
        ultima_ocorrencia: row.get("ultima_ocorrencia")?,
    })
}

/// GROUP_CONCAT devolve os ids em ordem de visita; ordena para
/// saída estável.
fn parse_sistemas(concatenado: Option<String>) -> Vec<i64> {
    let mut ids: Vec<i64> = concatenado
        .unwrap_or_default()
        .split(',')
        .filter_map(|s| s.trim().parse::<i64>().ok())
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
