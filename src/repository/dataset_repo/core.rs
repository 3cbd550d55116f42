use crate::config::dataset_catalog::{DatasetConfig, ReloadScope};
use crate::domain::records::{
    HisSeloDetalheRecord, HisSeloRecord, OsLancRecord, OsSeloRecord, RecordBatch,
    TipoLancamentoRecord,
};
use crate::domain::types::{DatasetKind, LoadMode};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex};

// ==========================================
// DatasetRepository - Persistência dos lotes importados
// ==========================================
// Regra: repositório não faz lógica de negócio, só gravação.
// Todo lote entra em UMA transação: wipe (quando FULL_RELOAD no
// recorte) + inserts; qualquer erro desfaz tudo.
pub struct DatasetRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DatasetRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Persiste o lote tipado em uma única transação.
    ///
    /// FULL_RELOAD em dataset por sistema apaga o recorte
    /// (contrato_id, sistema_origem_id) antes de inserir; a dimensão
    /// global nunca apaga. O retorno é a soma de linhas efetivamente
    /// alteradas: conflito com Skip conta 0, com UpdateSubset conta 1.
    pub fn persist(
        &self,
        batch: &RecordBatch,
        modo: LoadMode,
        contrato_id: i64,
        sistema_origem_id: Option<i64>,
        config: &DatasetConfig,
    ) -> RepositoryResult<usize> {
        // Invariante: wipe e inserts precisam apontar para a mesma tabela
        if config.kind != batch.kind() {
            return Err(RepositoryError::InternalError(format!(
                "config de {} recebida para lote de {}",
                config.kind,
                batch.kind()
            )));
        }

        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        if modo == LoadMode::FullReload && config.reload_scope == ReloadScope::PorContratoSistema {
            let sistema = sistema_exigido(sistema_origem_id, config.kind)?;
            tx.execute(
                &format!(
                    "DELETE FROM {} WHERE contrato_id = ?1 AND sistema_origem_id = ?2",
                    config.tabela
                ),
                params![contrato_id, sistema],
            )?;
        }

        let processados = match batch {
            RecordBatch::OsSelo(rows) => {
                let sistema = sistema_exigido(sistema_origem_id, config.kind)?;
                Self::insert_os_selo_tx(&tx, rows, contrato_id, sistema)?
            }
            RecordBatch::OsLanc(rows) => {
                let sistema = sistema_exigido(sistema_origem_id, config.kind)?;
                Self::insert_os_lanc_tx(&tx, rows, contrato_id, sistema)?
            }
            RecordBatch::HisSelo(rows) => {
                let sistema = sistema_exigido(sistema_origem_id, config.kind)?;
                Self::insert_his_selo_tx(&tx, rows, contrato_id, sistema)?
            }
            RecordBatch::HisSeloDetalhe(rows) => {
                let sistema = sistema_exigido(sistema_origem_id, config.kind)?;
                Self::insert_his_selo_detalhe_tx(&tx, rows, contrato_id, sistema)?
            }
            RecordBatch::TabelaLancamentos(rows) => Self::insert_tipo_lancamento_tx(&tx, rows)?,
        };

        tx.commit()?;
        Ok(processados)
    }

    // ==========================================
    // Inserts por dataset (dentro da transação)
    // ==========================================

    /// os_selo: primeira escrita vence (Skip).
    pub(super) fn insert_os_selo_tx(
        tx: &Transaction,
        rows: &[OsSeloRecord],
        contrato_id: i64,
        sistema_origem_id: i64,
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO os_selo (
                contrato_id, sistema_origem_id, id, os_id, selo, quantidade
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (contrato_id, sistema_origem_id, os_id, selo) DO NOTHING
            "#,
        )?;

        let mut processados = 0;
        for r in rows {
            processados += stmt.execute(params![
                contrato_id,
                sistema_origem_id,
                r.id,
                r.os_id,
                r.selo,
                r.quantidade,
            ])?;
        }
        Ok(processados)
    }

    /// os_lanc: conflito sobrescreve só o subconjunto mutável
    /// (situacao, valor, valor_abs); chave e derivações intocadas.
    pub(super) fn insert_os_lanc_tx(
        tx: &Transaction,
        rows: &[OsLancRecord],
        contrato_id: i64,
        sistema_origem_id: i64,
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO os_lanc (
                contrato_id, sistema_origem_id, id, situacao, quantidade,
                valor, valor_abs, capa, livro, folha, dt_lancou, data_lancamento,
                os, sequencia, operacao, natureza, lcto, recibo, selo_principal
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19
            )
            ON CONFLICT (contrato_id, sistema_origem_id, os, sequencia) DO UPDATE SET
                situacao = excluded.situacao,
                valor = excluded.valor,
                valor_abs = excluded.valor_abs
            "#,
        )?;

        let mut processados = 0;
        for r in rows {
            processados += stmt.execute(params![
                contrato_id,
                sistema_origem_id,
                r.id,
                r.situacao,
                r.quantidade,
                r.valor,
                r.valor_abs,
                r.capa,
                r.livro,
                r.folha,
                r.dt_lancou.map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string()),
                r.data_lancamento.map(|d| d.format("%Y-%m-%d").to_string()),
                r.os,
                r.sequencia,
                r.operacao,
                r.natureza.map(|n| n.as_str()),
                r.lcto,
                r.recibo,
                r.selo_principal,
            ])?;
        }
        Ok(processados)
    }

    /// his_selo: primeira escrita vence (Skip). Linhas com id nulo
    /// nunca conflitam entre si (NULL é distinto no índice único).
    pub(super) fn insert_his_selo_tx(
        tx: &Transaction,
        rows: &[HisSeloRecord],
        contrato_id: i64,
        sistema_origem_id: i64,
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO his_selo (
                contrato_id, sistema_origem_id, id, selo, tipo_ato,
                capa, livro, folha, quantidade, data
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT (contrato_id, sistema_origem_id, id) DO NOTHING
            "#,
        )?;

        let mut processados = 0;
        for r in rows {
            processados += stmt.execute(params![
                contrato_id,
                sistema_origem_id,
                r.id,
                r.selo,
                r.tipo_ato,
                r.capa,
                r.livro,
                r.folha,
                r.quantidade,
                r.data.format("%Y-%m-%d %H:%M:%S").to_string(),
            ])?;
        }
        Ok(processados)
    }

    /// his_selo_detalhe_pr: primeira escrita vence (Skip).
    pub(super) fn insert_his_selo_detalhe_tx(
        tx: &Transaction,
        rows: &[HisSeloDetalheRecord],
        contrato_id: i64,
        sistema_origem_id: i64,
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO his_selo_detalhe_pr (
                contrato_id, sistema_origem_id, id, selo_principal,
                id_codigo_ato, data_ato
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (contrato_id, sistema_origem_id, id) DO NOTHING
            "#,
        )?;

        let mut processados = 0;
        for r in rows {
            processados += stmt.execute(params![
                contrato_id,
                sistema_origem_id,
                r.id,
                r.selo_principal,
                r.id_codigo_ato,
                r.data_ato.format("%Y-%m-%d").to_string(),
            ])?;
        }
        Ok(processados)
    }

    /// tipo_lancamento: dimensão global, sem contrato/sistema;
    /// codlcto repetido é ignorado.
    pub(super) fn insert_tipo_lancamento_tx(
        tx: &Transaction,
        rows: &[TipoLancamentoRecord],
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO tipo_lancamento (
                codlcto, descricao, tipo_lanc, grupodecontas, status_inativo
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (codlcto) DO NOTHING
            "#,
        )?;

        let mut processados = 0;
        for r in rows {
            processados += stmt.execute(params![
                r.codlcto,
                r.descricao,
                r.tipo_lanc,
                r.grupodecontas,
                r.status_inativo,
            ])?;
        }
        Ok(processados)
    }
}

/// Datasets por sistema exigem o id do sistema de origem no recorte.
fn sistema_exigido(sistema_origem_id: Option<i64>, kind: DatasetKind) -> RepositoryResult<i64> {
    sistema_origem_id.ok_or_else(|| RepositoryError::FieldValueError {
        field: "sistema_origem_id".to_string(),
        message: format!("obrigatório para importação de {}", kind),
    })
}
