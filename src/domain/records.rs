// ==========================================
// Núcleo BI Cartorial - Registros tipados de importação
// ==========================================
// Um struct por tipo de dataset, construído pelo normalizador.
// Invariante: campos identificadores nunca são nulos aqui; linhas
// sem identificador são descartadas antes da construção.
// Nada a jusante do normalizador opera sobre mapas crus.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::types::{DatasetKind, Natureza};

// ==========================================
// OsSeloRecord - Ordem de Serviço x Selo (confirmação FNC)
// ==========================================
// Identificadores: (os_id, selo)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsSeloRecord {
    pub id: Option<String>,
    pub os_id: String,
    pub selo: String,
    /// Nulo no arquivo vira 1.
    pub quantidade: f64,
}

// ==========================================
// OsLancRecord - Lançamento de Ordem de Serviço
// ==========================================
// Identificadores: (os, sequencia)
// Derivações: valor_abs, natureza, data_lancamento, selo_principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsLancRecord {
    pub id: Option<String>,
    pub situacao: Option<String>,
    /// Nulo no arquivo vira 1.
    pub quantidade: f64,
    pub valor: Option<f64>,
    /// |valor|, quando valor é numérico.
    pub valor_abs: Option<f64>,
    pub capa: Option<String>,
    pub livro: Option<String>,
    pub folha: Option<String>,
    pub dt_lancou: Option<NaiveDateTime>,
    /// Parte-data de dt_lancou (coluna de corte para o BI).
    pub data_lancamento: Option<NaiveDate>,
    pub os: String,
    pub sequencia: String,
    pub operacao: Option<String>,
    pub natureza: Option<Natureza>,
    pub lcto: Option<String>,
    pub recibo: Option<String>,
    /// Chave de negócio composta: IDREF- + capa/livro/folha com zeros à esquerda.
    pub selo_principal: String,
}

// ==========================================
// HisSeloRecord - Histórico de selos emitidos
// ==========================================
// Identificadores: (selo, data)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HisSeloRecord {
    pub id: Option<String>,
    pub selo: String,
    pub tipo_ato: Option<String>,
    pub capa: Option<String>,
    pub livro: Option<String>,
    pub folha: Option<String>,
    /// Nulo no arquivo vira 1.
    pub quantidade: f64,
    pub data: NaiveDateTime,
}

// ==========================================
// HisSeloDetalheRecord - Detalhe de baixa do selo (PR)
// ==========================================
// Identificadores: (id, selo_principal, id_codigo_ato, data_ato)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HisSeloDetalheRecord {
    pub id: String,
    pub selo_principal: String,
    pub id_codigo_ato: i64,
    /// Data de negócio derivada de `dataato`.
    pub data_ato: NaiveDate,
}

// ==========================================
// TipoLancamentoRecord - Dimensão de tipos de lançamento
// ==========================================
// Identificador: codlcto. Dimensão global, sem contrato.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipoLancamentoRecord {
    pub codlcto: String,
    pub descricao: Option<String>,
    pub tipo_lanc: Option<String>,
    pub grupodecontas: Option<String>,
    /// Nulo no arquivo vira false.
    pub status_inativo: bool,
}

// ==========================================
// RecordBatch - Lote tipado pronto para persistência
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordBatch {
    OsSelo(Vec<OsSeloRecord>),
    OsLanc(Vec<OsLancRecord>),
    HisSelo(Vec<HisSeloRecord>),
    HisSeloDetalhe(Vec<HisSeloDetalheRecord>),
    TabelaLancamentos(Vec<TipoLancamentoRecord>),
}

impl RecordBatch {
    pub fn kind(&self) -> DatasetKind {
        match self {
            RecordBatch::OsSelo(_) => DatasetKind::OsSelo,
            RecordBatch::OsLanc(_) => DatasetKind::OsLanc,
            RecordBatch::HisSelo(_) => DatasetKind::HisSelo,
            RecordBatch::HisSeloDetalhe(_) => DatasetKind::HisSeloDetalhe,
            RecordBatch::TabelaLancamentos(_) => DatasetKind::TabelaLancamentos,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            RecordBatch::OsSelo(v) => v.len(),
            RecordBatch::OsLanc(v) => v.len(),
            RecordBatch::HisSelo(v) => v.len(),
            RecordBatch::HisSeloDetalhe(v) => v.len(),
            RecordBatch::TabelaLancamentos(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
