// ==========================================
// Núcleo BI Cartorial - Tipos de domínio
// ==========================================
// Enums fundamentais: tipo de dataset, modo de carga,
// status de importação e escopo de contrato.
// Formato de serialização: SCREAMING_SNAKE_CASE (igual ao banco)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// DatasetKind - Tipo de arquivo importável
// ==========================================
// Catálogo fixo: um tipo por extrato que os sistemas de
// origem exportam. Configurado uma vez por implantação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    OsSelo,
    OsLanc,
    HisSelo,
    HisSeloDetalhe,
    TabelaLancamentos,
}

impl DatasetKind {
    /// Identificador persistido em `importacoes_log.tipo_arquivo`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::OsSelo => "os_selo",
            DatasetKind::OsLanc => "os_lanc",
            DatasetKind::HisSelo => "his_selo",
            DatasetKind::HisSeloDetalhe => "his_selo_detalhe_pr",
            DatasetKind::TabelaLancamentos => "tabela_lancamentos",
        }
    }

    /// Converte o identificador textual (CLI, banco) de volta ao enum.
    pub fn parse(s: &str) -> Option<DatasetKind> {
        match s {
            "os_selo" => Some(DatasetKind::OsSelo),
            "os_lanc" => Some(DatasetKind::OsLanc),
            "his_selo" => Some(DatasetKind::HisSelo),
            "his_selo_detalhe_pr" => Some(DatasetKind::HisSeloDetalhe),
            "tabela_lancamentos" => Some(DatasetKind::TabelaLancamentos),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// LoadMode - Modo de carga
// ==========================================
// FULL_RELOAD: apaga o recorte (contrato, sistema) e regrava o arquivo.
// INCREMENTAL: insere sob política de conflito, nunca apaga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadMode {
    FullReload,
    Incremental,
}

impl LoadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadMode::FullReload => "FULL_RELOAD",
            LoadMode::Incremental => "INCREMENTAL",
        }
    }

    pub fn parse(s: &str) -> Option<LoadMode> {
        match s {
            "FULL_RELOAD" => Some(LoadMode::FullReload),
            "INCREMENTAL" => Some(LoadMode::Incremental),
            _ => None,
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// ImportStatus - Ciclo de vida do log de importação
// ==========================================
// PROCESSING -> exatamente uma transição terminal
// (SUCCESS | ERROR | NO_DATA); imutável depois disso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    Processing,
    Success,
    Error,
    NoData,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportStatus::Processing => "PROCESSING",
            ImportStatus::Success => "SUCCESS",
            ImportStatus::Error => "ERROR",
            ImportStatus::NoData => "NO_DATA",
        }
    }

    pub fn parse(s: &str) -> Option<ImportStatus> {
        match s {
            "PROCESSING" => Some(ImportStatus::Processing),
            "SUCCESS" => Some(ImportStatus::Success),
            "ERROR" => Some(ImportStatus::Error),
            "NO_DATA" => Some(ImportStatus::NoData),
            _ => None,
        }
    }

    /// Status terminais encerram o log; PROCESSING é o único transitório.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImportStatus::Processing)
    }
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// TenantScope - Escopo de contrato das consultas
// ==========================================
// Toda consulta de conciliação/auditoria carrega um escopo
// explícito: um contrato específico ou todos (perfil MASTER).
// O enum impede que o filtro de contrato seja esquecido por omissão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TenantScope {
    /// Restrito a um contrato (perfil ADMIN).
    Contrato(i64),
    /// Sem restrição de contrato (perfil MASTER).
    Todos,
}

impl TenantScope {
    pub fn contrato_id(&self) -> Option<i64> {
        match self {
            TenantScope::Contrato(id) => Some(*id),
            TenantScope::Todos => None,
        }
    }
}

// ==========================================
// Natureza - Classificação direcional do lançamento
// ==========================================
// Derivada do código de operação de os_lanc:
// "E" -> ENTRADA, "S" -> SAIDA, qualquer outro valor -> nulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Natureza {
    Entrada,
    Saida,
}

impl Natureza {
    pub fn as_str(&self) -> &'static str {
        match self {
            Natureza::Entrada => "ENTRADA",
            Natureza::Saida => "SAIDA",
        }
    }

    /// Mapeia o código de operação do extrato ("E"/"S").
    pub fn from_operacao(op: &str) -> Option<Natureza> {
        match op {
            "E" => Some(Natureza::Entrada),
            "S" => Some(Natureza::Saida),
            _ => None,
        }
    }
}

impl fmt::Display for Natureza {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
