// ==========================================
// Núcleo BI Cartorial - Catálogo de datasets
// ==========================================
// Configuração imutável, montada uma vez no início do processo e
// passada por referência ao pipeline. Define, por tipo de arquivo:
// colunas obrigatórias, capacidade incremental, política de conflito
// e escopo do wipe da carga FULL_RELOAD.
// ==========================================

use crate::domain::types::DatasetKind;

// ==========================================
// ConflictPolicy - Política de conflito do INSERT
// ==========================================
// Skip: ON CONFLICT DO NOTHING (primeira escrita vence).
// UpdateSubset: sobrescreve apenas colunas mutáveis
// (situacao, valor, valor_abs em os_lanc), chave intocada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    Skip,
    UpdateSubset,
}

// ==========================================
// ReloadScope - Escopo do wipe no FULL_RELOAD
// ==========================================
// PorContratoSistema: DELETE do recorte (contrato_id, sistema_origem_id)
// antes do insert - o banco passa a espelhar o arquivo nesse recorte.
// SemWipe: dimensão global; nunca apaga, insert com Skip torna a
// recarga idempotente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadScope {
    PorContratoSistema,
    SemWipe,
}

// ==========================================
// DatasetConfig - Entrada do catálogo
// ==========================================
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub kind: DatasetKind,
    pub label: &'static str,
    pub tabela: &'static str,
    /// Colunas que o arquivo precisa expor (já minúsculas).
    pub colunas_obrigatorias: &'static [&'static str],
    /// Dimensão exige correspondência exata: faltantes OU extras falham.
    pub exige_colunas_exatas: bool,
    pub permite_incremental: bool,
    pub conflict_policy: ConflictPolicy,
    pub reload_scope: ReloadScope,
}

impl DatasetConfig {
    /// Dataset global (sem contrato/sistema nas linhas persistidas).
    pub fn is_dimensao(&self) -> bool {
        matches!(self.reload_scope, ReloadScope::SemWipe)
    }
}

// ==========================================
// Catálogo padrão
// ==========================================

const OS_SELO: DatasetConfig = DatasetConfig {
    kind: DatasetKind::OsSelo,
    label: "Ordem de Serviço - Selos",
    tabela: "os_selo",
    colunas_obrigatorias: &["id", "os_id", "selo", "quantidade"],
    exige_colunas_exatas: false,
    permite_incremental: true,
    conflict_policy: ConflictPolicy::Skip,
    reload_scope: ReloadScope::PorContratoSistema,
};

const OS_LANC: DatasetConfig = DatasetConfig {
    kind: DatasetKind::OsLanc,
    label: "Ordem de Serviço - Lançamentos",
    tabela: "os_lanc",
    colunas_obrigatorias: &[
        "id",
        "situacao",
        "quantidade",
        "valor",
        "capa",
        "livro",
        "folha",
        "dt_lancou",
        "os",
        "sequencia",
        "operacao",
        "lcto",
        "recibo",
    ],
    exige_colunas_exatas: false,
    permite_incremental: true,
    conflict_policy: ConflictPolicy::UpdateSubset,
    reload_scope: ReloadScope::PorContratoSistema,
};

const HIS_SELO: DatasetConfig = DatasetConfig {
    kind: DatasetKind::HisSelo,
    label: "Histórico de Selos",
    tabela: "his_selo",
    colunas_obrigatorias: &[
        "id",
        "selo",
        "tipo_ato",
        "capa",
        "livro",
        "folha",
        "quantidade",
        "data",
    ],
    exige_colunas_exatas: false,
    permite_incremental: true,
    conflict_policy: ConflictPolicy::Skip,
    reload_scope: ReloadScope::PorContratoSistema,
};

const HIS_SELO_DETALHE: DatasetConfig = DatasetConfig {
    kind: DatasetKind::HisSeloDetalhe,
    label: "Histórico de Selos Detalhado (PR)",
    tabela: "his_selo_detalhe_pr",
    colunas_obrigatorias: &["id", "selo_principal", "id_codigo_ato", "dataato"],
    exige_colunas_exatas: false,
    permite_incremental: true,
    conflict_policy: ConflictPolicy::Skip,
    reload_scope: ReloadScope::PorContratoSistema,
};

const TABELA_LANCAMENTOS: DatasetConfig = DatasetConfig {
    kind: DatasetKind::TabelaLancamentos,
    label: "Tabela de Tipos de Lançamentos (Dimensão)",
    tabela: "tipo_lancamento",
    colunas_obrigatorias: &[
        "codlcto",
        "descricao",
        "tipo_lanc",
        "grupodecontas",
        "status_inativo",
    ],
    exige_colunas_exatas: true,
    permite_incremental: false,
    conflict_policy: ConflictPolicy::Skip,
    reload_scope: ReloadScope::SemWipe,
};

// ==========================================
// DatasetCatalog
// ==========================================
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    configs: Vec<DatasetConfig>,
}

impl DatasetCatalog {
    /// Catálogo de produção: os cinco extratos suportados.
    pub fn padrao() -> Self {
        Self {
            configs: vec![
                OS_SELO,
                OS_LANC,
                HIS_SELO,
                HIS_SELO_DETALHE,
                TABELA_LANCAMENTOS,
            ],
        }
    }

    /// Busca por enum; o catálogo padrão cobre todos os variantes.
    pub fn get(&self, kind: DatasetKind) -> Option<&DatasetConfig> {
        self.configs.iter().find(|c| c.kind == kind)
    }

    /// Busca pelo identificador textual (CLI, rota). `None` vira
    /// IMPORT_007 na borda.
    pub fn find(&self, tipo_arquivo: &str) -> Option<&DatasetConfig> {
        DatasetKind::parse(tipo_arquivo).and_then(|k| self.get(k))
    }

    pub fn todos(&self) -> &[DatasetConfig] {
        &self.configs
    }
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self::padrao()
    }
}
