// ==========================================
// Núcleo BI Cartorial - Camada de configuração
// ==========================================
// Responsabilidade: catálogo imutável dos tipos de dataset.
// Carregado uma vez no início do processo, nunca mutado.
// ==========================================

pub mod dataset_catalog;

pub use dataset_catalog::{ConflictPolicy, DatasetCatalog, DatasetConfig, ReloadScope};
