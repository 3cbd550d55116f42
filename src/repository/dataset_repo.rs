// ==========================================
// Núcleo BI Cartorial - Repositório de datasets importados
// ==========================================
// Persistência dos lotes tipados: uma transação por lote, wipe
// escopado no FULL_RELOAD e política de conflito por dataset
// (Skip ou UpdateSubset), conforme o catálogo.
// Regra: reimportar o mesmo arquivo nunca duplica linha.
// ==========================================

mod core;

#[cfg(test)]
mod tests;

pub use core::DatasetRepository;
