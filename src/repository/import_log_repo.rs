// ==========================================
// Núcleo BI Cartorial - Repositório do log de importações
// ==========================================
// Tabela importacoes_log: trilha append-only de auditoria.
// Regra: toda tentativa de importação recebe exatamente um
// open() e exatamente um close() com status terminal.
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::ImportLogRepository;
