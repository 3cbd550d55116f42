// ==========================================
// Núcleo BI Cartorial - Consultas de conciliação de selos
// ==========================================
// Responsabilidade: leitura analítica sobre os datasets já
// importados. Nada aqui escreve no banco; todo acesso carrega um
// TenantScope explícito.
// ==========================================

pub mod models;
pub mod selos_duplicados_repo;
pub mod selos_pendentes_repo;

// Reexporta os tipos centrais
pub use models::{
    PeriodoConsulta, SeloDuplicadoEntreSistemas, SeloDuplicadoMesmoSistema, SeloPendente,
};
pub use selos_duplicados_repo::SelosDuplicadosRepository;
pub use selos_pendentes_repo::SelosPendentesRepository;
