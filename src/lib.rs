// ==========================================
// Núcleo BI Cartorial - Biblioteca central
// ==========================================
// Importação de extratos de sistemas cartoriais (OS, histórico de
// selos, tabela de lançamentos) e conciliação de selos contra o
// FNC, com isolamento por contrato em todas as consultas.
// ==========================================

// ==========================================
// Declaração de módulos
// ==========================================

// Camada de domínio - tipos e entidades
pub mod domain;

// Camada de repositórios - acesso a dados
pub mod repository;

// Camada de importação - pipeline de arquivos
pub mod importer;

// Consultas de conciliação (BI)
pub mod bi;

// Catálogo de datasets importáveis
pub mod config;

// Credenciais e confirmação de carga
pub mod auth;

// Infraestrutura de banco (conexão/PRAGMA/schema)
pub mod db;

// Sistema de logs
pub mod logging;

// Camada de API - fachadas de negócio
pub mod api;

// ==========================================
// Reexportação dos tipos centrais
// ==========================================

// Tipos de domínio
pub use domain::types::{DatasetKind, ImportStatus, LoadMode, TenantScope};

// Identidade e perfis
pub use domain::identity::{Identity, UserRole};

// Catálogo de códigos
pub use domain::codes::{ErrorCode, SuccessCode};

// Pipeline de importação
pub use importer::{DatasetImporter, ImportError, ImportOutcome, ImportRequest};

// API
pub use api::{ApiError, ApiResult, BiApi, ImportApi, ImportApiResponse, LogsApi};

// ==========================================
// Constantes do sistema
// ==========================================

// Versão do sistema
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Nome do sistema
pub const APP_NAME: &str = "Núcleo BI Cartorial";
