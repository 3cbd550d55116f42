// ==========================================
// Núcleo BI Cartorial - Erros do pipeline de importação
// ==========================================
// ParseError cobre a leitura do arquivo (CSV/XLSX), antes de
// qualquer validação. ImportError cobre as demais etapas.
// error_code() projeta cada falha no catálogo estável gravado em
// importacoes_log e devolvido ao chamador.
// ==========================================

use thiserror::Error;

use crate::auth::AuthError;
use crate::domain::codes::ErrorCode;
use crate::domain::types::DatasetKind;
use crate::repository::RepositoryError;

// ==========================================
// ParseError - Falhas de leitura do arquivo
// ==========================================
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("arquivo não encontrado: {0}")]
    FileNotFound(String),

    #[error("formato de arquivo não suportado: .{0}")]
    UnsupportedFormat(String),

    #[error("falha de leitura do arquivo: {0}")]
    Io(#[from] std::io::Error),

    #[error("falha ao interpretar CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("falha ao interpretar planilha: {0}")]
    Excel(String),
}

// ==========================================
// ImportError - Falhas do pipeline
// ==========================================
#[derive(Debug, Error)]
pub enum ImportError {
    // ===== Condição benigna =====
    /// Arquivo sem linhas, ou sem linhas válidas depois das
    /// coerções. Fecha o log como NO_DATA, nunca como ERROR.
    #[error("arquivo enviado não possui registros válidos")]
    EmptyFile { detalhe: Option<String> },

    // ===== Layout =====
    #[error("colunas obrigatórias ausentes: {}", faltantes.join(", "))]
    MissingColumns { faltantes: Vec<String> },

    /// Dimensões exigem correspondência exata de colunas.
    #[error("colunas ausentes: {} | colunas extras: {}", faltantes.join(", "), extras.join(", "))]
    MissingOrExtraColumns {
        faltantes: Vec<String>,
        extras: Vec<String>,
    },

    // ===== Modo de carga =====
    #[error("importação incremental não suportada para {tipo_arquivo}")]
    IncrementalNotAllowed { tipo_arquivo: DatasetKind },

    #[error("confirmação de senha obrigatória para carga FULL_RELOAD")]
    ConfirmationRequired,

    #[error("senha de confirmação inválida")]
    InvalidConfirmation,

    // ===== Catálogo =====
    #[error("tipo de importação não configurado: {tipo_arquivo}")]
    DatasetNotConfigured { tipo_arquivo: String },

    // ===== Infraestrutura =====
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("erro inesperado: {0}")]
    Unexpected(String),
}

impl ImportError {
    /// Código do catálogo correspondente ao erro.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ImportError::EmptyFile { .. } => ErrorCode::EmptyFile,
            ImportError::MissingColumns { .. } | ImportError::MissingOrExtraColumns { .. } => {
                ErrorCode::MissingRequiredColumns
            }
            ImportError::IncrementalNotAllowed { .. } => ErrorCode::InvalidImportMode,
            ImportError::ConfirmationRequired => ErrorCode::PasswordRequired,
            ImportError::InvalidConfirmation => ErrorCode::InvalidPassword,
            ImportError::DatasetNotConfigured { .. } => ErrorCode::ImportTypeNotConfigured,
            ImportError::Parse(ParseError::UnsupportedFormat(_)) => ErrorCode::InvalidFileType,
            ImportError::Parse(_) => ErrorCode::UnexpectedError,
            ImportError::Repository(RepositoryError::UniqueConstraintViolation(_)) => {
                ErrorCode::DuplicateKey
            }
            ImportError::Repository(_) => ErrorCode::DatabaseError,
            ImportError::Auth(_) => ErrorCode::UnexpectedError,
            ImportError::Unexpected(_) => ErrorCode::UnexpectedError,
        }
    }
}
