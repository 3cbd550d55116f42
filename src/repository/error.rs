// ==========================================
// Núcleo BI Cartorial - Erros da camada de repositório
// ==========================================
// thiserror; violações de constraint separadas do erro genérico
// para o pipeline classificar DB_002 (chave duplicada) vs DB_001.
// ==========================================

use thiserror::Error;

/// Erros da camada de repositório
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== Banco de dados =====
    #[error("registro não encontrado: {entity} com id={id}")]
    NotFound { entity: String, id: String },

    #[error("falha de conexão com o banco: {0}")]
    DatabaseConnectionError(String),

    #[error("falha ao obter lock da conexão: {0}")]
    LockError(String),

    #[error("falha de transação: {0}")]
    DatabaseTransactionError(String),

    #[error("falha de consulta: {0}")]
    DatabaseQueryError(String),

    #[error("violação de chave única: {0}")]
    UniqueConstraintViolation(String),

    #[error("violação de chave estrangeira: {0}")]
    ForeignKeyViolation(String),

    // ===== Ciclo de vida =====
    #[error("transição de status inválida: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== Dados persistidos inconsistentes =====
    #[error("valor de campo inválido (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== Genérico =====
    #[error("erro interno: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else if msg.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "desconhecido".to_string(),
                id: "desconhecido".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Alias de Result da camada
pub type RepositoryResult<T> = Result<T, RepositoryError>;
