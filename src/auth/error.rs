use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Erros da camada de autenticação
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("falha ao calcular hash de senha: {0}")]
    HashingFailed(String),

    #[error("hash de senha em formato inválido")]
    InvalidHashFormat,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
