// ==========================================
// Núcleo BI Cartorial - Erros da camada de API
// ==========================================
// Contrato externo achatado: código estável do catálogo, mensagem
// exibível e detalhe técnico opcional. Os erros internos chegam
// via From e nunca vazam tipos de infraestrutura para o chamador.
// ==========================================

use thiserror::Error;

use crate::auth::AuthError;
use crate::domain::codes::ErrorCode;
use crate::importer::ImportError;
use crate::repository::RepositoryError;

pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// ApiError
// ==========================================
#[derive(Debug, Error)]
#[error("{}: {mensagem}", error_code.as_str())]
pub struct ApiError {
    pub error_code: ErrorCode,
    /// Mensagem do catálogo, exibível ao usuário final.
    pub mensagem: String,
    /// Texto técnico para diagnóstico; não exibir ao usuário.
    pub detalhe: Option<String>,
}

impl ApiError {
    pub fn new(error_code: ErrorCode, detalhe: Option<String>) -> Self {
        Self {
            error_code,
            mensagem: error_code.mensagem().to_string(),
            detalhe,
        }
    }

    /// Ação sugerida do catálogo para a triagem do atendimento.
    pub fn acao(&self) -> &'static str {
        self.error_code.acao()
    }

    pub fn tipo_nao_configurado(tipo_arquivo: &str) -> Self {
        Self::new(
            ErrorCode::ImportTypeNotConfigured,
            Some(format!("tipo_arquivo={}", tipo_arquivo)),
        )
    }
}

impl From<ImportError> for ApiError {
    fn from(erro: ImportError) -> Self {
        let codigo = erro.error_code();
        Self::new(codigo, Some(erro.to_string()))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(erro: RepositoryError) -> Self {
        let codigo = match erro {
            RepositoryError::UniqueConstraintViolation(_) => ErrorCode::DuplicateKey,
            _ => ErrorCode::DatabaseError,
        };
        Self::new(codigo, Some(erro.to_string()))
    }
}

impl From<AuthError> for ApiError {
    fn from(erro: AuthError) -> Self {
        Self::new(ErrorCode::UnexpectedError, Some(erro.to_string()))
    }
}
