// ==========================================
// Núcleo BI Cartorial - Verificador de credencial
// ==========================================
// Contrato usado pelo pipeline de importação para confirmar a
// senha do usuário atuante antes de uma carga FULL_RELOAD.
// ==========================================

use crate::auth::error::AuthError;
use crate::auth::password::verificar_senha;
use crate::repository::usuario_repo::UsuarioRepository;
use async_trait::async_trait;

/// Confirma a senha do usuário atuante.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// `Ok(true)` quando a senha confere; `Ok(false)` quando não
    /// confere ou o usuário não existe.
    async fn verify(&self, usuario_email: &str, senha: &str) -> Result<bool, AuthError>;
}

/// Implementação contra a tabela usuarios.
pub struct DbCredentialVerifier {
    usuarios: UsuarioRepository,
}

impl DbCredentialVerifier {
    pub fn new(usuarios: UsuarioRepository) -> Self {
        Self { usuarios }
    }
}

#[async_trait]
impl CredentialVerifier for DbCredentialVerifier {
    async fn verify(&self, usuario_email: &str, senha: &str) -> Result<bool, AuthError> {
        match self.usuarios.find_by_email(usuario_email)? {
            Some(cred) => verificar_senha(senha, &cred.senha_hash),
            None => Ok(false),
        }
    }
}
