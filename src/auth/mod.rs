// ==========================================
// Núcleo BI Cartorial - Autenticação
// ==========================================
// Responsabilidade: hash/verificação de senha (Argon2id) e o
// contrato de confirmação de credencial usado pela carga
// FULL_RELOAD. Emissão de sessão/token fica fora do núcleo.
// ==========================================

pub mod error;
pub mod password;
pub mod verifier;

pub use error::AuthError;
pub use password::{hash_senha, verificar_senha};
pub use verifier::{CredentialVerifier, DbCredentialVerifier};
