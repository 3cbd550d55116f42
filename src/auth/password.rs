// ==========================================
// Núcleo BI Cartorial - Hash de senha (Argon2id)
// ==========================================
// Formato PHC no banco; parâmetros padrão do crate
// (m=19456 KiB, t=2, p=1). Nunca se guarda senha em claro.
// ==========================================

use crate::auth::error::AuthError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Calcula o hash Argon2id da senha, com salt aleatório.
///
/// Retorna a string PHC (`$argon2id$...`), pronta para a coluna
/// usuarios.senha_hash.
pub fn hash_senha(senha: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(senha.as_bytes(), &salt)
        .map_err(|e| AuthError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Confere a senha contra o hash PHC persistido.
///
/// `Ok(false)` cobre tanto senha errada quanto falha de verificação;
/// só formato de hash inválido vira erro.
pub fn verificar_senha(senha: &str, senha_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(senha_hash).map_err(|_| AuthError::InvalidHashFormat)?;

    match Argon2::default().verify_password(senha.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(_) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_gera_formato_phc() {
        let hash = hash_senha("senha-forte-123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_senha_correta_confere() {
        let hash = hash_senha("minha-senha").unwrap();
        assert!(verificar_senha("minha-senha", &hash).unwrap());
    }

    #[test]
    fn test_senha_errada_nao_confere() {
        let hash = hash_senha("minha-senha").unwrap();
        assert!(!verificar_senha("outra-senha", &hash).unwrap());
    }

    #[test]
    fn test_hash_invalido_e_erro() {
        let result = verificar_senha("qualquer", "nao-e-um-hash");
        assert!(matches!(result, Err(AuthError::InvalidHashFormat)));
    }

    #[test]
    fn test_salts_diferentes_por_chamada() {
        let h1 = hash_senha("mesma-senha").unwrap();
        let h2 = hash_senha("mesma-senha").unwrap();
        assert_ne!(h1, h2);
        assert!(verificar_senha("mesma-senha", &h1).unwrap());
        assert!(verificar_senha("mesma-senha", &h2).unwrap());
    }
}
