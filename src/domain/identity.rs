// ==========================================
// Núcleo BI Cartorial - Identidade do usuário atuante
// ==========================================
// Contexto vindo da camada de autenticação (colaborador externo).
// O núcleo só precisa de quem está agindo e do perfil para derivar
// o escopo de contrato das consultas.
// ==========================================

use serde::{Deserialize, Serialize};

use super::types::TenantScope;

// ==========================================
// UserRole - Perfil de acesso
// ==========================================
// MASTER enxerga todos os contratos; ADMIN só o próprio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Master,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Master => "MASTER",
            UserRole::Admin => "ADMIN",
        }
    }

    pub fn parse(s: &str) -> Option<UserRole> {
        match s {
            "MASTER" => Some(UserRole::Master),
            "ADMIN" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

// ==========================================
// Identity - Usuário atuante
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub usuario_id: i64,
    pub usuario_email: String,
    pub role: UserRole,
    /// Contrato do vínculo do usuário (do cadastro).
    pub contrato_id: i64,
}

impl Identity {
    /// Escopo de consulta derivado do perfil: MASTER consulta todos
    /// os contratos, ADMIN fica preso ao próprio.
    pub fn scope(&self) -> TenantScope {
        match self.role {
            UserRole::Master => TenantScope::Todos,
            UserRole::Admin => TenantScope::Contrato(self.contrato_id),
        }
    }
}
