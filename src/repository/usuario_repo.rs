// ==========================================
// Núcleo BI Cartorial - Repositório de usuários
// ==========================================
// Responsabilidade: tabela usuarios (credenciais para a confirmação
// de senha da carga FULL_RELOAD e vínculo de contrato).
// A senha é guardada apenas como hash; a verificação fica na
// camada auth, nunca aqui.
// ==========================================

use crate::domain::identity::UserRole;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// Credencial persistida de um usuário
#[derive(Debug, Clone)]
pub struct UsuarioCredencial {
    pub id: i64,
    pub email: String,
    pub senha_hash: String,
    pub role: UserRole,
    pub contrato_id: i64,
}

pub struct UsuarioRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UsuarioRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Busca a credencial pelo e-mail, sem distinção de maiúsculas.
    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Option<UsuarioCredencial>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, email, senha_hash, role, contrato_id
            FROM usuarios
            WHERE LOWER(email) = LOWER(?1)
            "#,
        )?;

        let result = stmt.query_row(params![email], |row| {
            let role_str: String = row.get(3)?;
            let role = UserRole::parse(&role_str).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    rusqlite::types::Type::Text,
                    format!("role inválido: {}", role_str).into(),
                )
            })?;

            Ok(UsuarioCredencial {
                id: row.get(0)?,
                email: row.get(1)?,
                senha_hash: row.get(2)?,
                role,
                contrato_id: row.get(4)?,
            })
        });

        match result {
            Ok(u) => Ok(Some(u)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Cadastra um usuário já com o hash calculado. Usado pelo
    /// bootstrap de implantação e pelos testes.
    pub fn insert(
        &self,
        email: &str,
        senha_hash: &str,
        role: UserRole,
        contrato_id: i64,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO usuarios (email, senha_hash, role, contrato_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![email, senha_hash, role.as_str(), contrato_id],
        )?;

        Ok(conn.last_insert_rowid())
    }
}
