// ==========================================
// Núcleo BI Cartorial - API de conciliação
// ==========================================
// Consultas de BI sobre os dados já carregados: selos pendentes
// no FNC e duplicidades dentro de um sistema ou entre sistemas.
// O escopo de contrato sai da identidade, nunca do chamador.
// ==========================================

use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex};

use crate::bi::{
    PeriodoConsulta, SeloDuplicadoEntreSistemas, SeloDuplicadoMesmoSistema, SeloPendente,
    SelosDuplicadosRepository, SelosPendentesRepository,
};
use crate::domain::codes::SuccessCode;
use crate::domain::identity::Identity;

use super::error::ApiResult;

// ==========================================
// BiQueryResponse - Envelope das consultas
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct BiQueryResponse<T> {
    pub success_code: String,
    pub mensagem: String,
    pub total_registros: usize,
    pub registros: Vec<T>,
}

impl<T> BiQueryResponse<T> {
    fn nova(codigo: SuccessCode, registros: Vec<T>) -> Self {
        Self {
            success_code: codigo.as_str().to_string(),
            mensagem: codigo.mensagem().to_string(),
            total_registros: registros.len(),
            registros,
        }
    }
}

// ==========================================
// BiApi
// ==========================================
pub struct BiApi {
    pendentes: SelosPendentesRepository,
    duplicados: SelosDuplicadosRepository,
}

impl BiApi {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            pendentes: SelosPendentesRepository::new(conn.clone()),
            duplicados: SelosDuplicadosRepository::new(conn),
        }
    }

    /// Selos com cobrança registrada no histórico mas sem
    /// confirmação de uso no mesmo sistema de origem.
    pub fn selos_pendentes(
        &self,
        identity: &Identity,
        periodo: &PeriodoConsulta,
    ) -> ApiResult<BiQueryResponse<SeloPendente>> {
        let registros = self.pendentes.listar(identity.scope(), periodo)?;
        Ok(BiQueryResponse::nova(
            SuccessCode::BiSelosPendentes,
            registros,
        ))
    }

    pub fn selos_duplicados_mesmo_sistema(
        &self,
        identity: &Identity,
        periodo: &PeriodoConsulta,
    ) -> ApiResult<BiQueryResponse<SeloDuplicadoMesmoSistema>> {
        let registros = self
            .duplicados
            .listar_mesmo_sistema(identity.scope(), periodo)?;
        Ok(BiQueryResponse::nova(
            SuccessCode::BiDuplicadosMesmoSistema,
            registros,
        ))
    }

    pub fn selos_duplicados_entre_sistemas(
        &self,
        identity: &Identity,
        periodo: &PeriodoConsulta,
    ) -> ApiResult<BiQueryResponse<SeloDuplicadoEntreSistemas>> {
        let registros = self
            .duplicados
            .listar_entre_sistemas(identity.scope(), periodo)?;
        Ok(BiQueryResponse::nova(
            SuccessCode::BiDuplicadosEntreSistemas,
            registros,
        ))
    }
}
