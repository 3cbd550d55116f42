// ==========================================
// Núcleo BI Cartorial - Modelos das consultas de conciliação
// ==========================================
// Linhas de leitura devolvidas pelas consultas de selos; nenhum
// desses tipos volta para o caminho de escrita.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PeriodoConsulta - Janela de datas (inclusiva nas duas pontas)
// ==========================================
// Período invertido não é erro: a consulta simplesmente não
// retorna linhas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodoConsulta {
    pub data_inicio: NaiveDate,
    pub data_fim: NaiveDate,
}

impl PeriodoConsulta {
    pub fn new(data_inicio: NaiveDate, data_fim: NaiveDate) -> Self {
        Self {
            data_inicio,
            data_fim,
        }
    }
}

// ==========================================
// SeloPendente - Selo baixado sem confirmação FNC
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeloPendente {
    pub selo_principal: String,
    pub tipo_ato: Option<String>,
    pub id_codigo_ato: i64,
    /// Descrição vigente na data do ato; nula quando a data cai
    /// fora de qualquer janela de vigência.
    pub descricao_codigo_ato: Option<String>,
    /// Data de negócio: data_ato, ou a data de carga na ausência.
    pub data_ato: NaiveDate,
}

// ==========================================
// SeloDuplicadoMesmoSistema - Repetição dentro de um sistema
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeloDuplicadoMesmoSistema {
    pub selo_principal: String,
    pub sistema_origem_id: i64,
    pub tipo_ato: Option<String>,
    pub livro: Option<String>,
    pub folha: Option<String>,
    pub data_ato: NaiveDate,
    pub total_ocorrencias: i64,
}

// ==========================================
// SeloDuplicadoEntreSistemas - Mesmo selo em sistemas distintos
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeloDuplicadoEntreSistemas {
    pub selo_principal: String,
    pub total_sistemas: i64,
    /// Sistemas de origem envolvidos, em ordem crescente.
    pub sistemas_origem: Vec<i64>,
    pub primeira_ocorrencia: NaiveDate,
    pub ultima_ocorrencia: NaiveDate,
}
