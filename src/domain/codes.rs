// ==========================================
// Núcleo BI Cartorial - Catálogos de códigos
// ==========================================
// Códigos estáveis de erro/sucesso gravados no log de importação
// e devolvidos ao chamador. Catálogo imutável, consultado por
// referência; os textos são a mensagem exibível e a ação sugerida
// para a operação (N1/N2/N3).
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ErrorCode - Códigos de erro
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// IMPORT_001 - extensão de arquivo não suportada
    InvalidFileType,
    /// IMPORT_002 - colunas obrigatórias ausentes (ou extras, no caso da dimensão)
    MissingRequiredColumns,
    /// IMPORT_003 - modo de carga incompatível com o tipo de arquivo
    InvalidImportMode,
    /// IMPORT_004 - senha de confirmação não confere
    InvalidPassword,
    /// IMPORT_005 - senha de confirmação ausente na carga FULL_RELOAD
    PasswordRequired,
    /// IMPORT_006 - arquivo sem registros válidos (condição benigna)
    EmptyFile,
    /// IMPORT_007 - tipo de importação fora do catálogo
    ImportTypeNotConfigured,
    /// DB_001 - falha de persistência
    DatabaseError,
    /// DB_002 - violação de chave única
    DuplicateKey,
    /// SYS_001 - erro não categorizado
    UnexpectedError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFileType => "IMPORT_001",
            ErrorCode::MissingRequiredColumns => "IMPORT_002",
            ErrorCode::InvalidImportMode => "IMPORT_003",
            ErrorCode::InvalidPassword => "IMPORT_004",
            ErrorCode::PasswordRequired => "IMPORT_005",
            ErrorCode::EmptyFile => "IMPORT_006",
            ErrorCode::ImportTypeNotConfigured => "IMPORT_007",
            ErrorCode::DatabaseError => "DB_001",
            ErrorCode::DuplicateKey => "DB_002",
            ErrorCode::UnexpectedError => "SYS_001",
        }
    }

    /// Mensagem padrão do catálogo.
    pub fn mensagem(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFileType => "Tipo de arquivo inválido. Utilize um arquivo .xlsx ou .csv",
            ErrorCode::MissingRequiredColumns => "Arquivo não contém todas as colunas obrigatórias",
            ErrorCode::InvalidImportMode => "Modo de importação inválido para este tipo de arquivo",
            ErrorCode::InvalidPassword => "Senha de confirmação inválida",
            ErrorCode::PasswordRequired => "Confirmação de senha obrigatória para carga inicial",
            ErrorCode::EmptyFile => "Arquivo enviado não possui registros válidos",
            ErrorCode::ImportTypeNotConfigured => "Tipo de importação não configurado no sistema",
            ErrorCode::DatabaseError => "Erro ao persistir dados no banco",
            ErrorCode::DuplicateKey => "Registro duplicado identificado",
            ErrorCode::UnexpectedError => "Erro inesperado no sistema",
        }
    }

    /// Ação sugerida para o atendimento.
    pub fn acao(&self) -> &'static str {
        match self {
            ErrorCode::InvalidFileType => "Solicitar novo arquivo ao cliente",
            ErrorCode::MissingRequiredColumns => "Validar layout do arquivo com o cliente",
            ErrorCode::InvalidImportMode => "Verificar configuração do tipo de importação",
            ErrorCode::InvalidPassword => "Solicitar nova confirmação ao usuário",
            ErrorCode::PasswordRequired => "Solicitar confirmação de senha ao usuário",
            ErrorCode::EmptyFile => "Orientar cliente a revisar o conteúdo do arquivo",
            ErrorCode::ImportTypeNotConfigured => "Encaminhar para N3",
            ErrorCode::DatabaseError => "Encaminhar para N3 / DBA",
            ErrorCode::DuplicateKey => "Validar chave única e dados do arquivo",
            ErrorCode::UnexpectedError => "Encaminhar para N3",
        }
    }

    /// Arquivo vazio não é falha: vira NO_DATA no log e resposta
    /// de sucesso sem registros para o chamador.
    pub fn is_benigno(&self) -> bool {
        matches!(self, ErrorCode::EmptyFile)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// SuccessCode - Códigos de sucesso
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessCode {
    ImportSuccess,
    ImportNoData,
    /// BI_001 - consulta de selos pendentes FNC
    BiSelosPendentes,
    /// BI_002 - duplicidades no mesmo sistema de origem
    BiDuplicadosMesmoSistema,
    /// BI_003 - duplicidades entre sistemas de origem
    BiDuplicadosEntreSistemas,
}

impl SuccessCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessCode::ImportSuccess => "IMPORT_SUCCESS",
            SuccessCode::ImportNoData => "IMPORT_NO_DATA",
            SuccessCode::BiSelosPendentes => "BI_001",
            SuccessCode::BiDuplicadosMesmoSistema => "BI_002",
            SuccessCode::BiDuplicadosEntreSistemas => "BI_003",
        }
    }

    pub fn mensagem(&self) -> &'static str {
        match self {
            SuccessCode::ImportSuccess => "Importação realizada com sucesso",
            SuccessCode::ImportNoData => {
                "Arquivo processado, mas nenhum registro válido foi encontrado"
            }
            SuccessCode::BiSelosPendentes => {
                "Consulta de selos pendentes realizada com sucesso"
            }
            SuccessCode::BiDuplicadosMesmoSistema => {
                "Consulta de selos duplicados no mesmo sistema realizada com sucesso"
            }
            SuccessCode::BiDuplicadosEntreSistemas => {
                "Consulta de selos duplicados em sistemas de origem diferentes realizada com sucesso"
            }
        }
    }
}

impl fmt::Display for SuccessCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
