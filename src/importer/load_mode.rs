// ==========================================
// Núcleo BI Cartorial - Controle do modo de carga
// ==========================================
// FULL_RELOAD é destrutivo no recorte: exige reconfirmação da
// senha do usuário atuante antes de qualquer escrita.
// INCREMENTAL só passa quando o catálogo permite para o dataset.
// A checagem roda depois da validação/normalização e antes da
// persistência: arquivo ruim falha pelo conteúdo, não pelo modo.
// ==========================================

use std::sync::Arc;

use crate::auth::CredentialVerifier;
use crate::config::DatasetConfig;
use crate::domain::types::LoadMode;

use super::error::ImportError;

pub struct LoadModeController {
    verifier: Arc<dyn CredentialVerifier>,
}

impl LoadModeController {
    pub fn new(verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { verifier }
    }

    /// Libera (ou não) a combinação dataset x modo para o usuário.
    pub async fn autorizar(
        &self,
        config: &DatasetConfig,
        modo: LoadMode,
        usuario_email: &str,
        senha_confirmacao: Option<&str>,
    ) -> Result<(), ImportError> {
        match modo {
            LoadMode::Incremental => {
                if !config.permite_incremental {
                    return Err(ImportError::IncrementalNotAllowed {
                        tipo_arquivo: config.kind,
                    });
                }
                Ok(())
            }
            LoadMode::FullReload => {
                let senha = senha_confirmacao.ok_or(ImportError::ConfirmationRequired)?;
                if !self.verifier.verify(usuario_email, senha).await? {
                    return Err(ImportError::InvalidConfirmation);
                }
                Ok(())
            }
        }
    }
}
