// ==========================================
// Núcleo BI Cartorial - Validação de layout
// ==========================================
// Compara os cabeçalhos lidos com o catálogo do dataset.
// Extratos comuns: basta conter as obrigatórias, extras passam.
// Dimensão (exige_colunas_exatas): faltantes OU extras falham.
// As listas saem sempre ordenadas para mensagem estável.
// ==========================================

use std::collections::BTreeSet;

use crate::config::DatasetConfig;

use super::error::ImportError;

pub struct SchemaValidator;

impl SchemaValidator {
    /// Os cabeçalhos já chegam minúsculos e aparados do parser.
    pub fn validar(colunas: &[String], config: &DatasetConfig) -> Result<(), ImportError> {
        let presentes: BTreeSet<&str> = colunas.iter().map(|c| c.as_str()).collect();
        let obrigatorias: BTreeSet<&str> = config.colunas_obrigatorias.iter().copied().collect();

        let faltantes: Vec<String> = obrigatorias
            .difference(&presentes)
            .map(|c| c.to_string())
            .collect();

        if config.exige_colunas_exatas {
            let extras: Vec<String> = presentes
                .difference(&obrigatorias)
                .map(|c| c.to_string())
                .collect();
            if !faltantes.is_empty() || !extras.is_empty() {
                return Err(ImportError::MissingOrExtraColumns { faltantes, extras });
            }
            return Ok(());
        }

        if !faltantes.is_empty() {
            return Err(ImportError::MissingColumns { faltantes });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatasetCatalog;
    use crate::domain::types::DatasetKind;

    fn colunas(nomes: &[&str]) -> Vec<String> {
        nomes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_extrato_aceita_colunas_extras() {
        let catalogo = DatasetCatalog::padrao();
        let config = catalogo.get(DatasetKind::OsSelo).unwrap();

        let resultado = SchemaValidator::validar(
            &colunas(&["id", "os_id", "selo", "quantidade", "observacao"]),
            config,
        );
        assert!(resultado.is_ok());
    }

    #[test]
    fn test_extrato_reporta_faltantes_ordenadas() {
        let catalogo = DatasetCatalog::padrao();
        let config = catalogo.get(DatasetKind::OsSelo).unwrap();

        let resultado = SchemaValidator::validar(&colunas(&["id"]), config);
        match resultado {
            Err(ImportError::MissingColumns { faltantes }) => {
                assert_eq!(faltantes, vec!["os_id", "quantidade", "selo"]);
            }
            outro => panic!("esperava MissingColumns, veio {:?}", outro),
        }
    }

    #[test]
    fn test_dimensao_rejeita_coluna_extra() {
        let catalogo = DatasetCatalog::padrao();
        let config = catalogo.get(DatasetKind::TabelaLancamentos).unwrap();

        let resultado = SchemaValidator::validar(
            &colunas(&[
                "codlcto",
                "descricao",
                "tipo_lanc",
                "grupodecontas",
                "status_inativo",
                "extra",
            ]),
            config,
        );
        match resultado {
            Err(ImportError::MissingOrExtraColumns { faltantes, extras }) => {
                assert!(faltantes.is_empty());
                assert_eq!(extras, vec!["extra"]);
            }
            outro => panic!("esperava MissingOrExtraColumns, veio {:?}", outro),
        }
    }

    #[test]
    fn test_dimensao_reporta_faltantes_e_extras() {
        let catalogo = DatasetCatalog::padrao();
        let config = catalogo.get(DatasetKind::TabelaLancamentos).unwrap();

        let resultado = SchemaValidator::validar(
            &colunas(&["codlcto", "descricao", "tipo_lanc", "grupodecontas", "obs"]),
            config,
        );
        match resultado {
            Err(ImportError::MissingOrExtraColumns { faltantes, extras }) => {
                assert_eq!(faltantes, vec!["status_inativo"]);
                assert_eq!(extras, vec!["obs"]);
            }
            outro => panic!("esperava MissingOrExtraColumns, veio {:?}", outro),
        }
    }

    #[test]
    fn test_dimensao_layout_exato_passa() {
        let catalogo = DatasetCatalog::padrao();
        let config = catalogo.get(DatasetKind::TabelaLancamentos).unwrap();

        // A ordem das colunas no arquivo não importa
        let resultado = SchemaValidator::validar(
            &colunas(&[
                "status_inativo",
                "grupodecontas",
                "tipo_lanc",
                "descricao",
                "codlcto",
            ]),
            config,
        );
        assert!(resultado.is_ok());
    }
}
