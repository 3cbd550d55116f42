// ==========================================
// Núcleo BI Cartorial - Leitura de arquivos (CSV/XLSX)
// ==========================================
// Converte o arquivo em uma tabela crua: cabeçalhos minúsculos e
// aparados, células como texto aparado, linhas totalmente vazias
// descartadas. Nenhuma validação de layout acontece aqui.
// ==========================================

use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use super::error::ParseError;

// ==========================================
// RawTable - Tabela crua lida do arquivo
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Cabeçalhos na ordem do arquivo, já minúsculos e aparados.
    pub columns: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

// ==========================================
// FileParser - Contrato de leitura
// ==========================================
pub trait FileParser: Send + Sync {
    fn parse(&self, file_path: &Path) -> Result<RawTable, ParseError>;
}

fn normalizar_cabecalho(h: &str) -> String {
    h.trim().to_lowercase()
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> Result<RawTable, ParseError> {
        if !file_path.exists() {
            return Err(ParseError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolera linhas com menos células
            .from_reader(file);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(normalizar_cabecalho)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = HashMap::new();
            for (idx, value) in record.iter().enumerate() {
                if let Some(col) = columns.get(idx) {
                    row.insert(col.clone(), value.trim().to_string());
                }
            }
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(RawTable { columns, rows })
    }
}

// ==========================================
// XlsxParser
// ==========================================
pub struct XlsxParser;

impl FileParser for XlsxParser {
    fn parse(&self, file_path: &Path) -> Result<RawTable, ParseError> {
        if !file_path.exists() {
            return Err(ParseError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ParseError::Excel(e.to_string()))?;

        // Sempre a primeira planilha do arquivo
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ParseError::Excel("arquivo sem planilhas".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ParseError::Excel(e.to_string()))?;

        let mut linhas = range.rows();
        let cabecalho = match linhas.next() {
            Some(l) => l,
            // Planilha sem nenhuma linha: tabela vazia, o pipeline
            // decide o que fazer (NO_DATA)
            None => return Ok(RawTable::default()),
        };

        let columns: Vec<String> = cabecalho
            .iter()
            .map(|cell| normalizar_cabecalho(&cell.to_string()))
            .collect();

        let mut rows = Vec::new();
        for data_row in linhas {
            let mut row = HashMap::new();
            for (idx, cell) in data_row.iter().enumerate() {
                if let Some(col) = columns.get(idx) {
                    row.insert(col.clone(), cell.to_string().trim().to_string());
                }
            }
            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(RawTable { columns, rows })
    }
}

// ==========================================
// UniversalFileParser - Despacho por extensão
// ==========================================
// Só .csv e .xlsx entram; qualquer outra extensão é IMPORT_001
// na borda.
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, file_path: &Path) -> Result<RawTable, ParseError> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(file_path),
            "xlsx" => XlsxParser.parse(file_path),
            _ => Err(ParseError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_cabecalhos_minusculos_e_aparados() {
        let mut arquivo = NamedTempFile::new().unwrap();
        writeln!(arquivo, " ID , OS_ID ,Selo,Quantidade").unwrap();
        writeln!(arquivo, "1,100,AA123,2").unwrap();

        let tabela = CsvParser.parse(arquivo.path()).unwrap();
        assert_eq!(tabela.columns, vec!["id", "os_id", "selo", "quantidade"]);
        assert_eq!(tabela.rows.len(), 1);
        assert_eq!(tabela.rows[0].get("os_id"), Some(&"100".to_string()));
    }

    #[test]
    fn test_csv_descarta_linhas_vazias() {
        let mut arquivo = NamedTempFile::new().unwrap();
        writeln!(arquivo, "id,os_id,selo").unwrap();
        writeln!(arquivo, "1,100,AA123").unwrap();
        writeln!(arquivo, ",,").unwrap();
        writeln!(arquivo, "2,101,AA124").unwrap();

        let tabela = CsvParser.parse(arquivo.path()).unwrap();
        assert_eq!(tabela.rows.len(), 2);
    }

    #[test]
    fn test_csv_so_cabecalho_vira_tabela_vazia() {
        let mut arquivo = NamedTempFile::new().unwrap();
        writeln!(arquivo, "id,os_id,selo").unwrap();

        let tabela = CsvParser.parse(arquivo.path()).unwrap();
        assert_eq!(tabela.columns.len(), 3);
        assert!(tabela.rows.is_empty());
    }

    #[test]
    fn test_csv_linha_curta_preenche_so_o_que_existe() {
        let mut arquivo = NamedTempFile::new().unwrap();
        writeln!(arquivo, "id,os_id,selo").unwrap();
        writeln!(arquivo, "1,100").unwrap();

        let tabela = CsvParser.parse(arquivo.path()).unwrap();
        assert_eq!(tabela.rows.len(), 1);
        assert_eq!(tabela.rows[0].get("selo"), None);
    }

    #[test]
    fn test_arquivo_inexistente() {
        let resultado = CsvParser.parse(Path::new("nao_existe.csv"));
        assert!(matches!(resultado, Err(ParseError::FileNotFound(_))));
    }

    #[test]
    fn test_extensao_nao_suportada() {
        let arquivo = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();

        let resultado = UniversalFileParser.parse(arquivo.path());
        assert!(matches!(
            resultado,
            Err(ParseError::UnsupportedFormat(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn test_despacho_por_extensao_csv() {
        let mut arquivo = tempfile::Builder::new()
            .suffix(".CSV")
            .tempfile()
            .unwrap();
        writeln!(arquivo, "codlcto,descricao").unwrap();
        writeln!(arquivo, "001,Escritura").unwrap();

        // Extensão comparada sem distinção de maiúsculas
        let tabela = UniversalFileParser.parse(arquivo.path()).unwrap();
        assert_eq!(tabela.rows.len(), 1);
    }
}
