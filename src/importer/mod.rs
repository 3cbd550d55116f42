// ==========================================
// Núcleo BI Cartorial - Pipeline de importação de extratos
// ==========================================
// Responsabilidade: transformar o arquivo enviado (CSV/XLSX) em
// linhas persistidas e auditadas, na ordem fixa:
// leitura -> log -> layout -> normalização -> modo -> persistência
// ==========================================

pub mod dataset_importer_impl;
pub mod dataset_importer_trait;
pub mod error;
pub mod file_parser;
pub mod load_mode;
pub mod normalizer;
pub mod schema_validator;

// Reexporta os tipos centrais do pipeline
pub use dataset_importer_impl::DatasetImporterImpl;
pub use dataset_importer_trait::{DatasetImporter, ImportOutcome, ImportRequest};
pub use error::{ImportError, ParseError};
pub use file_parser::{CsvParser, FileParser, RawTable, UniversalFileParser, XlsxParser};
pub use load_mode::LoadModeController;
pub use normalizer::Normalizer;
pub use schema_validator::SchemaValidator;
