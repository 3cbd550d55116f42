// ==========================================
// Núcleo BI Cartorial - Normalizador de lotes
// ==========================================
// Converte a tabela crua em registros tipados por dataset:
// coerções (número, data, booleano), derivações (valor_abs,
// natureza, data_lancamento, selo_principal) e descarte das
// linhas sem identificador. Função pura; o lote pode sair vazio
// e a decisão sobre isso é do pipeline.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

use crate::config::DatasetConfig;
use crate::domain::records::{
    HisSeloDetalheRecord, HisSeloRecord, OsLancRecord, OsSeloRecord, RecordBatch,
    TipoLancamentoRecord,
};
use crate::domain::types::{DatasetKind, Natureza};

use super::file_parser::RawTable;

pub struct Normalizer;

impl Normalizer {
    pub fn normalizar(raw: &RawTable, config: &DatasetConfig) -> RecordBatch {
        match config.kind {
            DatasetKind::OsSelo => RecordBatch::OsSelo(normalizar_os_selo(&raw.rows)),
            DatasetKind::OsLanc => RecordBatch::OsLanc(normalizar_os_lanc(&raw.rows)),
            DatasetKind::HisSelo => RecordBatch::HisSelo(normalizar_his_selo(&raw.rows)),
            DatasetKind::HisSeloDetalhe => {
                RecordBatch::HisSeloDetalhe(normalizar_his_selo_detalhe(&raw.rows))
            }
            DatasetKind::TabelaLancamentos => {
                RecordBatch::TabelaLancamentos(normalizar_tipo_lancamento(&raw.rows))
            }
        }
    }
}

type Linha = HashMap<String, String>;

// ==========================================
// Normalização por dataset
// ==========================================

fn normalizar_os_selo(rows: &[Linha]) -> Vec<OsSeloRecord> {
    rows.iter()
        .filter_map(|row| {
            let os_id = texto(row, "os_id")?;
            let selo = texto(row, "selo")?;
            Some(OsSeloRecord {
                id: texto(row, "id"),
                os_id,
                selo,
                quantidade: numero(row, "quantidade").unwrap_or(1.0),
            })
        })
        .collect()
}

fn normalizar_os_lanc(rows: &[Linha]) -> Vec<OsLancRecord> {
    rows.iter()
        .filter_map(|row| {
            let os = texto(row, "os")?;
            let sequencia = texto(row, "sequencia")?;

            let valor = numero(row, "valor");
            let dt_lancou = data_hora(row, "dt_lancou");
            let operacao = texto(row, "operacao");

            Some(OsLancRecord {
                id: texto(row, "id"),
                situacao: texto(row, "situacao"),
                quantidade: numero(row, "quantidade").unwrap_or(1.0),
                valor,
                valor_abs: valor.map(f64::abs),
                capa: texto(row, "capa"),
                livro: texto(row, "livro"),
                folha: texto(row, "folha"),
                dt_lancou,
                data_lancamento: dt_lancou.map(|d| d.date()),
                os,
                sequencia,
                natureza: operacao.as_deref().and_then(natureza_da_operacao),
                operacao,
                lcto: texto(row, "lcto"),
                recibo: texto(row, "recibo"),
                selo_principal: selo_principal(row),
            })
        })
        .collect()
}

fn normalizar_his_selo(rows: &[Linha]) -> Vec<HisSeloRecord> {
    rows.iter()
        .filter_map(|row| {
            let selo = texto(row, "selo")?;
            let data = data_hora(row, "data")?;
            Some(HisSeloRecord {
                id: texto(row, "id"),
                selo,
                tipo_ato: texto(row, "tipo_ato"),
                capa: texto(row, "capa"),
                livro: texto(row, "livro"),
                folha: texto(row, "folha"),
                quantidade: numero(row, "quantidade").unwrap_or(1.0),
                data,
            })
        })
        .collect()
}

fn normalizar_his_selo_detalhe(rows: &[Linha]) -> Vec<HisSeloDetalheRecord> {
    rows.iter()
        .filter_map(|row| {
            Some(HisSeloDetalheRecord {
                id: texto(row, "id")?,
                selo_principal: texto(row, "selo_principal")?,
                id_codigo_ato: inteiro(row, "id_codigo_ato")?,
                data_ato: data(row, "dataato")?,
            })
        })
        .collect()
}

fn normalizar_tipo_lancamento(rows: &[Linha]) -> Vec<TipoLancamentoRecord> {
    rows.iter()
        .filter_map(|row| {
            let codlcto = texto(row, "codlcto")?;
            Some(TipoLancamentoRecord {
                codlcto,
                descricao: texto(row, "descricao"),
                tipo_lanc: texto(row, "tipo_lanc"),
                grupodecontas: texto(row, "grupodecontas"),
                status_inativo: celula(row, "status_inativo").map(booleano).unwrap_or(false),
            })
        })
        .collect()
}

// ==========================================
// Derivações
// ==========================================

/// "E" -> ENTRADA, "S" -> SAIDA, qualquer outro valor fica nulo.
fn natureza_da_operacao(op: &str) -> Option<Natureza> {
    match op {
        "E" => Some(Natureza::Entrada),
        "S" => Some(Natureza::Saida),
        _ => None,
    }
}

/// Chave de negócio composta do lançamento: IDREF- seguido de
/// capa, livro e folha com quatro dígitos cada; campo ausente
/// entra como 0000.
fn selo_principal(row: &Linha) -> String {
    format!(
        "IDREF-{}{}{}",
        zeropad4(celula(row, "capa")),
        zeropad4(celula(row, "livro")),
        zeropad4(celula(row, "folha")),
    )
}

fn zeropad4(v: Option<&str>) -> String {
    match v {
        Some(s) => format!("{:0>4}", s),
        None => "0000".to_string(),
    }
}

// ==========================================
// Coerções de célula
// ==========================================

// Formatos aceitos nos extratos: ISO e o formato brasileiro dos
// sistemas de origem.
const FORMATOS_DATA_HORA: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];
const FORMATOS_DATA: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Célula aparada e não vazia.
fn celula<'a>(row: &'a Linha, col: &str) -> Option<&'a str> {
    row.get(col).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn texto(row: &Linha, col: &str) -> Option<String> {
    celula(row, col).map(|v| v.to_string())
}

/// Célula não numérica vira nulo, nunca erro.
fn numero(row: &Linha, col: &str) -> Option<f64> {
    celula(row, col).and_then(|v| v.parse::<f64>().ok())
}

/// Aceita a forma decimal sem fração que planilhas costumam
/// produzir ("4012.0").
fn inteiro(row: &Linha, col: &str) -> Option<i64> {
    let v = celula(row, col)?;
    if let Ok(n) = v.parse::<i64>() {
        return Some(n);
    }
    match v.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 => Some(f as i64),
        _ => None,
    }
}

fn data_hora(row: &Linha, col: &str) -> Option<NaiveDateTime> {
    let v = celula(row, col)?;
    for fmt in FORMATOS_DATA_HORA {
        if let Ok(d) = NaiveDateTime::parse_from_str(v, fmt) {
            return Some(d);
        }
    }
    // Data sem hora entra como meia-noite
    data_de_texto(v).and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn data(row: &Linha, col: &str) -> Option<NaiveDate> {
    let v = celula(row, col)?;
    data_de_texto(v).or_else(|| {
        // Alguns extratos trazem data-hora na coluna de data
        FORMATOS_DATA_HORA
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(v, fmt).ok().map(|d| d.date()))
    })
}

fn data_de_texto(v: &str) -> Option<NaiveDate> {
    FORMATOS_DATA
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(v, fmt).ok())
}

/// Grafias usuais de verdadeiro; vazio e desconhecido caem
/// para false.
fn booleano(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "t" | "sim" | "s" | "verdadeiro"
    )
}
