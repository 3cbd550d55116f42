use super::DatasetRepository;
use crate::config::dataset_catalog::DatasetCatalog;
use crate::domain::records::{
    HisSeloDetalheRecord, OsLancRecord, OsSeloRecord, RecordBatch, TipoLancamentoRecord,
};
use crate::domain::types::{DatasetKind, LoadMode, Natureza};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

fn make_os_selo(os_id: &str, selo: &str) -> OsSeloRecord {
    OsSeloRecord {
        id: Some("1".to_string()),
        os_id: os_id.to_string(),
        selo: selo.to_string(),
        quantidade: 1.0,
    }
}

fn make_os_lanc(os: &str, sequencia: &str, situacao: &str, valor: f64, recibo: &str) -> OsLancRecord {
    OsLancRecord {
        id: Some("1".to_string()),
        situacao: Some(situacao.to_string()),
        quantidade: 1.0,
        valor: Some(valor),
        valor_abs: Some(valor.abs()),
        capa: Some("12".to_string()),
        livro: Some("3".to_string()),
        folha: Some("45".to_string()),
        dt_lancou: NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(14, 30, 0),
        data_lancamento: NaiveDate::from_ymd_opt(2025, 3, 10),
        os: os.to_string(),
        sequencia: sequencia.to_string(),
        operacao: Some("E".to_string()),
        natureza: Some(Natureza::Entrada),
        lcto: Some("101".to_string()),
        recibo: Some(recibo.to_string()),
        selo_principal: "IDREF-001200030045".to_string(),
    }
}

fn make_tipo_lancamento(codlcto: &str, descricao: &str) -> TipoLancamentoRecord {
    TipoLancamentoRecord {
        codlcto: codlcto.to_string(),
        descricao: Some(descricao.to_string()),
        tipo_lanc: Some("R".to_string()),
        grupodecontas: Some("EMOLUMENTOS".to_string()),
        status_inativo: false,
    }
}

fn count_rows(conn: &Arc<Mutex<Connection>>, sql: &str) -> i64 {
    let guard = conn.lock().unwrap();
    guard.query_row(sql, [], |row| row.get(0)).unwrap()
}

#[test]
fn test_insert_incremental_conta_alterados() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::OsSelo).unwrap();

    let lote = RecordBatch::OsSelo(vec![
        make_os_selo("100", "AAA111"),
        make_os_selo("100", "AAA112"),
        make_os_selo("101", "BBB200"),
    ]);

    let processados = repo
        .persist(&lote, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();
    assert_eq!(processados, 3);
    assert_eq!(count_rows(&conn, "SELECT COUNT(*) FROM os_selo"), 3);
}

#[test]
fn test_reimportacao_identica_nao_altera_nada() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::OsSelo).unwrap();

    let lote = RecordBatch::OsSelo(vec![
        make_os_selo("100", "AAA111"),
        make_os_selo("100", "AAA112"),
    ]);

    repo.persist(&lote, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();
    let segunda = repo
        .persist(&lote, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();

    // Conflito com Skip: nada alterado na reimportação
    assert_eq!(segunda, 0);
    assert_eq!(count_rows(&conn, "SELECT COUNT(*) FROM os_selo"), 2);
}

#[test]
fn test_full_reload_apaga_so_o_recorte() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::OsSelo).unwrap();

    // Recorte (1, 10) com duas linhas; (2, 10) com uma
    let lote_c1 = RecordBatch::OsSelo(vec![
        make_os_selo("100", "AAA111"),
        make_os_selo("100", "AAA112"),
    ]);
    let lote_c2 = RecordBatch::OsSelo(vec![make_os_selo("900", "ZZZ900")]);
    repo.persist(&lote_c1, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();
    repo.persist(&lote_c2, LoadMode::Incremental, 2, Some(10), config)
        .unwrap();

    // FULL_RELOAD do recorte (1, 10) com um arquivo novo
    let novo = RecordBatch::OsSelo(vec![make_os_selo("200", "CCC300")]);
    let processados = repo
        .persist(&novo, LoadMode::FullReload, 1, Some(10), config)
        .unwrap();
    assert_eq!(processados, 1);

    // Recorte espelha o arquivo; o outro contrato fica intocado
    assert_eq!(
        count_rows(&conn, "SELECT COUNT(*) FROM os_selo WHERE contrato_id = 1"),
        1
    );
    assert_eq!(
        count_rows(&conn, "SELECT COUNT(*) FROM os_selo WHERE contrato_id = 2"),
        1
    );
}

#[test]
fn test_os_lanc_conflito_atualiza_subconjunto() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::OsLanc).unwrap();

    let original = RecordBatch::OsLanc(vec![make_os_lanc("500", "1", "ABERTA", 100.0, "R1")]);
    repo.persist(&original, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();

    // Mesma chave (os, sequencia), situação/valor novos, recibo novo
    let atualizado = RecordBatch::OsLanc(vec![make_os_lanc("500", "1", "PAGA", -25.5, "R2")]);
    let processados = repo
        .persist(&atualizado, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();
    assert_eq!(processados, 1);

    let (situacao, valor, valor_abs, recibo): (String, f64, f64, String) = {
        let guard = conn.lock().unwrap();
        guard
            .query_row(
                "SELECT situacao, valor, valor_abs, recibo FROM os_lanc WHERE os = '500' AND sequencia = '1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap()
    };

    // Subconjunto mutável sobrescrito; demais colunas preservadas
    assert_eq!(situacao, "PAGA");
    assert_eq!(valor, -25.5);
    assert_eq!(valor_abs, 25.5);
    assert_eq!(recibo, "R1");
    assert_eq!(count_rows(&conn, "SELECT COUNT(*) FROM os_lanc"), 1);
}

#[test]
fn test_dimensao_full_reload_sem_wipe() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::TabelaLancamentos).unwrap();

    let primeiro = RecordBatch::TabelaLancamentos(vec![
        make_tipo_lancamento("01", "Emolumento"),
        make_tipo_lancamento("02", "ISS"),
    ]);
    repo.persist(&primeiro, LoadMode::FullReload, 1, None, config)
        .unwrap();

    let segundo = RecordBatch::TabelaLancamentos(vec![
        make_tipo_lancamento("02", "ISS Renomeado"),
        make_tipo_lancamento("03", "FUNARPEN"),
    ]);
    let processados = repo
        .persist(&segundo, LoadMode::FullReload, 1, None, config)
        .unwrap();

    // codlcto 02 já existia: ignorado; só 03 entra
    assert_eq!(processados, 1);
    assert_eq!(count_rows(&conn, "SELECT COUNT(*) FROM tipo_lancamento"), 3);

    let descricao: String = {
        let guard = conn.lock().unwrap();
        guard
            .query_row(
                "SELECT descricao FROM tipo_lancamento WHERE codlcto = '02'",
                [],
                |row| row.get(0),
            )
            .unwrap()
    };
    assert_eq!(descricao, "ISS");
}

#[test]
fn test_fato_sem_sistema_origem_falha() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::OsSelo).unwrap();

    let lote = RecordBatch::OsSelo(vec![make_os_selo("100", "AAA111")]);
    let result = repo.persist(&lote, LoadMode::Incremental, 1, None, config);

    assert!(result.is_err());
    assert_eq!(count_rows(&conn, "SELECT COUNT(*) FROM os_selo"), 0);
}

#[test]
fn test_config_incompativel_com_lote_falha() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config_errada = catalogo.get(DatasetKind::HisSelo).unwrap();

    let lote = RecordBatch::OsSelo(vec![make_os_selo("100", "AAA111")]);
    let result = repo.persist(&lote, LoadMode::Incremental, 1, Some(10), config_errada);

    assert!(result.is_err());
}

#[test]
fn test_his_selo_detalhe_id_repetido_no_lote() {
    let conn = setup_test_db();
    let repo = DatasetRepository::new(conn.clone());
    let catalogo = DatasetCatalog::padrao();
    let config = catalogo.get(DatasetKind::HisSeloDetalhe).unwrap();

    let registro = HisSeloDetalheRecord {
        id: "77".to_string(),
        selo_principal: "IDREF-000100020003".to_string(),
        id_codigo_ato: 4012,
        data_ato: NaiveDate::from_ymd_opt(2025, 2, 20).unwrap(),
    };
    let lote = RecordBatch::HisSeloDetalhe(vec![registro.clone(), registro]);

    let processados = repo
        .persist(&lote, LoadMode::Incremental, 1, Some(10), config)
        .unwrap();

    // Segunda ocorrência do mesmo id no lote é ignorada
    assert_eq!(processados, 1);
    assert_eq!(
        count_rows(&conn, "SELECT COUNT(*) FROM his_selo_detalhe_pr"),
        1
    );
}
