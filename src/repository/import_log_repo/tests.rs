use super::ImportLogRepository;
use crate::domain::import_log::{ImportLogFilter, NewImportLog};
use crate::domain::types::{DatasetKind, ImportStatus, LoadMode, TenantScope};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

fn setup_test_db() -> Arc<Mutex<Connection>> {
    let conn = Connection::open_in_memory().unwrap();
    crate::db::configure_sqlite_connection(&conn).unwrap();
    crate::db::init_schema(&conn).unwrap();
    Arc::new(Mutex::new(conn))
}

fn make_novo(contrato_id: i64, email: &str) -> NewImportLog {
    NewImportLog {
        contrato_id,
        sistema_origem_id: Some(10),
        usuario_id: 1,
        usuario_email: email.to_string(),
        tipo_arquivo: DatasetKind::OsSelo,
        modo_importacao: LoadMode::Incremental,
        nome_arquivo: "extrato.xlsx".to_string(),
        total_registros: 120,
    }
}

#[test]
fn test_open_cria_log_processing() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let log_id = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    assert!(log_id > 0);

    let log = repo.find_by_id(log_id, TenantScope::Todos).unwrap().unwrap();
    assert_eq!(log.status, ImportStatus::Processing);
    assert_eq!(log.total_registros, 120);
    assert_eq!(log.registros_processados, 0);
    assert!(log.finished_at.is_none());
    assert!(log.success_code.is_none());
    assert!(log.error_code.is_none());
}

#[test]
fn test_close_grava_status_terminal() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let log_id = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    repo.close(
        log_id,
        ImportStatus::Success,
        118,
        Some("IMPORT_SUCCESS"),
        None,
        Some("Importação concluída com sucesso"),
    )
    .unwrap();

    let log = repo.find_by_id(log_id, TenantScope::Todos).unwrap().unwrap();
    assert_eq!(log.status, ImportStatus::Success);
    assert_eq!(log.registros_processados, 118);
    assert_eq!(log.success_code.as_deref(), Some("IMPORT_SUCCESS"));
    assert!(log.finished_at.is_some());
}

#[test]
fn test_close_com_erro_preserva_codigo() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let log_id = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    repo.close(
        log_id,
        ImportStatus::Error,
        0,
        None,
        Some("IMPORT_002"),
        Some("Colunas obrigatórias ausentes: selo"),
    )
    .unwrap();

    let log = repo.find_by_id(log_id, TenantScope::Todos).unwrap().unwrap();
    assert_eq!(log.status, ImportStatus::Error);
    assert_eq!(log.error_code.as_deref(), Some("IMPORT_002"));
    assert_eq!(log.registros_processados, 0);
}

#[test]
fn test_close_recusa_status_nao_terminal() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let log_id = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    let result = repo.close(log_id, ImportStatus::Processing, 0, None, None, None);
    assert!(result.is_err());
}

#[test]
fn test_close_so_vale_uma_vez() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let log_id = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    repo.close(log_id, ImportStatus::NoData, 0, Some("IMPORT_NO_DATA"), None, None)
        .unwrap();

    // Segundo fechamento não encontra linha PROCESSING
    let result = repo.close(log_id, ImportStatus::Success, 5, None, None, None);
    assert!(result.is_err());

    // O status original permanece
    let log = repo.find_by_id(log_id, TenantScope::Todos).unwrap().unwrap();
    assert_eq!(log.status, ImportStatus::NoData);
    assert_eq!(log.registros_processados, 0);
}

#[test]
fn test_close_id_inexistente_falha() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let result = repo.close(9999, ImportStatus::Success, 1, None, None, None);
    assert!(result.is_err());
}

#[test]
fn test_find_by_id_respeita_escopo() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let log_id = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();

    // Escopo do próprio contrato enxerga
    assert!(repo
        .find_by_id(log_id, TenantScope::Contrato(1))
        .unwrap()
        .is_some());

    // Outro contrato não enxerga
    assert!(repo
        .find_by_id(log_id, TenantScope::Contrato(2))
        .unwrap()
        .is_none());

    // MASTER enxerga tudo
    assert!(repo.find_by_id(log_id, TenantScope::Todos).unwrap().is_some());
}

#[test]
fn test_list_filtra_por_contrato() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    repo.open(&make_novo(1, "bruno@cartorio.com.br")).unwrap();
    repo.open(&make_novo(2, "carla@outro.com.br")).unwrap();

    let pagina = repo
        .list(&ImportLogFilter::new(TenantScope::Contrato(1)))
        .unwrap();
    assert_eq!(pagina.total, 2);
    assert_eq!(pagina.items.len(), 2);
    assert!(pagina.items.iter().all(|l| l.contrato_id == 1));

    let todas = repo.list(&ImportLogFilter::new(TenantScope::Todos)).unwrap();
    assert_eq!(todas.total, 3);
}

#[test]
fn test_list_filtros_opcionais() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    let id1 = repo.open(&make_novo(1, "ana@cartorio.com.br")).unwrap();
    repo.close(id1, ImportStatus::Success, 10, Some("IMPORT_SUCCESS"), None, None)
        .unwrap();

    let mut novo2 = make_novo(1, "bruno@cartorio.com.br");
    novo2.tipo_arquivo = DatasetKind::HisSelo;
    let id2 = repo.open(&novo2).unwrap();
    repo.close(id2, ImportStatus::Error, 0, None, Some("IMPORT_004"), None)
        .unwrap();

    // Por tipo de arquivo
    let mut filtro = ImportLogFilter::new(TenantScope::Contrato(1));
    filtro.tipo_arquivo = Some(DatasetKind::HisSelo);
    let pagina = repo.list(&filtro).unwrap();
    assert_eq!(pagina.total, 1);
    assert_eq!(pagina.items[0].id, id2);

    // Por status
    let mut filtro = ImportLogFilter::new(TenantScope::Contrato(1));
    filtro.status = Some(ImportStatus::Success);
    let pagina = repo.list(&filtro).unwrap();
    assert_eq!(pagina.total, 1);
    assert_eq!(pagina.items[0].id, id1);

    // Por código de erro
    let mut filtro = ImportLogFilter::new(TenantScope::Contrato(1));
    filtro.error_code = Some("IMPORT_004".to_string());
    let pagina = repo.list(&filtro).unwrap();
    assert_eq!(pagina.total, 1);
    assert_eq!(pagina.items[0].id, id2);
}

#[test]
fn test_list_busca_email_parcial_sem_caixa() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    repo.open(&make_novo(1, "Ana.Silva@Cartorio.com.br")).unwrap();
    repo.open(&make_novo(1, "bruno@cartorio.com.br")).unwrap();

    let mut filtro = ImportLogFilter::new(TenantScope::Contrato(1));
    filtro.usuario_email = Some("ANA.SILVA".to_string());
    let pagina = repo.list(&filtro).unwrap();
    assert_eq!(pagina.total, 1);
    assert_eq!(pagina.items[0].usuario_email, "Ana.Silva@Cartorio.com.br");
}

#[test]
fn test_list_paginacao() {
    let conn = setup_test_db();
    let repo = ImportLogRepository::new(conn);

    for i in 0..7 {
        repo.open(&make_novo(1, &format!("user{}@cartorio.com.br", i)))
            .unwrap();
    }

    let mut filtro = ImportLogFilter::new(TenantScope::Contrato(1));
    filtro.limit = 3;
    filtro.offset = 0;
    let pagina1 = repo.list(&filtro).unwrap();
    assert_eq!(pagina1.total, 7);
    assert_eq!(pagina1.items.len(), 3);

    filtro.offset = 6;
    let pagina3 = repo.list(&filtro).unwrap();
    assert_eq!(pagina3.total, 7);
    assert_eq!(pagina3.items.len(), 1);

    // Páginas não se sobrepõem (ordenação com desempate por id)
    let ids1: Vec<i64> = pagina1.items.iter().map(|l| l.id).collect();
    let ids3: Vec<i64> = pagina3.items.iter().map(|l| l.id).collect();
    assert!(ids1.iter().all(|id| !ids3.contains(id)));
}
