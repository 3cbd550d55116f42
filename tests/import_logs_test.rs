// ==========================================
// Testes da trilha de auditoria via API
// ==========================================
// Logs gerados por importações reais, consultados pela LogsApi
// com filtros, paginação e escopo de contrato.

use chrono::{Duration, Utc};
use std::path::PathBuf;

use selo_bi::api::{ImportApi, LogsApi};
use selo_bi::domain::identity::{Identity, UserRole};
use selo_bi::domain::import_log::ImportLogFilter;
use selo_bi::domain::types::{DatasetKind, ImportStatus, LoadMode};
use selo_bi::importer::ImportRequest;
use selo_bi::logging;

use test_helpers::{admin, cadastrar_usuario, criar_banco_teste, escrever_csv, master};

const OS_SELO_OK: &str = "id,os_id,selo,quantidade\n1,100,SELO-A,1\n";
const OS_SELO_SEM_COLUNA: &str = "id,os_id,quantidade\n1,100,1\n";

/// Dispara uma importação e devolve o log_id quando ela sucede.
async fn importar(
    api: &ImportApi,
    identity: &Identity,
    tipo: DatasetKind,
    conteudo: &str,
) -> Option<i64> {
    let arquivo = escrever_csv(conteudo);
    let pedido = ImportRequest {
        caminho_arquivo: PathBuf::from(arquivo.path()),
        tipo_arquivo: tipo,
        contrato_id: identity.contrato_id,
        sistema_origem_id: Some(1),
        modo_importacao: LoadMode::Incremental,
        senha_confirmacao: None,
    };
    api.importar_arquivo(identity, pedido)
        .await
        .map(|r| r.log_id)
        .ok()
}

#[tokio::test]
async fn test_listar_com_filtros() {
    logging::init_test();
    let (_tmp, conn) = criar_banco_teste();
    let identity = admin(&conn);
    let import = ImportApi::new(conn.clone());
    let logs = LogsApi::new(conn.clone());

    // Duas cargas boas de tipos diferentes e uma recusada
    importar(&import, &identity, DatasetKind::OsSelo, OS_SELO_OK).await;
    importar(
        &import,
        &identity,
        DatasetKind::HisSelo,
        "id,selo,tipo_ato,capa,livro,folha,quantidade,data\nH1,S1,E,1,1,1,1,2024-05-01\n",
    )
    .await;
    importar(&import, &identity, DatasetKind::OsSelo, OS_SELO_SEM_COLUNA).await;

    let tudo = logs
        .listar(&identity, ImportLogFilter::new(identity.scope()))
        .expect("listar sem filtros");
    assert_eq!(tudo.total, 3);

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.tipo_arquivo = Some(DatasetKind::OsSelo);
    let os_selo = logs.listar(&identity, filtro).expect("filtro por tipo");
    assert_eq!(os_selo.total, 2);

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.status = Some(ImportStatus::Error);
    let com_erro = logs.listar(&identity, filtro).expect("filtro por status");
    assert_eq!(com_erro.total, 1);
    assert_eq!(com_erro.items[0].error_code.as_deref(), Some("IMPORT_002"));

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.error_code = Some("IMPORT_002".to_string());
    let por_codigo = logs.listar(&identity, filtro).expect("filtro por código");
    assert_eq!(por_codigo.total, 1);

    // Busca parcial de e-mail, sem distinção de maiúsculas
    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.usuario_email = Some("SERVENTIA1".to_string());
    let por_email = logs.listar(&identity, filtro).expect("filtro por e-mail");
    assert_eq!(por_email.total, 3);

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.usuario_email = Some("ninguem@".to_string());
    let vazio = logs.listar(&identity, filtro).expect("e-mail sem dono");
    assert_eq!(vazio.total, 0);
}

#[tokio::test]
async fn test_filtro_por_data_de_inicio() {
    logging::init_test();
    let (_tmp, conn) = criar_banco_teste();
    let identity = admin(&conn);
    let import = ImportApi::new(conn.clone());
    let logs = LogsApi::new(conn.clone());

    importar(&import, &identity, DatasetKind::OsSelo, OS_SELO_OK).await;

    let agora = Utc::now().naive_utc();

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.started_de = Some(agora - Duration::days(1));
    filtro.started_ate = Some(agora + Duration::days(1));
    let dentro = logs.listar(&identity, filtro).expect("janela que contém");
    assert_eq!(dentro.total, 1);

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.started_de = Some(agora + Duration::days(1));
    let fora = logs.listar(&identity, filtro).expect("janela futura");
    assert_eq!(fora.total, 0);
}

#[tokio::test]
async fn test_paginacao_estavel() {
    logging::init_test();
    let (_tmp, conn) = criar_banco_teste();
    let identity = admin(&conn);
    let import = ImportApi::new(conn.clone());
    let logs = LogsApi::new(conn.clone());

    for i in 0..5 {
        let conteudo = format!("id,os_id,selo,quantidade\n1,{i},SELO-{i},1\n");
        importar(&import, &identity, DatasetKind::OsSelo, &conteudo).await;
    }

    let mut filtro = ImportLogFilter::new(identity.scope());
    filtro.limit = 2;
    let primeira = logs.listar(&identity, filtro.clone()).expect("página 1");
    assert_eq!(primeira.total, 5);
    assert_eq!(primeira.items.len(), 2);
    // Mais recente primeiro; id como desempate
    assert!(primeira.items[0].id > primeira.items[1].id);

    filtro.offset = 4;
    let ultima = logs.listar(&identity, filtro).expect("página final");
    assert_eq!(ultima.total, 5);
    assert_eq!(ultima.items.len(), 1);
}

#[tokio::test]
async fn test_escopo_de_contrato_na_trilha() {
    logging::init_test();
    let (_tmp, conn) = criar_banco_teste();
    let admin1 = admin(&conn);
    let admin2 = cadastrar_usuario(&conn, "admin@serventia2.br", UserRole::Admin, 2);
    let chefe = master(&conn);
    let import = ImportApi::new(conn.clone());
    let logs = LogsApi::new(conn.clone());

    let log1 = importar(&import, &admin1, DatasetKind::OsSelo, OS_SELO_OK)
        .await
        .expect("carga do contrato 1");
    let log2 = importar(&import, &admin2, DatasetKind::OsSelo, OS_SELO_OK)
        .await
        .expect("carga do contrato 2");

    // Cada ADMIN lista só o próprio contrato, mesmo pedindo Todos
    let do_admin1 = logs
        .listar(&admin1, ImportLogFilter::new(selo_bi::TenantScope::Todos))
        .expect("listar como admin 1");
    assert_eq!(do_admin1.total, 1);
    assert_eq!(do_admin1.items[0].contrato_id, 1);

    let geral = logs
        .listar(&chefe, ImportLogFilter::new(chefe.scope()))
        .expect("listar como master");
    assert_eq!(geral.total, 2);

    // obter() nega acesso cruzado devolvendo None
    assert!(logs.obter(&admin1, log2).expect("consulta").is_none());
    assert!(logs.obter(&admin1, log1).expect("consulta").is_some());
    assert!(logs.obter(&chefe, log2).expect("consulta").is_some());
}
