// ==========================================
// Núcleo BI Cartorial - Entrada de linha de comando
// ==========================================
// Binário de operação: cria o banco, importa extratos e roda as
// consultas de conciliação. A saída dos comandos de consulta é
// JSON, uma resposta por execução.
// ==========================================

use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use selo_bi::api::{BiApi, ImportApi, LogsApi};
use selo_bi::auth::hash_senha;
use selo_bi::bi::PeriodoConsulta;
use selo_bi::db::{init_schema, open_sqlite_connection};
use selo_bi::domain::identity::{Identity, UserRole};
use selo_bi::domain::import_log::ImportLogFilter;
use selo_bi::domain::types::{DatasetKind, ImportStatus, LoadMode};
use selo_bi::importer::ImportRequest;
use selo_bi::logging;
use selo_bi::repository::UsuarioRepository;

const USO: &str = r#"selo-bi - importação de extratos e conciliação de selos

Uso: selo-bi <comando> [opções]

Comandos:
  init-db      cria o schema do banco (e opcionalmente o primeiro usuário)
                 --email <email> --senha <senha> [--master] [--contrato <id>]
  importar     importa um arquivo de extrato
                 --arquivo <caminho> --tipo <tipo> --modo <FULL_RELOAD|INCREMENTAL>
                 --email <email> [--sistema <id>] [--senha <confirmação>]
  pendentes    selos cobrados sem confirmação FNC no período
                 --email <email> --de <AAAA-MM-DD> --ate <AAAA-MM-DD>
  duplicados   selos duplicados no período
                 --email <email> --de <AAAA-MM-DD> --ate <AAAA-MM-DD> [--entre-sistemas]
  logs         trilha de auditoria das importações
                 --email <email> [--id <log_id>] [--tipo <tipo>] [--status <status>]
                 [--de <AAAA-MM-DD>] [--ate <AAAA-MM-DD>] [--limit <n>] [--offset <n>]

Opções gerais:
  --db <caminho>   banco SQLite (padrão: $SELO_BI_DB ou selo_bi.db)

Tipos de arquivo: os_selo, os_lanc, his_selo, his_selo_detalhe_pr, tabela_lancamentos
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let comando = match args.first() {
        Some(c) => c.as_str(),
        None => {
            eprint!("{USO}");
            return Ok(());
        }
    };

    tracing::info!("==================================================");
    tracing::info!("Núcleo BI Cartorial v{}", selo_bi::VERSION);
    tracing::info!("==================================================");

    match comando {
        "init-db" => cmd_init_db(&args).await,
        "importar" => cmd_importar(&args).await,
        "pendentes" => cmd_pendentes(&args).await,
        "duplicados" => cmd_duplicados(&args).await,
        "logs" => cmd_logs(&args).await,
        "--help" | "help" | "-h" => {
            print!("{USO}");
            Ok(())
        }
        outro => bail!("comando desconhecido: {outro}\n\n{USO}"),
    }
}

// ==========================================
// Comandos
// ==========================================

async fn cmd_init_db(args: &[String]) -> anyhow::Result<()> {
    let caminho = caminho_banco(args);
    let conn = open_sqlite_connection(&caminho)
        .with_context(|| format!("abrindo banco em {caminho}"))?;
    init_schema(&conn).context("criando schema")?;
    tracing::info!(banco = %caminho, "schema criado");

    // Primeiro usuário, se pedido; sem ele o banco nasce vazio.
    if let (Some(email), Some(senha)) = (valor_flag(args, "--email"), valor_flag(args, "--senha"))
    {
        let role = if tem_flag(args, "--master") {
            UserRole::Master
        } else {
            UserRole::Admin
        };
        let contrato_id = inteiro_flag(args, "--contrato")?.unwrap_or(1);

        let hash = hash_senha(&senha)?;
        let usuarios = UsuarioRepository::new(Arc::new(Mutex::new(conn)));
        let usuario_id = usuarios.insert(&email, &hash, role, contrato_id)?;
        tracing::info!(
            usuario_id,
            email = %email,
            role = role.as_str(),
            contrato_id,
            "usuário cadastrado"
        );
    }

    println!("banco pronto: {caminho}");
    Ok(())
}

async fn cmd_importar(args: &[String]) -> anyhow::Result<()> {
    let conn = abrir_banco(args)?;
    let identity = identidade(&conn, args)?;
    let api = ImportApi::new(conn);

    let arquivo = flag_obrigatoria(args, "--arquivo")?;
    let tipo = api.resolver_tipo(&flag_obrigatoria(args, "--tipo")?)?;
    let modo_texto = flag_obrigatoria(args, "--modo")?;
    let modo = LoadMode::parse(&modo_texto)
        .ok_or_else(|| anyhow!("modo inválido: {modo_texto} (use FULL_RELOAD ou INCREMENTAL)"))?;

    let pedido = ImportRequest {
        caminho_arquivo: PathBuf::from(arquivo),
        tipo_arquivo: tipo,
        contrato_id: identity.contrato_id,
        sistema_origem_id: inteiro_flag(args, "--sistema")?,
        modo_importacao: modo,
        senha_confirmacao: valor_flag(args, "--senha"),
    };

    let resposta = api.importar_arquivo(&identity, pedido).await?;
    println!("{}", serde_json::to_string_pretty(&resposta)?);
    Ok(())
}

async fn cmd_pendentes(args: &[String]) -> anyhow::Result<()> {
    let conn = abrir_banco(args)?;
    let identity = identidade(&conn, args)?;
    let api = BiApi::new(conn);

    let resposta = api.selos_pendentes(&identity, &periodo(args)?)?;
    println!("{}", serde_json::to_string_pretty(&resposta)?);
    Ok(())
}

async fn cmd_duplicados(args: &[String]) -> anyhow::Result<()> {
    let conn = abrir_banco(args)?;
    let identity = identidade(&conn, args)?;
    let api = BiApi::new(conn);

    let periodo = periodo(args)?;
    if tem_flag(args, "--entre-sistemas") {
        let resposta = api.selos_duplicados_entre_sistemas(&identity, &periodo)?;
        println!("{}", serde_json::to_string_pretty(&resposta)?);
    } else {
        let resposta = api.selos_duplicados_mesmo_sistema(&identity, &periodo)?;
        println!("{}", serde_json::to_string_pretty(&resposta)?);
    }
    Ok(())
}

async fn cmd_logs(args: &[String]) -> anyhow::Result<()> {
    let conn = abrir_banco(args)?;
    let identity = identidade(&conn, args)?;
    let api = LogsApi::new(conn);

    if let Some(log_id) = inteiro_flag(args, "--id")? {
        match api.obter(&identity, log_id)? {
            Some(log) => println!("{}", serde_json::to_string_pretty(&log)?),
            None => bail!("log {log_id} não encontrado para o seu contrato"),
        }
        return Ok(());
    }

    // O escopo do filtro é sobrescrito pela API; o valor inicial
    // aqui não decide nada.
    let mut filtro = ImportLogFilter::new(identity.scope());
    if let Some(tipo) = valor_flag(args, "--tipo") {
        filtro.tipo_arquivo =
            Some(DatasetKind::parse(&tipo).ok_or_else(|| anyhow!("tipo inválido: {tipo}"))?);
    }
    if let Some(status) = valor_flag(args, "--status") {
        filtro.status = Some(
            ImportStatus::parse(&status).ok_or_else(|| anyhow!("status inválido: {status}"))?,
        );
    }
    if let Some(de) = valor_flag(args, "--de") {
        filtro.started_de = data(&de)?.and_hms_opt(0, 0, 0);
    }
    if let Some(ate) = valor_flag(args, "--ate") {
        filtro.started_ate = data(&ate)?.and_hms_opt(23, 59, 59);
    }
    if let Some(limit) = inteiro_flag(args, "--limit")? {
        filtro.limit = limit;
    }
    if let Some(offset) = inteiro_flag(args, "--offset")? {
        filtro.offset = offset;
    }

    let pagina = api.listar(&identity, filtro)?;
    println!("{}", serde_json::to_string_pretty(&pagina)?);
    Ok(())
}

// ==========================================
// Auxiliares de linha de comando
// ==========================================

fn caminho_banco(args: &[String]) -> String {
    valor_flag(args, "--db")
        .or_else(|| std::env::var("SELO_BI_DB").ok())
        .unwrap_or_else(|| "selo_bi.db".to_string())
}

fn abrir_banco(args: &[String]) -> anyhow::Result<Arc<Mutex<Connection>>> {
    let caminho = caminho_banco(args);
    let conn = open_sqlite_connection(&caminho)
        .with_context(|| format!("abrindo banco em {caminho}"))?;
    init_schema(&conn).context("criando schema")?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Resolve o usuário atuante pelo e-mail; todo comando exige um.
fn identidade(conn: &Arc<Mutex<Connection>>, args: &[String]) -> anyhow::Result<Identity> {
    let email = flag_obrigatoria(args, "--email")?;
    let usuarios = UsuarioRepository::new(conn.clone());
    let cred = usuarios
        .find_by_email(&email)?
        .ok_or_else(|| anyhow!("usuário não cadastrado: {email}"))?;
    Ok(Identity {
        usuario_id: cred.id,
        usuario_email: cred.email,
        role: cred.role,
        contrato_id: cred.contrato_id,
    })
}

fn periodo(args: &[String]) -> anyhow::Result<PeriodoConsulta> {
    let de = data(&flag_obrigatoria(args, "--de")?)?;
    let ate = data(&flag_obrigatoria(args, "--ate")?)?;
    Ok(PeriodoConsulta::new(de, ate))
}

fn data(texto: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(texto, "%Y-%m-%d")
        .with_context(|| format!("data inválida: {texto} (use AAAA-MM-DD)"))
}

fn valor_flag(args: &[String], nome: &str) -> Option<String> {
    args.iter()
        .position(|a| a == nome)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn flag_obrigatoria(args: &[String], nome: &str) -> anyhow::Result<String> {
    valor_flag(args, nome).ok_or_else(|| anyhow!("opção obrigatória ausente: {nome}\n\n{USO}"))
}

fn inteiro_flag(args: &[String], nome: &str) -> anyhow::Result<Option<i64>> {
    match valor_flag(args, nome) {
        Some(v) => Ok(Some(
            v.parse().with_context(|| format!("{nome} inválido: {v}"))?,
        )),
        None => Ok(None),
    }
}

fn tem_flag(args: &[String], nome: &str) -> bool {
    args.iter().any(|a| a == nome)
}
