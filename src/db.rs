// ==========================================
// Núcleo BI Cartorial - Infraestrutura SQLite
// ==========================================
// Unifica o comportamento de todo Connection::open:
// - foreign_keys e busy_timeout valem POR conexão
// - bootstrap do schema via CREATE TABLE IF NOT EXISTS
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// busy_timeout padrão (milissegundos)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Aplica os PRAGMAs padrão a uma conexão.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Abre a conexão já configurada.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Cria as tabelas do núcleo quando ausentes.
///
/// Chaves únicas espelham os alvos de ON CONFLICT dos inserts de
/// importação; sem elas a política de conflito não dispara.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Confirmações FNC (OS x Selo)
        CREATE TABLE IF NOT EXISTS os_selo (
            contrato_id        INTEGER NOT NULL,
            sistema_origem_id  INTEGER NOT NULL,
            id                 TEXT,
            os_id              TEXT NOT NULL,
            selo               TEXT NOT NULL,
            quantidade         REAL NOT NULL DEFAULT 1,
            created_at         TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (contrato_id, sistema_origem_id, os_id, selo)
        );

        -- Lançamentos de Ordem de Serviço
        CREATE TABLE IF NOT EXISTS os_lanc (
            contrato_id        INTEGER NOT NULL,
            sistema_origem_id  INTEGER NOT NULL,
            id                 TEXT,
            situacao           TEXT,
            quantidade         REAL NOT NULL DEFAULT 1,
            valor              REAL,
            valor_abs          REAL,
            capa               TEXT,
            livro              TEXT,
            folha              TEXT,
            dt_lancou          TEXT,
            data_lancamento    TEXT,
            os                 TEXT NOT NULL,
            sequencia          TEXT NOT NULL,
            operacao           TEXT,
            natureza           TEXT,
            lcto               TEXT,
            recibo             TEXT,
            selo_principal     TEXT NOT NULL,
            created_at         TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (contrato_id, sistema_origem_id, os, sequencia)
        );

        -- Histórico de selos emitidos
        CREATE TABLE IF NOT EXISTS his_selo (
            contrato_id        INTEGER NOT NULL,
            sistema_origem_id  INTEGER NOT NULL,
            id                 TEXT,
            selo               TEXT NOT NULL,
            tipo_ato           TEXT,
            capa               TEXT,
            livro              TEXT,
            folha              TEXT,
            quantidade         REAL NOT NULL DEFAULT 1,
            data               TEXT NOT NULL,
            created_at         TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (contrato_id, sistema_origem_id, id)
        );

        -- Detalhe de baixa de selo (PR)
        CREATE TABLE IF NOT EXISTS his_selo_detalhe_pr (
            contrato_id        INTEGER NOT NULL,
            sistema_origem_id  INTEGER NOT NULL,
            id                 TEXT NOT NULL,
            selo_principal     TEXT NOT NULL,
            id_codigo_ato      INTEGER NOT NULL,
            data_ato           TEXT NOT NULL,
            created_at         TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (contrato_id, sistema_origem_id, id)
        );

        -- Dimensão global de tipos de lançamento
        CREATE TABLE IF NOT EXISTS tipo_lancamento (
            codlcto            TEXT NOT NULL,
            descricao          TEXT,
            tipo_lanc          TEXT,
            grupodecontas      TEXT,
            status_inativo     INTEGER NOT NULL DEFAULT 0,
            created_at         TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (codlcto)
        );

        -- Dimensão de códigos de ato com janela de vigência
        CREATE TABLE IF NOT EXISTS dim_codigo_ato (
            id_codigo_ato      INTEGER NOT NULL,
            descricao          TEXT NOT NULL,
            vigencia_inicio    TEXT NOT NULL,
            vigencia_fim       TEXT
        );

        -- Trilha de auditoria das importações
        CREATE TABLE IF NOT EXISTS importacoes_log (
            id                      INTEGER PRIMARY KEY AUTOINCREMENT,
            contrato_id             INTEGER NOT NULL,
            sistema_origem_id       INTEGER,
            usuario_id              INTEGER NOT NULL,
            usuario_email           TEXT NOT NULL,
            tipo_arquivo            TEXT NOT NULL,
            modo_importacao         TEXT NOT NULL,
            nome_arquivo            TEXT NOT NULL,
            status                  TEXT NOT NULL,
            success_code            TEXT,
            error_code              TEXT,
            mensagem                TEXT,
            total_registros         INTEGER NOT NULL DEFAULT 0,
            registros_processados   INTEGER NOT NULL DEFAULT 0,
            started_at              TEXT NOT NULL,
            finished_at             TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_importacoes_log_contrato
            ON importacoes_log (contrato_id, started_at);

        -- Usuários (hash de senha para a confirmação de carga)
        CREATE TABLE IF NOT EXISTS usuarios (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            email              TEXT NOT NULL UNIQUE,
            senha_hash         TEXT NOT NULL,
            role               TEXT NOT NULL DEFAULT 'ADMIN',
            contrato_id        INTEGER NOT NULL,
            created_at         TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_his_selo_detalhe_selo
            ON his_selo_detalhe_pr (contrato_id, selo_principal);
        CREATE INDEX IF NOT EXISTS idx_os_selo_selo
            ON os_selo (contrato_id, sistema_origem_id, selo);
        CREATE INDEX IF NOT EXISTS idx_his_selo_selo
            ON his_selo (contrato_id, sistema_origem_id, selo);
        "#,
    )?;
    Ok(())
}
