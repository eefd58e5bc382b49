//! Standalone diagnostic for the signup database file.
//!
//! Opens the SQLite file read-only, checks that the signup table is in place
//! and prints a short human-readable report. Not part of the service's
//! runtime path.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions, Connection, SqliteConnection};

#[derive(Parser, Debug)]
#[command(
    name = "dbcheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Verify that the pilot signup database is working correctly"
)]
struct Cli {
    /// Path to the SQLite database file (or set DATABASE_FILE).
    #[arg(
        long = "db-file",
        env = "DATABASE_FILE",
        value_name = "PATH",
        default_value = "pilot_program.db"
    )]
    db_file: PathBuf,
}

const LINE: &str = "============================================================";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("{LINE}");
    println!("DATABASE VERIFICATION REPORT");
    println!("{LINE}");

    let Ok(metadata) = std::fs::metadata(&cli.db_file) else {
        println!("database file NOT found: {}", cli.db_file.display());
        println!("  -> run the signup server first to create the database");
        return Ok(());
    };
    println!(
        "database file exists: {} ({} bytes)",
        cli.db_file.display(),
        metadata.len()
    );

    let mut conn = SqliteConnectOptions::new()
        .filename(&cli.db_file)
        .read_only(true)
        .connect()
        .await
        .context("failed to open the database file")?;

    report(&mut conn).await?;

    conn.close().await?;

    Ok(())
}

async fn report(conn: &mut SqliteConnection) -> Result<()> {
    let table: Option<String> = sqlx::query_scalar(
        r#"SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'pilot_signups'"#,
    )
    .fetch_optional(&mut *conn)
    .await?;

    if table.is_none() {
        println!("table 'pilot_signups' NOT found");
        return Ok(());
    }
    println!("table 'pilot_signups' exists");

    // (cid, name, type, notnull, dflt_value, pk)
    let columns: Vec<(i64, String, String, i64, Option<String>, i64)> =
        sqlx::query_as(r#"PRAGMA table_info(pilot_signups)"#)
            .fetch_all(&mut *conn)
            .await?;

    println!();
    println!("table schema:");
    for (_cid, name, col_type, not_null, _default, pk) in &columns {
        println!(
            "   {name:<15} | {col_type:<10} | pk: {:<5} | not null: {}",
            *pk != 0,
            *not_null != 0
        );
    }

    let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM pilot_signups"#)
        .fetch_one(&mut *conn)
        .await?;

    println!();
    println!("total signups: {count}");

    if count > 0 {
        let recent: Vec<(i64, String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at FROM pilot_signups
            ORDER BY created_at DESC
            LIMIT 5
        "#,
        )
        .fetch_all(&mut *conn)
        .await?;

        println!();
        println!("recent signups (last 5):");
        for (id, name, email, created_at) in recent {
            println!("   id: {id} | {name} | {email}");
            println!("       created: {created_at}");
        }
    } else {
        println!("no signups yet, the database is ready to receive data");
    }

    println!();
    println!("{LINE}");
    println!("DATABASE IS WORKING CORRECTLY");
    println!("{LINE}");

    Ok(())
}
