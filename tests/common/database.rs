//! Test database setup and management
#![allow(dead_code)]

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement,
};
use std::time::Duration;

/// Schema mirroring sql/schema.sql, translated to SQLite for in-memory runs.
const SCHEMA: &[&str] = &[
    "CREATE TABLE users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT,
        password TEXT NOT NULL,
        is_staff BOOLEAN NOT NULL DEFAULT FALSE,
        is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE blog_posts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        slug TEXT NOT NULL,
        author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        excerpt TEXT NOT NULL DEFAULT '',
        body TEXT NOT NULL,
        tags TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'pending',
        featured BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TEXT NOT NULL,
        published_at TEXT,
        updated_at TEXT NOT NULL,
        reading_time INTEGER NOT NULL DEFAULT 1,
        likes INTEGER NOT NULL DEFAULT 0,
        rating INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE TABLE comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES blog_posts(id) ON DELETE CASCADE,
        author_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        body TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'pending',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE post_reactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id INTEGER NOT NULL REFERENCES blog_posts(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        reaction TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (post_id, user_id)
    )",
    "CREATE TABLE comment_reactions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        comment_id INTEGER NOT NULL REFERENCES comments(id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        reaction TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (comment_id, user_id)
    )",
    "CREATE TABLE comment_reports (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        comment_id INTEGER NOT NULL REFERENCES comments(id) ON DELETE CASCADE,
        reported_by INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        reason TEXT NOT NULL,
        notes TEXT NOT NULL DEFAULT '',
        resolved BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TEXT NOT NULL,
        UNIQUE (comment_id, reported_by)
    )",
];

/// Fresh in-memory database with the full schema applied.
/// Every test gets its own connection, so no cross-test cleanup is needed.
pub async fn setup_test_database() -> Result<DatabaseConnection, DbErr> {
    // A pooled in-memory SQLite gives every pooled connection its own
    // database, so pin the pool to exactly one connection.
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(3600));
    let db = Database::connect(opt).await?;

    db.execute(Statement::from_string(
        DbBackend::Sqlite,
        "PRAGMA foreign_keys = ON".to_string(),
    ))
    .await?;

    for ddl in SCHEMA {
        db.execute(Statement::from_string(DbBackend::Sqlite, ddl.to_string()))
            .await?;
    }

    Ok(db)
}
