//! SQL schema for the QCM SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    user_id   TEXT PRIMARY KEY,
    name      TEXT NOT NULL,
    email     TEXT NOT NULL,   -- not unique
    phone     TEXT NOT NULL,
    password  TEXT NOT NULL,   -- sealed by the configured verifier
    role      TEXT NOT NULL    -- free text; 'student' | 'admin' expected
);

-- The primary key is the authoritative guard against duplicate subjects.
CREATE TABLE IF NOT EXISTS matieres (
    matiere_id  TEXT PRIMARY KEY,   -- INF + three digits
    name        TEXT NOT NULL,
    description TEXT,
    created_at  TEXT NOT NULL,      -- RFC 3339 UTC
    updated_at  TEXT NOT NULL
);

-- No foreign key to matieres: a question may name any subject identifier.
CREATE TABLE IF NOT EXISTS questions (
    question_id  TEXT PRIMARY KEY,
    matiere_id   TEXT NOT NULL,
    text         TEXT NOT NULL,
    propositions TEXT NOT NULL,     -- JSON array of exactly four strings
    answer       TEXT NOT NULL,
    explanation  TEXT
);

CREATE INDEX IF NOT EXISTS users_email_idx       ON users(email);
CREATE INDEX IF NOT EXISTS questions_matiere_idx ON questions(matiere_id);

PRAGMA user_version = 1;
";
