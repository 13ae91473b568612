use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::model::Profile;

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS page_cache (
            key        TEXT PRIMARY KEY,
            document   TEXT NOT NULL,
            fetched_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS profiles (
            key            TEXT PRIMARY KEY REFERENCES page_cache(key),
            url            TEXT NOT NULL,
            name           TEXT NOT NULL,
            headline       TEXT NOT NULL,
            location       TEXT NOT NULL,
            posts          INTEGER NOT NULL,
            experiences    INTEGER NOT NULL,
            education      INTEGER NOT NULL,
            certifications INTEGER NOT NULL,
            projects       INTEGER NOT NULL,
            json           TEXT NOT NULL,
            parsed_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_profiles_name ON profiles(name);
        ",
    )
}

// ── Page cache ──

pub fn cache_exists(conn: &Connection, key: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM page_cache WHERE key = ?1)",
        [key],
        |row| row.get(0),
    )
}

pub fn cache_read(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT document FROM page_cache WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
}

/// Replace the entry in one transaction; readers see the old or the new
/// document, never a partial one.
pub fn cache_write(conn: &Connection, key: &str, document: &str, fetched_at: &str) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT OR REPLACE INTO page_cache (key, document, fetched_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![key, document, fetched_at],
    )?;
    tx.commit()
}

pub struct CachedPage {
    pub key: String,
    pub document: String,
}

/// Up to `limit` cached pages with keys after `after`, in key order.
/// Pass `""` for the first page, then the last key returned.
pub fn fetch_cached_page(conn: &Connection, after: &str, limit: usize) -> rusqlite::Result<Vec<CachedPage>> {
    let mut stmt = conn.prepare(
        "SELECT key, document FROM page_cache WHERE key > ?1 ORDER BY key LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![after, limit as i64], |row| {
            Ok(CachedPage {
                key: row.get(0)?,
                document: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Parsed profiles ──

pub struct ProfileRow {
    pub key: String,
    pub url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub posts: i64,
    pub experiences: i64,
    pub education: i64,
    pub certifications: i64,
    pub projects: i64,
    pub json: String,
}

impl ProfileRow {
    pub fn new(key: &str, profile: &Profile) -> serde_json::Result<Self> {
        Ok(ProfileRow {
            key: key.to_string(),
            url: profile.url.clone(),
            name: profile.name.clone(),
            headline: profile.headline.clone(),
            location: profile.location.clone(),
            posts: profile.posts.len() as i64,
            experiences: profile.experiences.len() as i64,
            education: profile.education.len() as i64,
            certifications: profile.licenses_and_certifications.len() as i64,
            projects: profile.projects.len() as i64,
            json: serde_json::to_string(profile)?,
        })
    }
}

pub fn save_profiles(conn: &Connection, rows: &[ProfileRow]) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO profiles
                (key, url, name, headline, location, posts, experiences, education,
                 certifications, projects, json, parsed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, datetime('now'))",
        )?;
        for r in rows {
            stmt.execute(rusqlite::params![
                r.key,
                r.url,
                r.name,
                r.headline,
                r.location,
                r.posts,
                r.experiences,
                r.education,
                r.certifications,
                r.projects,
                r.json,
            ])?;
        }
    }
    tx.commit()
}

pub fn load_profile(conn: &Connection, key: &str) -> Result<Option<Profile>> {
    let json: Option<String> = conn
        .query_row("SELECT json FROM profiles WHERE key = ?1", [key], |row| row.get(0))
        .optional()?;
    json.map(|j| serde_json::from_str(&j).context("Corrupt profile json"))
        .transpose()
}

pub struct OverviewRow {
    pub url: String,
    pub name: String,
    pub headline: String,
    pub location: String,
    pub posts: i64,
    pub experiences: i64,
    pub education: i64,
    pub projects: i64,
}

pub fn fetch_overview(conn: &Connection, limit: usize) -> rusqlite::Result<Vec<OverviewRow>> {
    let mut stmt = conn.prepare(
        "SELECT url, name, headline, location, posts, experiences, education, projects
         FROM profiles ORDER BY parsed_at DESC, name LIMIT ?1",
    )?;
    let rows = stmt
        .query_map([limit as i64], |row| {
            Ok(OverviewRow {
                url: row.get(0)?,
                name: row.get(1)?,
                headline: row.get(2)?,
                location: row.get(3)?,
                posts: row.get(4)?,
                experiences: row.get(5)?,
                education: row.get(6)?,
                projects: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub struct Stats {
    pub cached: i64,
    pub parsed: i64,
    pub unparsed: i64,
}

pub fn get_stats(conn: &Connection) -> rusqlite::Result<Stats> {
    let cached: i64 = conn.query_row("SELECT COUNT(*) FROM page_cache", [], |r| r.get(0))?;
    let parsed: i64 = conn.query_row("SELECT COUNT(*) FROM profiles", [], |r| r.get(0))?;
    let unparsed: i64 = conn.query_row(
        "SELECT COUNT(*) FROM page_cache c LEFT JOIN profiles p ON p.key = c.key WHERE p.key IS NULL",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        cached,
        parsed,
        unparsed,
    })
}
