use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::Resume;

pub fn connect(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id             INTEGER PRIMARY KEY,
            memory_name    TEXT NOT NULL,
            document_name  TEXT NOT NULL,
            content_type   TEXT NOT NULL,
            extension      TEXT NOT NULL,
            description    TEXT,
            candidate      TEXT,
            markdown       TEXT NOT NULL,
            resume_json    TEXT NOT NULL,
            stored_at      TEXT NOT NULL,
            UNIQUE(memory_name, document_name)
        );
        CREATE INDEX IF NOT EXISTS idx_documents_memory ON documents(memory_name);
        ",
    )?;
    Ok(())
}

// ── Documents ──

pub struct DocumentRow {
    pub memory_name: String,
    pub document_name: String,
    pub content_type: String,
    pub extension: String,
    pub description: Option<String>,
    pub markdown: String,
    pub resume: Resume,
}

impl DocumentRow {
    /// Markdown document named after its file, e.g. `resume.md`.
    pub fn markdown(memory_name: &str, document_name: &str, markdown: String, resume: Resume) -> Self {
        DocumentRow {
            memory_name: memory_name.to_string(),
            document_name: document_name.to_string(),
            content_type: "text/markdown".to_string(),
            extension: "md".to_string(),
            description: None,
            markdown,
            resume,
        }
    }
}

/// Insert or replace by (memory_name, document_name). Returns the row id.
pub fn save_document(conn: &Connection, doc: &DocumentRow) -> Result<i64> {
    let resume_json = serde_json::to_string(&doc.resume)?;
    let candidate = Some(doc.resume.header.name.as_str()).filter(|n| !n.is_empty());
    let id = conn.query_row(
        "INSERT INTO documents
         (memory_name, document_name, content_type, extension, description,
          candidate, markdown, resume_json, stored_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(memory_name, document_name) DO UPDATE SET
            content_type = excluded.content_type,
            extension    = excluded.extension,
            description  = excluded.description,
            candidate    = excluded.candidate,
            markdown     = excluded.markdown,
            resume_json  = excluded.resume_json,
            stored_at    = excluded.stored_at
         RETURNING id",
        params![
            doc.memory_name,
            doc.document_name,
            doc.content_type,
            doc.extension,
            doc.description,
            candidate,
            doc.markdown,
            resume_json,
            Utc::now().to_rfc3339(),
        ],
        |r| r.get(0),
    )?;
    Ok(id)
}

pub struct StoredDocument {
    pub id: i64,
    pub memory_name: String,
    pub document_name: String,
    pub content_type: String,
    pub extension: String,
    pub description: Option<String>,
    pub markdown: String,
    pub resume: Resume,
    pub stored_at: String,
}

pub fn fetch_document(conn: &Connection, memory_name: &str, document_name: &str) -> Result<StoredDocument> {
    let row = conn
        .query_row(
            "SELECT id, content_type, extension, description, markdown, resume_json, stored_at
             FROM documents WHERE memory_name = ?1 AND document_name = ?2",
            params![memory_name, document_name],
            |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, Option<String>>(3)?,
                    r.get::<_, String>(4)?,
                    r.get::<_, String>(5)?,
                    r.get::<_, String>(6)?,
                ))
            },
        )
        .optional()?;

    let Some((id, content_type, extension, description, markdown, resume_json, stored_at)) = row else {
        return Err(Error::DocumentNotFound {
            memory: memory_name.to_string(),
            document: document_name.to_string(),
        });
    };

    Ok(StoredDocument {
        id,
        memory_name: memory_name.to_string(),
        document_name: document_name.to_string(),
        content_type,
        extension,
        description,
        markdown,
        resume: serde_json::from_str(&resume_json)?,
        stored_at,
    })
}

pub struct DocumentSummary {
    pub document_name: String,
    pub candidate: String,
    pub work: usize,
    pub education: usize,
    pub stored_at: String,
}

pub fn list_documents(conn: &Connection, memory_name: &str) -> Result<Vec<DocumentSummary>> {
    let mut stmt = conn.prepare(
        "SELECT document_name, COALESCE(candidate, ''), resume_json, stored_at
         FROM documents WHERE memory_name = ?1 ORDER BY document_name",
    )?;
    let rows = stmt
        .query_map([memory_name], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(document_name, candidate, resume_json, stored_at)| {
            let resume: Resume = serde_json::from_str(&resume_json)?;
            Ok(DocumentSummary {
                document_name,
                candidate,
                work: resume.work.len(),
                education: resume.education.len(),
                stored_at,
            })
        })
        .collect()
}

// ── Stats ──

pub struct Stats {
    pub memories: usize,
    pub documents: usize,
    pub candidates: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let memories: usize =
        conn.query_row("SELECT COUNT(DISTINCT memory_name) FROM documents", [], |r| r.get(0))?;
    let documents: usize = conn.query_row("SELECT COUNT(*) FROM documents", [], |r| r.get(0))?;
    let candidates: usize = conn.query_row(
        "SELECT COUNT(DISTINCT candidate) FROM documents WHERE candidate IS NOT NULL",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        memories,
        documents,
        candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Work;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn resume(name: &str) -> Resume {
        let mut r = Resume::default();
        r.header.name = name.to_string();
        r.work.push(Work {
            company: "Acme".into(),
            ..Work::default()
        });
        r
    }

    #[test]
    fn save_and_fetch() {
        let conn = open();
        let mut doc = DocumentRow::markdown("mem", "jane.md", "# Jane".into(), resume("Jane"));
        doc.description = Some("Résumé".into());
        save_document(&conn, &doc).unwrap();

        let stored = fetch_document(&conn, "mem", "jane.md").unwrap();
        assert_eq!(stored.resume, doc.resume);
        assert_eq!(stored.markdown, "# Jane");
        assert_eq!(stored.content_type, "text/markdown");
        assert_eq!(stored.description.as_deref(), Some("Résumé"));
    }

    #[test]
    fn upsert_replaces_same_name() {
        let conn = open();
        let first = save_document(&conn, &DocumentRow::markdown("mem", "cv.md", "v1".into(), resume("A"))).unwrap();
        let second = save_document(&conn, &DocumentRow::markdown("mem", "cv.md", "v2".into(), resume("B"))).unwrap();
        assert_eq!(first, second);

        let stored = fetch_document(&conn, "mem", "cv.md").unwrap();
        assert_eq!(stored.markdown, "v2");
        assert_eq!(stored.resume.header.name, "B");
        assert_eq!(get_stats(&conn).unwrap().documents, 1);
    }

    #[test]
    fn missing_document() {
        let conn = open();
        assert!(matches!(
            fetch_document(&conn, "mem", "nope.md"),
            Err(Error::DocumentNotFound { .. })
        ));
    }

    #[test]
    fn list_scoped_to_memory() {
        let conn = open();
        save_document(&conn, &DocumentRow::markdown("mem", "b.md", String::new(), resume("B"))).unwrap();
        save_document(&conn, &DocumentRow::markdown("mem", "a.md", String::new(), resume(""))).unwrap();
        save_document(&conn, &DocumentRow::markdown("other", "c.md", String::new(), resume("C"))).unwrap();

        let docs = list_documents(&conn, "mem").unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.document_name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
        assert_eq!(docs[0].candidate, "");
        assert_eq!(docs[1].work, 1);

        let stats = get_stats(&conn).unwrap();
        assert_eq!(stats.memories, 2);
        assert_eq!(stats.documents, 3);
        assert_eq!(stats.candidates, 2);
    }
}
