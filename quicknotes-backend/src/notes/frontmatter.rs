//! Parse and generate YAML frontmatter for notes.
//!
//! Every note file starts with a `---` delimited block holding `title`,
//! `tags` and `lastModified`, followed by the Markdown body.

use chrono::{DateTime, NaiveDateTime, Utc};
use quicknotes_types::{Note, PartialNote};
use serde::{Deserialize, Serialize};

use super::render::render_html;
use crate::error::{NotesError, NotesResult};

/// On-disk timestamp format (`YYYY-MM-DD HH:MM:SS`, UTC)
pub const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DELIMITER: &str = "---";

/// Frontmatter exactly as stored in the file
#[derive(Debug, Serialize, Deserialize)]
struct NoteFrontmatter {
    title: String,
    tags: Vec<String>,
    #[serde(rename = "lastModified")]
    last_modified: String,
}

/// Extract title, tags and timestamp without rendering the body
pub fn extract_metadata(path: &str, content: &str) -> NotesResult<PartialNote> {
    let (yaml, _) = split_frontmatter(path, content)?;
    parse_frontmatter(path, yaml)
}

/// Parse a complete note file, rendering its body to HTML
pub fn parse_note(path: &str, content: &str) -> NotesResult<Note> {
    let (yaml, body) = split_frontmatter(path, content)?;
    let meta = parse_frontmatter(path, yaml)?;

    Ok(Note {
        path: meta.path,
        title: meta.title,
        content: render_html(body),
        tags: meta.tags,
        last_modified: meta.last_modified,
    })
}

/// Render the full file content for a note
pub fn render_document(
    title: &str,
    content: &str,
    tags: &[String],
    last_modified: DateTime<Utc>,
) -> NotesResult<String> {
    let fm = NoteFrontmatter {
        title: title.to_string(),
        tags: tags.to_vec(),
        last_modified: last_modified.format(LAST_MODIFIED_FORMAT).to_string(),
    };
    let yaml = serde_yaml::to_string(&fm)
        .map_err(|e| NotesError::parse(title, format!("cannot serialize frontmatter: {}", e)))?;

    let body = content.trim_end();
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n\n{body}\n"))
}

/// Split content into (frontmatter_yaml, body). The opening delimiter must be the first line.
fn split_frontmatter<'a>(path: &str, content: &'a str) -> NotesResult<(&'a str, &'a str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if first.trim_end() == DELIMITER => {}
        _ => return Err(NotesError::parse(path, "missing frontmatter")),
    }

    let yaml_start = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let yaml = &content[yaml_start..offset];
            let body = content[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(NotesError::parse(path, "unterminated frontmatter"))
}

fn parse_frontmatter(path: &str, yaml: &str) -> NotesResult<PartialNote> {
    let fm: NoteFrontmatter =
        serde_yaml::from_str(yaml).map_err(|e| NotesError::parse(path, e.to_string()))?;

    let last_modified = NaiveDateTime::parse_from_str(fm.last_modified.trim(), LAST_MODIFIED_FORMAT)
        .map_err(|e| {
            NotesError::parse(
                path,
                format!(
                    "lastModified: {:?} is not in YYYY-MM-DD HH:MM:SS format ({})",
                    fm.last_modified, e
                ),
            )
        })?
        .and_utc();

    Ok(PartialNote {
        path: path.to_string(),
        title: fm.title,
        tags: fm.tags,
        last_modified,
    })
}
