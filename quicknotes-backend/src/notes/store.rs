//! NoteStore — flat-directory note storage
//!
//! Each note is one `<identifier>.md` file inside `notes_dir`. The store keeps
//! no state besides the directory path, so one instance is shared by all
//! request handlers.

use super::{file_ops, frontmatter};
use crate::error::{NotesError, NotesResult};
use chrono::{SubsecRound, Utc};
use quicknotes_types::{Note, NoteInput, PartialNote};
use std::io;
use std::path::{Path, PathBuf};

pub struct NoteStore {
    notes_dir: PathBuf,
}

impl NoteStore {
    /// Open a store, creating the notes directory if needed
    pub fn new(notes_dir: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&notes_dir)?;
        Ok(Self { notes_dir })
    }

    /// Get the notes directory path
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Identifiers of every note in the directory, sorted by file name
    pub fn list_ids(&self) -> NotesResult<Vec<String>> {
        file_ops::list_note_ids(&self.notes_dir).map_err(|e| {
            NotesError::io(
                format!("failed to list notes in {}", self.notes_dir.display()),
                e,
            )
        })
    }

    /// Raw file content of a note
    pub fn read(&self, id: &str) -> NotesResult<String> {
        let path = self.existing_path(id)?;
        file_ops::read_note(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => NotesError::NotFound(id.to_string()),
            _ => NotesError::io(format!("failed to read note {:?}", id), e),
        })
    }

    /// Metadata of a note, without rendering its body
    pub fn read_metadata(&self, id: &str) -> NotesResult<PartialNote> {
        let content = self.read(id)?;
        frontmatter::extract_metadata(id, &content)
    }

    /// A note with its body rendered to HTML
    pub fn get_note(&self, id: &str) -> NotesResult<Note> {
        let content = self.read(id)?;
        frontmatter::parse_note(id, &content)
    }

    /// Create a note named after its sanitized title.
    ///
    /// An existing note with the same identifier is overwritten.
    pub fn create_note(&self, input: &NoteInput) -> NotesResult<PartialNote> {
        let id = file_ops::sanitize_identifier(&input.title);
        if id.is_empty() || id.starts_with('.') {
            return Err(NotesError::Validation(format!(
                "title {:?} does not yield a usable file name",
                input.title
            )));
        }

        let path = file_ops::note_file_path(&self.notes_dir, &id);
        if path.exists() {
            log::warn!("[NOTES] Overwriting existing note {:?} on create", id);
        }

        let note = self.write(&id, &path, input)?;
        log::info!("[NOTES] Created note {:?}", id);
        Ok(note)
    }

    /// Rewrite an existing note with new title, content and tags.
    ///
    /// The identifier stays the same even if the title changes.
    pub fn update_note(&self, id: &str, input: &NoteInput) -> NotesResult<()> {
        let path = self.existing_path(id)?;
        if !path.is_file() {
            return Err(NotesError::NotFound(id.to_string()));
        }

        self.write(id, &path, input)?;
        log::info!("[NOTES] Updated note {:?}", id);
        Ok(())
    }

    fn write(&self, id: &str, path: &Path, input: &NoteInput) -> NotesResult<PartialNote> {
        let now = Utc::now().trunc_subsecs(0);
        let document = frontmatter::render_document(&input.title, &input.content, &input.tags, now)?;

        file_ops::write_note(path, &document)
            .map_err(|e| NotesError::io(format!("failed to write note {:?}", id), e))?;

        Ok(PartialNote {
            path: id.to_string(),
            title: input.title.clone(),
            tags: input.tags.clone(),
            last_modified: now,
        })
    }

    /// File path for an identifier supplied by a client
    fn existing_path(&self, id: &str) -> NotesResult<PathBuf> {
        if id.is_empty() {
            return Err(NotesError::Validation("path parameter is required".to_string()));
        }
        if !file_ops::is_valid_identifier(id) {
            return Err(NotesError::Validation(format!("invalid note path {:?}", id)));
        }
        Ok(file_ops::note_file_path(&self.notes_dir, id))
    }
}
