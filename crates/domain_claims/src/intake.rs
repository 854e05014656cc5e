//! Document intake
//!
//! Claim documents are opaque descriptors. The workflow only ever looks at
//! how many there are; names and sizes exist for display.

use serde::{Deserialize, Serialize};

use core_kernel::DocumentId;

/// A document handed to the workbench
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub id: DocumentId,
    pub name: String,
    pub size_bytes: Option<u64>,
    pub media_type: Option<String>,
}

impl DocumentDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DocumentId::new_v7(),
            name: name.into(),
            size_bytes: None,
            media_type: None,
        }
    }

    pub fn with_size(mut self, size_bytes: u64) -> Self {
        self.size_bytes = Some(size_bytes);
        self
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }
}

/// What a run is started with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunInput {
    pub documents: Vec<DocumentDescriptor>,
    /// Free-form request text; carried along, never interpreted
    pub prompt: Option<String>,
}

impl RunInput {
    pub fn new(documents: Vec<DocumentDescriptor>) -> Self {
        Self {
            documents,
            prompt: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        self.prompt = if prompt.trim().is_empty() { None } else { Some(prompt) };
        self
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn has_documents(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Ordered queue of uploaded documents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentQueue {
    documents: Vec<DocumentDescriptor>,
}

impl DocumentQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends documents, returning how many were added
    pub fn add(&mut self, documents: impl IntoIterator<Item = DocumentDescriptor>) -> usize {
        let before = self.documents.len();
        self.documents.extend(documents);
        self.documents.len() - before
    }

    /// Removes the document at `index`; out-of-range indexes are ignored
    pub fn remove(&mut self, index: usize) -> Option<DocumentDescriptor> {
        if index < self.documents.len() {
            Some(self.documents.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[DocumentDescriptor] {
        &self.documents
    }

    /// Status line for the upload control
    pub fn summary(&self) -> String {
        if self.documents.is_empty() {
            "No files selected".to_string()
        } else {
            format!("{} file(s) selected", self.documents.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut queue = DocumentQueue::new();
        assert_eq!(queue.summary(), "No files selected");

        let added = queue.add(vec![
            DocumentDescriptor::new("acord-form.pdf"),
            DocumentDescriptor::new("rear-bumper.jpg"),
        ]);
        assert_eq!(added, 2);
        assert_eq!(queue.summary(), "2 file(s) selected");

        let removed = queue.remove(0).unwrap();
        assert_eq!(removed.name, "acord-form.pdf");
        assert_eq!(queue.documents()[0].name, "rear-bumper.jpg");
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut queue = DocumentQueue::new();
        queue.add(vec![DocumentDescriptor::new("a.pdf")]);
        assert!(queue.remove(5).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_add_nothing() {
        let mut queue = DocumentQueue::new();
        assert_eq!(queue.add(Vec::new()), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_blank_prompt_is_dropped() {
        let input = RunInput::new(vec![]).with_prompt("   ");
        assert!(input.prompt.is_none());
        assert!(!input.has_documents());

        let input = RunInput::new(vec![]).with_prompt("Process this claim");
        assert_eq!(input.prompt.as_deref(), Some("Process this claim"));
    }
}
