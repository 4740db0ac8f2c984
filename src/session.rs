//! The working state of one invocation: the resume, the chosen theme and whether
//! the preview is shown, loaded from and saved back to a [`KeyValueStore`].

use crate::document::ResumeDocument;
use crate::store::{KeyValueStore, StoreError};
use crate::themes::{Theme, ThemeRegistry, DEFAULT_THEME};

pub const RESUME_DATA_KEY: &str = "resumeData";
pub const THEME_NAME_KEY: &str = "resumeThemeName";
pub const SHOW_PREVIEW_KEY: &str = "showResumePreview";

pub struct Session<S: KeyValueStore> {
    store: S,
    registry: ThemeRegistry,
    document: ResumeDocument,
    theme_name: String,
    show_preview: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads state from `store`, falling back to defaults for anything missing or
    /// unreadable. Nothing is written back until the first change.
    pub fn load(store: S, registry: ThemeRegistry) -> Session<S> {
        let document = match store.get(RESUME_DATA_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::error!(error = %e, "failed to parse {RESUME_DATA_KEY} from store");
                ResumeDocument::default()
            }),
            None => ResumeDocument::default(),
        };

        let saved_theme = store
            .get(THEME_NAME_KEY)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_THEME.to_string());
        let theme_name = registry.resolve(&saved_theme).name.clone();

        let show_preview = match store.get(SHOW_PREVIEW_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to parse {SHOW_PREVIEW_KEY} from store");
                true
            }),
            None => true,
        };

        Session {
            store,
            registry,
            document,
            theme_name,
            show_preview,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn theme(&self) -> &Theme {
        self.registry.resolve(&self.theme_name)
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    /// Applies `change` to the document and persists the result.
    pub fn update<R, F: FnOnce(&mut ResumeDocument) -> R>(
        &mut self,
        change: F,
    ) -> Result<R, StoreError> {
        let result = change(&mut self.document);
        self.save_document()?;
        Ok(result)
    }

    /// Replaces the whole document, e.g. from an import. The new document is
    /// normalised first; returns how many fields that changed.
    pub fn replace_document(&mut self, mut document: ResumeDocument) -> Result<usize, StoreError> {
        let fixed = document.normalize();
        self.document = document;
        self.save_document()?;
        Ok(fixed)
    }

    /// Selects a theme by name, persisting whichever theme the name resolves to.
    pub fn set_theme(&mut self, name: &str) -> Result<&Theme, StoreError> {
        let resolved = self.registry.resolve(name).name.clone();
        self.store.set(THEME_NAME_KEY, resolved.clone())?;
        self.theme_name = resolved;
        Ok(self.theme())
    }

    pub fn set_show_preview(&mut self, show: bool) -> Result<(), StoreError> {
        self.store
            .set(SHOW_PREVIEW_KEY, serde_json::to_string(&show)?)?;
        self.show_preview = show;
        Ok(())
    }

    /// Back to the empty template. The theme choice is kept.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.document = ResumeDocument::default();
        self.store.remove(RESUME_DATA_KEY)
    }

    fn save_document(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.document)?;
        self.store.set(RESUME_DATA_KEY, json)
    }
}
