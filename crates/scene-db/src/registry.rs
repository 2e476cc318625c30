//! Explicit plugin registry.
//!
//! The hosting application creates a `Registry` at startup and registers
//! each plugin it wants; nothing registers itself at load time.

use std::path::Path;
use std::sync::Arc;

use crate::{
    lower_case_file_extension, Node, Object, Options, PagedImage, ReadError, ReadResult,
    ReaderWriter,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionInfo {
    pub extension: &'static str,
    pub description: &'static str,
    pub plugin: String,
}

#[derive(Default, Clone)]
pub struct Registry {
    readers: Vec<Arc<dyn ReaderWriter>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, reader: Arc<dyn ReaderWriter>) {
        log::debug!("registered reader/writer {}", reader.class_name());
        self.readers.push(reader);
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }

    /// First registered reader accepting the extension of `path`.
    pub fn reader_for(&self, path: &Path) -> Option<&Arc<dyn ReaderWriter>> {
        let extension = lower_case_file_extension(path);
        self.readers.iter().find(|reader| reader.accepts_extension(&extension))
    }

    pub fn extensions(&self) -> Vec<ExtensionInfo> {
        self.readers
            .iter()
            .flat_map(|reader| {
                reader.supported_extensions().iter().map(|&(extension, description)| {
                    ExtensionInfo { extension, description, plugin: reader.class_name().to_owned() }
                })
            })
            .collect()
    }

    pub fn read_object(&self, path: &Path, options: &Options) -> ReadResult<Object> {
        self.reader_for(path).ok_or(ReadError::FileNotHandled)?.read_object(path, options)
    }

    pub fn read_image(&self, path: &Path, options: &Options) -> ReadResult<Box<dyn PagedImage>> {
        self.reader_for(path).ok_or(ReadError::FileNotHandled)?.read_image(path, options)
    }

    pub fn read_node(&self, path: &Path, options: &Options) -> ReadResult<Box<dyn Node>> {
        self.reader_for(path).ok_or(ReadError::FileNotHandled)?.read_node(path, options)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.readers.iter().map(|reader| reader.class_name())).finish()
    }
}
