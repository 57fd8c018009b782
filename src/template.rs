//! Page background templates
//!
//! Templates are looked up by the name a page records (e.g. `"P Grid medium"`)
//! inside one configured directory. The directory is passed in explicitly;
//! nothing here reads global state.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::RendererResult;
use crate::image_utils::{self, ImageData};

/// Name the device uses for "no background".
pub const BLANK_TEMPLATE: &str = "Blank";

const TEMPLATE_EXTENSIONS: [&str; 2] = ["svg", "png"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResolver {
    dir: PathBuf,
}

impl TemplateResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the asset for `name`, if the page has a background and the
    /// asset exists. SVG wins over PNG when both are present.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let name = name.trim();
        if name.is_empty() || name == BLANK_TEMPLATE {
            return None;
        }
        TEMPLATE_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{}", name, ext)))
            .find(|path| path.exists())
    }
}

/// Loaded template artwork
pub struct Template {
    path: PathBuf,
    data: ImageData,
}

impl Template {
    pub fn load(path: &Path) -> RendererResult<Self> {
        let data = image_utils::load_image(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &ImageData {
        &self.data
    }

    pub fn width(&self) -> f64 {
        self.data.size().0
    }

    pub fn height(&self) -> f64 {
        self.data.size().1
    }
}

/// Templates already loaded during one render, keyed by resolved path.
#[derive(Default)]
pub struct TemplateCache {
    templates: HashMap<PathBuf, Template>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> RendererResult<&Template> {
        match self.templates.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(&*entry.into_mut()),
            Entry::Vacant(entry) => {
                debug!("Loading template {}", path.display());
                let template = Template::load(path)?;
                Ok(&*entry.insert(template))
            }
        }
    }
}
