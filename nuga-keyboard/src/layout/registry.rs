// Template registry
// Central registry for looking up layout templates by model

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use super::template::{Template, TemplateError};
use crate::model::Model;

const BUILTIN_TEMPLATES: &[&str] = &[
    include_str!("templates/halo75.json"),
    include_str!("templates/halo65.json"),
];

/// Anything that can hand out a layout template for a model
pub trait TemplateSource {
    /// Template for `model`, or `None` when the model has no known layout
    fn template(&self, model: &Model) -> Option<Arc<Template>>;
}

/// Registry of layout templates, one per model
#[derive(Default)]
pub struct TemplateRegistry {
    by_model: HashMap<Model, Arc<Template>>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with builtin templates pre-loaded
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.load_builtins();
        registry
    }

    /// Load all builtin templates
    pub fn load_builtins(&mut self) {
        for json in BUILTIN_TEMPLATES {
            match Template::from_json(json) {
                Ok(template) => self.register(template),
                // Builtins are checked by the tests below
                Err(e) => warn!("Skipping invalid builtin template: {e}"),
            }
        }
    }

    /// Register a template, replacing any previous one for the same model
    pub fn register(&mut self, template: Template) {
        debug!(
            "Registered template for {} ({} keys)",
            template.model(),
            template.len()
        );
        self.by_model
            .insert(template.model().clone(), Arc::new(template));
    }

    /// Find the template of a model
    pub fn get(&self, model: &Model) -> Option<Arc<Template>> {
        self.by_model.get(model).cloned()
    }

    /// All models with a template
    pub fn models(&self) -> Vec<Model> {
        let mut models: Vec<_> = self.by_model.keys().cloned().collect();
        models.sort();
        models
    }

    pub fn len(&self) -> usize {
        self.by_model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_model.is_empty()
    }

    /// Load a template from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), TemplateError> {
        let template = Template::load_from_file(path)?;
        self.register(template);
        Ok(())
    }

    /// Load all JSON templates from a directory
    ///
    /// Files that fail to load are skipped with a warning.
    pub fn load_from_directory<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize, TemplateError> {
        let mut count = 0;
        for entry in std::fs::read_dir(dir.as_ref())? {
            let path = entry?.path();

            if path.extension().map(|e| e == "json").unwrap_or(false) {
                match self.load_from_file(&path) {
                    Ok(()) => count += 1,
                    Err(e) => {
                        warn!("Failed to load template from {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(count)
    }
}

impl TemplateSource for TemplateRegistry {
    fn template(&self, model: &Model) -> Option<Arc<Template>> {
        self.get(model)
    }
}

/// Global template registry singleton
static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();

/// Get the global template registry
/// Initializes with builtin templates on first access
pub fn template_registry() -> &'static TemplateRegistry {
    REGISTRY.get_or_init(TemplateRegistry::with_builtins)
}
