use crate::config::ApiConfig;
use crate::errors::Result;
use crate::source::{DataSource, FixtureSource, HttpSource};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

pub type SourceConstructor =
    Arc<dyn Fn(&ApiConfig) -> Result<Box<dyn DataSource>> + Send + Sync>;

static SOURCE_REGISTRY: Lazy<RwLock<HashMap<String, SourceConstructor>>> = Lazy::new(|| {
    let mut builtin: HashMap<String, SourceConstructor> = HashMap::new();
    builtin.insert(
        FixtureSource::PLUGIN_NAME.to_string(),
        Arc::new(|config: &ApiConfig| -> Result<Box<dyn DataSource>> {
            Ok(Box::new(FixtureSource::new(config)?))
        }),
    );
    builtin.insert(
        HttpSource::PLUGIN_NAME.to_string(),
        Arc::new(|config: &ApiConfig| -> Result<Box<dyn DataSource>> {
            Ok(Box::new(HttpSource::new(config)?))
        }),
    );
    RwLock::new(builtin)
});

pub fn register_source_plugin<S: Into<String>>(name: S, constructor: SourceConstructor) {
    let name = name.into();
    let mut registry = SOURCE_REGISTRY
        .write()
        .expect("Source registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_source_plugin(name: &str) -> Option<SourceConstructor> {
    SOURCE_REGISTRY
        .read()
        .expect("Source registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_source_registry() {
    let registry = SOURCE_REGISTRY
        .read()
        .expect("Source registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No data source plugins registered.");
    } else {
        tracing::debug!("Registered data source plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
