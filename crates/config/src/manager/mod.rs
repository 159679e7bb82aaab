//! Per-schema configuration loading, caching, and reload notification.
//!
//! Responsibilities:
//! - Run the load pipeline for a `Settings` type and cache one instance per type.
//! - Serialize loads and reloads of the same type with a reentrant lock.
//! - Invoke reload callbacks with each new instance.
//! - Expose diagnose, example, docs, and explain entry points per type.
//!
//! Does NOT handle:
//! - Parsing env files or validating values (see `loader` and `schema`).
//!
//! Invariants:
//! - Different settings types never share a lock.
//! - A failed load or reload leaves no instance cached for that type.
//! - Cached instances are shared immutably; reload replaces, never mutates.

mod instance;
mod options;
mod resolve;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use crate::loader::{ConfigError, EnvSource};
use crate::report::{Diagnosis, Explanation, explain, write_docs, write_example};

pub use instance::{ConfigInstance, Settings};
pub use options::LoadOptions;
pub use resolve::{Resolved, resolve};

type Shared = Arc<dyn Any + Send + Sync>;
type ReloadCallback<S> = Arc<dyn Fn(&Arc<ConfigInstance<S>>) + Send + Sync>;

/// Owns cached instances, locks, and reload callbacks keyed by settings type.
#[derive(Default)]
pub struct ConfigManager {
    instances: RwLock<HashMap<TypeId, Shared>>,
    locks: Mutex<HashMap<TypeId, Arc<ReentrantMutex<()>>>>,
    callbacks: Mutex<HashMap<TypeId, Vec<Shared>>>,
    last_options: Mutex<HashMap<TypeId, LoadOptions>>,
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("cached", &self.instances.read().len())
            .finish()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for<S: Settings>(&self) -> Arc<ReentrantMutex<()>> {
        self.locks
            .lock()
            .entry(TypeId::of::<S>())
            .or_insert_with(|| Arc::new(ReentrantMutex::new(())))
            .clone()
    }

    /// The cached instance for `S`, if one exists.
    ///
    /// Does not wait for an in-flight load or reload; during a reload this
    /// returns the previous instance until the new one is swapped in.
    pub fn cached<S: Settings>(&self) -> Option<Arc<ConfigInstance<S>>> {
        self.instances
            .read()
            .get(&TypeId::of::<S>())
            .cloned()
            .and_then(|shared| shared.downcast::<ConfigInstance<S>>().ok())
    }

    /// Load `S`, returning the cached instance when `options.cache` allows it.
    pub fn load<S: Settings>(
        &self,
        options: &LoadOptions,
    ) -> Result<Arc<ConfigInstance<S>>, ConfigError> {
        if options.cache
            && let Some(instance) = self.cached::<S>()
        {
            return Ok(instance);
        }

        let lock = self.lock_for::<S>();
        let _guard = lock.lock();
        if options.cache
            && let Some(instance) = self.cached::<S>()
        {
            return Ok(instance);
        }

        let instance = self.build::<S>(options)?;
        if options.cache {
            self.instances
                .write()
                .insert(TypeId::of::<S>(), instance.clone());
        }
        Ok(instance)
    }

    /// Run the pipeline for `S` and remember `options` for later reloads.
    fn build<S: Settings>(
        &self,
        options: &LoadOptions,
    ) -> Result<Arc<ConfigInstance<S>>, ConfigError> {
        let schema = S::schema();
        let resolved = resolve(&schema, options)?;
        let settings: S = serde_json::from_value(resolved.validated.values.clone()).map_err(
            |e| ConfigError::Deserialize {
                schema: schema.name.clone(),
                source: e,
            },
        )?;
        let instance = Arc::new(ConfigInstance::new(
            settings,
            resolved.pool.sources().clone(),
            resolved.source_report(),
        ));
        self.last_options
            .lock()
            .insert(TypeId::of::<S>(), options.clone());

        tracing::info!(
            schema = %schema.name,
            keys = resolved.pool.len(),
            env = options.env.as_deref().unwrap_or("-"),
            "Loaded configuration"
        );
        if options.show_sources {
            println!("{}", instance.source_report());
        }
        Ok(instance)
    }

    /// Load `S` again, swap it into the cache, and notify reload callbacks.
    ///
    /// Uses the options of the last successful load of `S`, with caching on.
    /// The previous instance stays cached until the new one replaces it; a
    /// failed reload removes it.
    pub fn reload<S: Settings>(&self) -> Result<Arc<ConfigInstance<S>>, ConfigError> {
        let lock = self.lock_for::<S>();
        let _guard = lock.lock();

        let options = self
            .last_options
            .lock()
            .get(&TypeId::of::<S>())
            .cloned()
            .unwrap_or_default()
            .cache(true);

        let instance = match self.build::<S>(&options) {
            Ok(instance) => instance,
            Err(e) => {
                self.instances.write().remove(&TypeId::of::<S>());
                return Err(e);
            }
        };
        self.instances
            .write()
            .insert(TypeId::of::<S>(), instance.clone());
        tracing::info!(schema = %S::schema().name, "Reloaded configuration");

        let callbacks: Vec<ReloadCallback<S>> = self
            .callbacks
            .lock()
            .get(&TypeId::of::<S>())
            .map(|list| {
                list.iter()
                    .filter_map(|shared| shared.downcast_ref::<ReloadCallback<S>>().cloned())
                    .collect()
            })
            .unwrap_or_default();
        for callback in callbacks {
            callback(&instance);
        }
        Ok(instance)
    }

    /// Register `callback` to run after every successful `reload::<S>()`.
    pub fn on_reload<S, F>(&self, callback: F)
    where
        S: Settings,
        F: Fn(&Arc<ConfigInstance<S>>) + Send + Sync + 'static,
    {
        let callback: ReloadCallback<S> = Arc::new(callback);
        self.callbacks
            .lock()
            .entry(TypeId::of::<S>())
            .or_default()
            .push(Arc::new(callback));
    }

    /// Forget every cached instance, callback, and remembered option set.
    pub fn clear(&self) {
        self.instances.write().clear();
        self.callbacks.lock().clear();
        self.last_options.lock().clear();
    }

    /// Print a checklist of `S`'s fields against the process environment.
    pub fn diagnose<S: Settings>(&self) -> bool {
        let diagnosis = Diagnosis::run(&S::schema(), &EnvSource::process());
        println!("{}", diagnosis);
        diagnosis.is_valid()
    }

    /// Write the env template for `S` to `path`.
    pub fn generate_example<S: Settings>(&self, path: &Path) -> Result<(), ConfigError> {
        write_example(&S::schema(), path).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!("✓ Generated {}", path.display());
        Ok(())
    }

    /// Write Markdown documentation for `S` to `path`.
    pub fn generate_docs<S: Settings>(&self, path: &Path) -> Result<(), ConfigError> {
        write_docs(&S::schema(), path).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!("✓ Generated {}", path.display());
        Ok(())
    }

    /// Describe one field of `S` by flattened name, ignoring case.
    pub fn explain<S: Settings>(&self, name: &str) -> Option<Explanation> {
        explain(&S::schema(), name)
    }
}
