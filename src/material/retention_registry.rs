use super::{allocate_liquid_retention, LiquidRetention};
use crate::base::ParamLiquidRetention;
use crate::StrError;
use std::collections::HashMap;
use std::sync::Arc;

/// Defines a function that allocates a liquid retention model
pub type RetentionAllocator = fn(&ParamLiquidRetention) -> Result<Arc<dyn LiquidRetention>, StrError>;

/// Holds the available liquid retention models and the allocated instances
///
/// The allocated models are cached by the key `"{sim_key}_{mat_name}_{model_name}"`,
/// thus all elements of a material in a simulation share the same (immutable) model.
pub struct RetentionRegistry {
    /// Maps the model name to its allocator
    allocators: HashMap<&'static str, RetentionAllocator>,

    /// Holds the allocated models
    models: HashMap<String, Arc<dyn LiquidRetention>>,
}

fn allocate_linear(param: &ParamLiquidRetention) -> Result<Arc<dyn LiquidRetention>, StrError> {
    match param {
        ParamLiquidRetention::Linear { .. } => allocate_liquid_retention(param),
        _ => Err("parameters do not correspond to the linear retention model"),
    }
}

fn allocate_brooks_corey(param: &ParamLiquidRetention) -> Result<Arc<dyn LiquidRetention>, StrError> {
    match param {
        ParamLiquidRetention::BrooksCorey { .. } => allocate_liquid_retention(param),
        _ => Err("parameters do not correspond to the Brooks-Corey retention model"),
    }
}

fn allocate_van_genuchten(param: &ParamLiquidRetention) -> Result<Arc<dyn LiquidRetention>, StrError> {
    match param {
        ParamLiquidRetention::VanGenuchten { .. } => allocate_liquid_retention(param),
        _ => Err("parameters do not correspond to the van Genuchten retention model"),
    }
}

fn allocate_pedroso_zhang_ehlers(param: &ParamLiquidRetention) -> Result<Arc<dyn LiquidRetention>, StrError> {
    match param {
        ParamLiquidRetention::PedrosoZhangEhlers { .. } => allocate_liquid_retention(param),
        _ => Err("parameters do not correspond to the Pedroso-Zhang-Ehlers retention model"),
    }
}

impl RetentionRegistry {
    /// Allocates a new instance with all built-in models
    pub fn new() -> Self {
        let mut allocators: HashMap<&'static str, RetentionAllocator> = HashMap::new();
        allocators.insert("lin", allocate_linear);
        allocators.insert("bc", allocate_brooks_corey);
        allocators.insert("vg", allocate_van_genuchten);
        allocators.insert("pze", allocate_pedroso_zhang_ehlers);
        RetentionRegistry {
            allocators,
            models: HashMap::new(),
        }
    }

    /// Registers (or replaces) an allocator
    pub fn register(&mut self, model_name: &'static str, allocator: RetentionAllocator) {
        self.allocators.insert(model_name, allocator);
    }

    /// Returns a model, allocating it if necessary
    ///
    /// # Input
    ///
    /// * `sim_key` -- Identifies the simulation
    /// * `mat_name` -- Identifies the material
    /// * `model_name` -- Name of the model in the registry (e.g., "bc")
    /// * `param` -- Parameters of the model
    /// * `get_new` -- Allocates a new model even if there is a cached one; the new model is not cached
    ///
    /// # Output
    ///
    /// Returns `None` if `model_name` is not available
    pub fn get_model(
        &mut self,
        sim_key: &str,
        mat_name: &str,
        model_name: &str,
        param: &ParamLiquidRetention,
        get_new: bool,
    ) -> Result<Option<Arc<dyn LiquidRetention>>, StrError> {
        let allocator = match self.allocators.get(model_name) {
            Some(a) => *a,
            None => return Ok(None),
        };
        let key = format!("{}_{}_{}", sim_key, mat_name, model_name);
        if get_new {
            return Ok(Some(allocator(param)?));
        }
        if let Some(model) = self.models.get(&key) {
            return Ok(Some(model.clone()));
        }
        let model = allocator(param)?;
        self.models.insert(key, model.clone());
        Ok(Some(model))
    }

    /// Returns the names of the available models (sorted)
    pub fn available(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.allocators.keys().copied().collect();
        names.sort();
        names
    }

    /// Returns the keys of the allocated models (sorted)
    pub fn allocated(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.models.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Logs the available models and the allocated keys
    pub fn log_models(&self) {
        log::info!("available retention models: {}", self.available().join(", "));
        log::info!("allocated retention models: {}", self.allocated().join(", "));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
