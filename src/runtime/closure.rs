use std::sync::Arc;

use crate::runtime::{compiled_function::CompiledFunction, object::Object};

/// `Arc`, not `Rc`: a closure can be handed to `spawn` and run on another
/// activity's thread, so it (and the values it closes over) must be `Send`.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub function: Arc<CompiledFunction>,
    pub free: Vec<Object>,
}

impl Closure {
    pub fn new(function: Arc<CompiledFunction>, free: Vec<Object>) -> Self {
        Self { function, free }
    }
}
