use std::sync::Arc;

use crate::embedding::Embedder;
use crate::store::TitleStore;
use crate::verify::VerificationEngine;

pub struct HandlerState<E: Embedder + 'static, S: TitleStore + 'static> {
    pub engine: Arc<VerificationEngine<E, S>>,
}

impl<E: Embedder, S: TitleStore> HandlerState<E, S> {
    pub fn new(engine: Arc<VerificationEngine<E, S>>) -> Self {
        Self { engine }
    }
}

// Manual impl: derive(Clone) would demand E: Clone and S: Clone.
impl<E: Embedder, S: TitleStore> Clone for HandlerState<E, S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
        }
    }
}
