use tract_tensorflow::tract_core::internal::*;

/// A runnable plan bound to one typed graph, released when dropped.
pub struct ScopedSession {
    name: String,
    plan: TypedRunnableModel<TypedModel>,
}

impl ScopedSession {
    pub fn new(name: impl Into<String>, model: TypedModel) -> TractResult<ScopedSession> {
        let name = name.into();
        let plan = model.into_runnable()?;
        debug!("Opened {name} session");
        Ok(ScopedSession { name, plan })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn model(&self) -> &TypedModel {
        self.plan.model()
    }

    pub fn execute(&self, inputs: TVec<TValue>) -> TractResult<TVec<TValue>> {
        trace!("Running {} session", self.name);
        self.plan.run(inputs)
    }
}

impl Drop for ScopedSession {
    fn drop(&mut self) {
        debug!("Released {} session", self.name);
    }
}

impl std::fmt::Debug for ScopedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScopedSession {{ name: {}, nodes: {} }}", self.name, self.model().nodes().len())
    }
}
