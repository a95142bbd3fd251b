//! Mock engine for testing

use crate::{
    milp::MilpModel,
    ports::{EngineOutcome, MilpEngine, SolveBudget},
};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

type Responder = Box<dyn Fn(&MilpModel) -> EngineOutcome + Send + Sync>;

/// Engine answering from a closure and recording how it was called.
pub struct ScriptedEngine {
    respond: Responder,
    calls: AtomicUsize,
    last_budget: Mutex<Option<SolveBudget>>,
    last_model: Mutex<Option<MilpModel>>,
}

impl ScriptedEngine {
    pub fn new(outcome: EngineOutcome) -> Self {
        Self::with_responder(move |_| outcome.clone())
    }

    pub fn with_responder(
        respond: impl Fn(&MilpModel) -> EngineOutcome + Send + Sync + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            last_budget: Mutex::new(None),
            last_model: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_budget(&self) -> Option<SolveBudget> {
        *self.last_budget.lock().expect("budget lock poisoned")
    }

    pub fn last_model(&self) -> Option<MilpModel> {
        self.last_model.lock().expect("model lock poisoned").clone()
    }
}

impl MilpEngine for ScriptedEngine {
    fn solve(&self, model: &MilpModel, budget: SolveBudget) -> EngineOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_budget.lock().expect("budget lock poisoned") = Some(budget);
        *self.last_model.lock().expect("model lock poisoned") = Some(model.clone());
        (self.respond)(model)
    }
}
