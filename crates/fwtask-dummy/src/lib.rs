//! fwtask-dummy - Recording process runner for testing
//!
//! This crate provides a [`Runner`] that never launches anything. It records
//! every invocation it is given and can be told to fail a program or to
//! emulate a program's side effects (e.g. the JUnit converter writing its
//! report), so task bodies can be tested without the real toolchain.

use fwtask_core::error::{Error, Result};
use fwtask_core::runner::{Invocation, Runner};

type Effect = Box<dyn FnMut(&Invocation) -> Result<()>>;

/// Runner that records invocations instead of spawning processes
#[derive(Default)]
pub struct RecordingRunner {
    invocations: Vec<Invocation>,
    failures: Vec<(String, i32)>,
    effects: Vec<(String, Effect)>,
}

impl RecordingRunner {
    /// Create a runner where every program succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with `code`
    pub fn fail(mut self, program: &str, code: i32) -> Self {
        self.failures.push((program.to_string(), code));
        self
    }

    /// Run `effect` whenever `program` is invoked
    ///
    /// The effect runs before the invocation is judged; an error returned
    /// from it is returned from [`Runner::run`].
    pub fn on<F>(mut self, program: &str, effect: F) -> Self
    where
        F: FnMut(&Invocation) -> Result<()> + 'static,
    {
        self.effects.push((program.to_string(), Box::new(effect)));
        self
    }

    /// All recorded invocations, in order
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Recorded invocations of `program`
    pub fn invocations_of(&self, program: &str) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|inv| inv.is_program(program))
            .collect()
    }

    /// Program names in invocation order (file stems, `.exe` stripped)
    pub fn programs(&self) -> Vec<String> {
        self.invocations.iter().map(short_name).collect()
    }
}

fn short_name(inv: &Invocation) -> String {
    let name = inv.program_name();
    let name = name.rsplit(['/', '\\']).next().unwrap_or(&name).to_string();
    match name.strip_suffix(".exe") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

impl Runner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        log::debug!("recording: {}", invocation);
        self.invocations.push(invocation.clone());

        for (program, effect) in &mut self.effects {
            if invocation.is_program(program) {
                effect(invocation)?;
            }
        }

        if let Some((_, code)) = self
            .failures
            .iter()
            .find(|(program, _)| invocation.is_program(program))
        {
            return Err(Error::ToolFailed {
                program: invocation.program_name(),
                code: Some(*code),
            });
        }

        Ok(())
    }
}
