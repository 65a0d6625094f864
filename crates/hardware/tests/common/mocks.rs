use mockall::mock;
use niosim_core::common::{CompileError, EmulatorFault};
use niosim_core::core::arch::RegisterFile;
use niosim_core::sim::{EmulatorObserver, Program};
use niosim_core::soc::Memory;
use std::sync::{Arc, Mutex};

mock! {
    pub Observer {}
    impl EmulatorObserver for Observer {
        fn on_compiled(&mut self, program: &Program);
        fn on_compile_failed(&mut self, error: &CompileError);
        fn on_step(&mut self, pc: u32, regs: &RegisterFile, memory: &Memory);
        fn on_fault(&mut self, fault: &EmulatorFault);
        fn on_reset(&mut self);
    }
}

/// One notification, as seen by [`Recorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Compiled(u32),
    CompileFailed(usize),
    Step(u32),
    Fault(EmulatorFault),
    Reset,
}

/// Observer that records every notification into a shared log.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub events: Arc<Mutex<Vec<Event>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl EmulatorObserver for Recorder {
    fn on_compiled(&mut self, program: &Program) {
        self.push(Event::Compiled(program.start_address));
    }

    fn on_compile_failed(&mut self, error: &CompileError) {
        self.push(Event::CompileFailed(error.line));
    }

    fn on_step(&mut self, pc: u32, _regs: &RegisterFile, _memory: &Memory) {
        self.push(Event::Step(pc));
    }

    fn on_fault(&mut self, fault: &EmulatorFault) {
        self.push(Event::Fault(fault.clone()));
    }

    fn on_reset(&mut self) {
        self.push(Event::Reset);
    }
}
