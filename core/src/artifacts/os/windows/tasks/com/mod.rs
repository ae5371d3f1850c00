mod scheduler;
mod session;
mod variant;

pub(crate) use scheduler::ComTaskService;
