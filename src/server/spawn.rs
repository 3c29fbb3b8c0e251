use std::io;
use std::thread;

/// Work handed to a [`Spawner`]: one connection, served to completion.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Decides where connection handlers run.
pub trait Spawner: Send + Sync {
    fn spawn(&self, job: Job) -> io::Result<()>;
}

/// One detached OS thread per job. Nothing waits for the threads.
///
/// The spawning thread's tracing dispatcher is carried into the new thread so
/// handler logs reach the same subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPerConnection;

impl Spawner for ThreadPerConnection {
    fn spawn(&self, job: Job) -> io::Result<()> {
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        thread::Builder::new()
            .name("handler".to_string())
            .spawn(move || tracing::dispatcher::with_default(&dispatch, job))?;

        Ok(())
    }
}
