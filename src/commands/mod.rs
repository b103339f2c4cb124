use anyhow::Result;

#[derive(Debug, Clone, Default)]
pub struct Global {
    /// Print the run summary as JSON instead of a table
    pub json: bool,
}

pub trait Runnable {
    fn run(self, g: &Global) -> Result<()>;
}

pub mod report;

pub use report::Report;
