//! Fake binding generators standing in for the real one.

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;

use contract_bindgen::generator::Error;
use contract_bindgen::{BindingGenerator, GenerationJob};

/// Generator that always succeeds and writes a small marker file.
#[derive(Debug, Default)]
pub struct MarkerGenerator {
    calls: Cell<usize>,
    outputs: RefCell<Vec<PathBuf>>,
}

impl MarkerGenerator {
    /// Contents written for a given type name.
    pub fn marker(type_name: &str) -> String {
        format!("// marker bindings for {type_name}\n")
    }

    /// Number of times the generator ran.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Output files written so far, in call order.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.outputs.borrow().clone()
    }
}

impl BindingGenerator for MarkerGenerator {
    fn generate(&self, job: &GenerationJob<'_>) -> Result<(), Error> {
        self.calls.set(self.calls.get() + 1);
        fs::write(job.output_path, Self::marker(job.type_name)).map_err(|source| {
            Error::WriteOutput {
                path: job.output_path.display().to_string(),
                source,
            }
        })?;
        self.outputs.borrow_mut().push(job.output_path.to_path_buf());
        Ok(())
    }
}

/// Generator that always fails without writing anything.
#[derive(Debug, Default)]
pub struct FailingGenerator;

impl BindingGenerator for FailingGenerator {
    fn generate(&self, job: &GenerationJob<'_>) -> Result<(), Error> {
        Err(anyhow::anyhow!("rejected artifacts for {}", job.type_name).into())
    }
}
