pub mod osm_to_json;
pub mod parse_osm;

use std::fs;
use std::path::PathBuf;

use log::{info, error};

use crate::errors::Result;

/// Logs a failed phase with the ETL name and hands the result back untouched.
fn log_failure<T>(etl_name: &str, phase: &str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        error!(etl_name = etl_name, phase = phase, err = err.message.as_str(); "ETL phase failed");
    }
    result
}

/// Reads a source, reshapes it and writes a single output file. An existing output
/// file counts as a finished run.
pub trait Etl {
    type Input;
    type Output;

    fn etl_name(&self) -> &str;
    fn output_path(&self) -> PathBuf;

    fn extract(&mut self) -> Result<Self::Input>;
    fn transform(&mut self, input: Self::Input) -> Result<Self::Output>;
    /// Returns how many records were written.
    fn load(&mut self, output: Self::Output) -> Result<usize>;

    fn is_cached(&self) -> Result<bool> {
        Ok(self.output_path().try_exists()?)
    }

    fn clean(&self) -> Result<()> {
        if self.is_cached()? {
            fs::remove_file(self.output_path())?;
        }
        Ok(())
    }

    /// Runs all three phases unless the output is already there. Returns the number of
    /// records written, or `None` when the cached output was kept.
    fn process(&mut self) -> Result<Option<usize>> {
        let etl_name = self.etl_name().to_string();
        let output_path = self.output_path().display().to_string();
        info!(etl_name = etl_name.as_str(), output_path = output_path.as_str(); "Starting ETL process");

        if self.is_cached()? {
            info!(etl_name = etl_name.as_str(), output_path = output_path.as_str(); "Output exists, keeping it");
            return Ok(None);
        }

        let input = log_failure(&etl_name, "extract", self.extract())?;
        let output = log_failure(&etl_name, "transform", self.transform(input))?;
        let records_written = log_failure(&etl_name, "load", self.load(output))?;

        info!(
            etl_name = etl_name.as_str(),
            output_path = output_path.as_str(),
            records_written = records_written;
            "Process finished"
        );
        Ok(Some(records_written))
    }
}
