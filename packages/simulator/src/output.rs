//! JSON-lines output for simulation results.

use std::io::{self, BufWriter, Write};

use crate::simulator::GameResult;

pub struct OutputWriter {
    writer: BufWriter<Box<dyn Write>>,
}

impl OutputWriter {
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(sink: Box<dyn Write>) -> Self {
        Self {
            writer: BufWriter::new(sink),
        }
    }

    pub fn write_game(&mut self, result: &GameResult) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(result)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(())
    }
}
