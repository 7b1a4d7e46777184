use std::io::Write;

/// Where a command sends its report and diagnostic output.
///
/// The real binary backs this with the process streams; tests substitute
/// in-memory buffers so report content can be asserted on.
pub trait Host: Send + Sync {
    /// Stream for the harvested report (e.g., stdout).
    fn output(&mut self) -> impl Write;

    /// Stream for diagnostics such as the skipped-item summary (e.g., stderr).
    fn error(&mut self) -> impl Write;
}

/// Test host that captures output to in-memory buffers
#[cfg(test)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
        }
    }

    pub fn output_text(&self) -> &str {
        core::str::from_utf8(&self.output_buf).expect("output is not UTF-8")
    }

    pub fn error_text(&self) -> &str {
        core::str::from_utf8(&self.error_buf).expect("error output is not UTF-8")
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        std::io::Cursor::new(&mut self.output_buf)
    }

    fn error(&mut self) -> impl Write {
        std::io::Cursor::new(&mut self.error_buf)
    }
}
