use std::io::{self, BufRead};

use piptag_flasher::operator::{Operator, PromptResponse};

/// Reads operator answers from stdin. The prompt text itself is rendered by
/// the active reporter, so this only consumes the answer lines.
pub struct StdinOperator;

impl StdinOperator {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        let n = io::stdin().lock().read_line(&mut line)?;
        if n == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line)
    }
}

impl Operator for StdinOperator {
    fn confirm_device(&mut self, _index: u32) -> io::Result<PromptResponse> {
        let line = self.read_line()?;
        if line.trim() == "s" {
            Ok(PromptResponse::Skip)
        } else {
            Ok(PromptResponse::Continue)
        }
    }

    fn acknowledge_failure(&mut self) -> io::Result<()> {
        self.read_line().map(|_| ())
    }
}
