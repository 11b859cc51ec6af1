use std::io;

/// Operator response to the per-tag attach prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptResponse {
    Continue,
    Skip,
}

/// Seam between the flashing loop and whoever drives it. The loop announces
/// prompts through `OperationEvent`s; these calls only block for the answer,
/// so tests can script a whole run.
pub trait Operator {
    /// Blocks until the operator confirms the tag is attached (or skips it).
    fn confirm_device(&mut self, index: u32) -> io::Result<PromptResponse>;

    /// Blocks after a failure banner until the operator wants to retry.
    fn acknowledge_failure(&mut self) -> io::Result<()>;
}
