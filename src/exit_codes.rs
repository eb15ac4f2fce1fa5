//! Process exit codes, per the run/doctor/evaluate-gate contract.

/// Exit code constants for the formalchip CLI.
pub mod codes {
    /// Success - operation completed and its policy check passed.
    pub const SUCCESS: i32 = 0;

    /// `run` terminated somewhere other than `status = pass`.
    pub const RUN_NOT_PASS: i32 = 1;

    /// `doctor` reported at least one fatal finding, or `evaluate-gate`'s
    /// policy check did not pass.
    pub const CHECK_FAILED: i32 = 2;

    /// Config load failure, I/O error, or any other failure before a
    /// command could even attempt its policy check.
    pub const INTERNAL_ERROR: i32 = 1;
}
