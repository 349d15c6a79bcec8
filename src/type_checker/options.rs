/// Strictness switches for semantic analysis.
///
/// `Default` enables every check. [`CheckOptions::reference`] turns off the
/// checks the classic NanoScript analyzer never performed, for comparing
/// behaviour with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Validate call arguments against the callee's declared parameters and
    /// reject calls to variables.
    pub check_call_signatures: bool,
    /// Require numeric operands for unary `-` and bool operands for `and`/`or`.
    pub strict_operands: bool,
    /// Require `if` and `while` conditions to be `bool`.
    pub strict_conditions: bool,
}

impl CheckOptions {
    pub fn reference() -> Self {
        CheckOptions {
            check_call_signatures: false,
            strict_operands: false,
            strict_conditions: false,
        }
    }
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            check_call_signatures: true,
            strict_operands: true,
            strict_conditions: true,
        }
    }
}
