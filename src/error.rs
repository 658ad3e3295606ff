use crate::GroupPath;

/// Misuse of the declaration stack or of group paths.
///
/// These never describe an example outcome. They mean the suite itself was
/// driven incorrectly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuiteError {
    #[error("the suite scope cannot be popped off the declaration stack")]
    StackUnderflow,

    #[error("`{operation}` needs an enclosing `describe`")]
    NoCurrentGroup { operation: &'static str },

    #[error("no example group at path {0}")]
    UnknownGroup(GroupPath),
}
