use thiserror::Error;

use crate::model::OpKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("operation {index} ({kind:?}) carries no lines")]
    EmptyBundle { index: usize, kind: OpKind },
}
