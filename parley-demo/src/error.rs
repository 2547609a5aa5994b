use parley::{DefinitionError, ParserFinished};

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("the demo tool was declared incorrectly")]
    Definition(#[from] DefinitionError),

    #[error("parser was used after it finished")]
    Finished(#[from] ParserFinished),

    #[error("couldn't write the error report")]
    Report(#[from] std::io::Error),
}
