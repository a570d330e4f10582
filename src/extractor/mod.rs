pub mod json;
pub mod path;
pub mod validated;

/// Gives access to the value an extractor pulled out of the request.
pub trait Extractor {
    type Extracted;

    fn extracted(&self) -> &Self::Extracted;
}
