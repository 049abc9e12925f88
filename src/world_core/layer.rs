/// A deterministic generation stage: the same input always yields the same output.
pub trait Layer<I, O> {
    fn generate(&self, input: I) -> O;
}
