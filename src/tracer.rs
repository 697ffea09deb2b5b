//! Thin tracing gate, not a logging framework: progress is reported with
//! direct `eprintln!` rather than a `log`/`tracing` dependency.
pub struct Tracer(bool);

impl Tracer {
    pub fn new(enabled: bool) -> Self {
        Self(enabled)
    }

    pub fn trace(&self, message: impl std::fmt::Display) {
        if self.0 {
            eprintln!("[trace] {}", message);
        }
    }
}
