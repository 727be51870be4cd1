/// Error type returned by dispatcher endpoints
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
