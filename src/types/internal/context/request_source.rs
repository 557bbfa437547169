/// Source of the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSource {
    /// Request originated from an API endpoint
    API,

    /// Request originated from a CLI command
    CLI,
}
