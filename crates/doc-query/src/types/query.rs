//! Query request types

use serde::{Deserialize, Serialize};

/// JSON body for the URL-based query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// URL of the document to analyze
    pub documents: String,
    /// Questions to answer, in order; the i-th answer in the response
    /// corresponds to the i-th question here
    pub questions: Vec<String>,
}
