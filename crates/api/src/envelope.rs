//! Request envelope shared by the create and patch endpoints.
//!
//! Write bodies wrap the good in a `payload` object:
//!
//! ```json
//! { "payload": { "project_id": 1, "name": "Widget" } }
//! ```
//!
//! `Payload` (capitalised) is accepted too, for clients of the earlier API.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Payload<T> {
    #[serde(alias = "Payload")]
    pub payload: T,
}
