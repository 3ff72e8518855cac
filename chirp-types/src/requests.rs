use serde::{Deserialize, Serialize};

// Query and form shapes accepted by the HTTP routes. Every field the browser
// may omit is optional; the handlers decide what a missing value means.

/// GET /create?handle=..&text=..&media=..
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateTweetQuery {
    pub handle: Option<String>,
    pub text: Option<String>,
    pub media: Option<String>,
}

/// GET /display?handle=..
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DisplayQuery {
    pub handle: Option<String>,
}

/// POST /add form body
#[derive(Debug, Serialize, Deserialize)]
pub struct AddNameForm {
    pub name: String,
}
