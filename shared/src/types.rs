use serde::{Deserialize, Serialize};

/// Generates an identifier for a freshly created record. Ids are opaque
/// strings everywhere: in Mongo's `_id`, in path parameters, and in JSON
/// responses.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ========== BOARD ==========
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    #[serde(default)]
    pub title: String,
}

// ========== LINE ==========
// Modeled but has no handlers yet; the `lines` collection is reserved for
// the drawing feature.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Line {
    #[serde(rename = "_id")]
    pub id: String,
    pub board_id: String,
    pub x1: i64,
    pub x2: i64,
    pub y1: i64,
    pub y2: i64,
}

// ========== POSTIT ==========
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Coords {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct Size {
    pub w: i64,
    pub h: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Postit {
    #[serde(rename = "_id")]
    pub id: String,
    pub board_id: String,
    pub title: String,
    pub coords: Coords,
    pub size: Size,
    #[serde(default)]
    pub angle: i64,
    pub color: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostitRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub coords: Coords,
    #[serde(default)]
    pub size: Size,
    #[serde(default)]
    pub angle: i64,
    #[serde(default)]
    pub color: String,
}

// ========== SIGN-IN ==========
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub assertion: String,
}

/// Body returned by the remote identity verification endpoint.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VerifierResponse {
    pub status: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub expires: Option<i64>,
}

impl VerifierResponse {
    /// The verifier vouches for the assertion only when it reports the
    /// literal status "okay" and names the verified email.
    pub fn okay(&self) -> bool {
        self.status == "okay" && !self.email.is_empty()
    }
}
