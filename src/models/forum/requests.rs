use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForumPostRequest {
    pub forum_id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateForumReplyRequest {
    pub post_id: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
}
