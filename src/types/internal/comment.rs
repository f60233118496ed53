/// Fields required to insert a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub message: String,
    pub master_id: i32,
    pub request_id: i32,
}

/// Which comments a listing may return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentScope {
    All,
    /// Only comments attached to one of these requests
    Requests(Vec<i32>),
}
