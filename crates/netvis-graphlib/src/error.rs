#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown node: {id}")]
    UnknownNode { id: String },

    #[error("unknown edge: {id}")]
    UnknownEdge { id: String },

    #[error("node already exists: {id}")]
    DuplicateNode { id: String },

    #[error("edge already exists: {id}")]
    DuplicateEdge { id: String },

    #[error("edge {edge_id} references a missing node: {node_id}")]
    MissingEndpoint { edge_id: String, node_id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
