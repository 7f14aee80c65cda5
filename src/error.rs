//! Errors raised by the planning core

/// Catalog integrity failures. Each one aborts the whole planning call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// A goal or ingredient has no catalog entry.
    #[error("unknown item '{name}'")]
    UnknownItem { name: String },

    /// A recipe references an ingredient that is not in the catalog.
    #[error("'{item}' needs '{ingredient}', which is not in the catalog")]
    DanglingIngredient { item: String, ingredient: String },

    /// The recipe graph loops back on itself.
    #[error("recipe cycle: {}", path.join(" -> "))]
    CyclicRecipe { path: Vec<String> },

    /// No fabricator could be chosen for the item's class.
    #[error("no fabricator for '{item}' (class '{class}')")]
    UnresolvedFabricator { item: String, class: String },

    /// A fabricator would produce nothing per minute.
    #[error("'{item}' has no usable throughput in '{fabricator}'")]
    ZeroThroughput { item: String, fabricator: String },

    /// Goal rates must be finite and non-negative.
    #[error("invalid rate {rate} for '{item}'")]
    InvalidRate { item: String, rate: f64 },
}

pub type Result<T> = std::result::Result<T, PlanError>;
