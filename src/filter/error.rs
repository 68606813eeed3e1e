use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Operator {operator} is not offered by column {column}")]
    OperatorNotOffered { column: String, operator: String },

    #[error("Invalid filter expression: {0}")]
    InvalidFilterExpr(String),

    #[error("Invalid sort expression: {0}")]
    InvalidSortExpr(String),
}
