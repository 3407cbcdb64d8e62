//! Orders service errors.

use paddock::{
    cart::CartError,
    orders::{OrderError, OrderStatus},
    settlement::SettlementError,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("could not allocate a unique order number")]
    OrderNumberExhausted,

    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("settlement failed")]
    Settlement(#[source] SettlementError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<OrderError> for OrdersServiceError {
    fn from(error: OrderError) -> Self {
        match error {
            OrderError::MissingField(field) => Self::MissingField(field),
            OrderError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            OrderError::UnknownValue(..) => Self::InvalidData,
        }
    }
}

impl From<SettlementError> for OrdersServiceError {
    fn from(error: SettlementError) -> Self {
        match error {
            SettlementError::EmptyCart => Self::EmptyCart,
            other => Self::Settlement(other),
        }
    }
}

impl From<CartError> for OrdersServiceError {
    fn from(error: CartError) -> Self {
        Self::Settlement(SettlementError::Cart(error))
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::RowNotFound => return Self::NotFound,
            Error::ColumnDecode { .. } => return Self::InvalidData,
            _ => {}
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settlement_is_empty_cart() {
        let error = OrdersServiceError::from(SettlementError::EmptyCart);

        assert!(matches!(error, OrdersServiceError::EmptyCart));
    }

    #[test]
    fn transition_errors_keep_both_statuses() {
        let error = OrdersServiceError::from(OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Cancelled,
        });

        assert_eq!(error.to_string(), "cannot move order from delivered to cancelled");
    }
}
