use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::Envelope;
pub use server::{run, run_with_listener, spawn_with_listener};

mod balances;
mod categories;
mod contacts;
mod expenses;
mod server;
mod transactions;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{UserCreated, UserNew, UserView};
    }

    pub mod contact {
        pub use api_types::contact::{ContactCreated, ContactDeleted, ContactNew, ContactView};
    }

    pub mod category {
        pub use api_types::category::{
            CategoryCreated, CategoryDeleted, CategoryNew, CategoryView,
        };
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseCreated, ExpenseDeleted, ExpenseNew, ExpenseSearch, ExpenseView,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionCreated, TransactionDeleted, TransactionList, TransactionNew,
            TransactionUpdate, TransactionView,
        };
    }

    pub mod balance {
        pub use api_types::balance::{BalanceBreakdownView, BalanceView, ContactBalanceView};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidField(_)
        | EngineError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Envelope::<()>::err(error))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
