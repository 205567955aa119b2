//! Expense-book endpoints.

use api_types::{
    Envelope,
    expense::{ExpenseCreated, ExpenseDeleted, ExpenseNew, ExpenseSearch, ExpenseView},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use engine::{Expense, ExpenseNewCmd, User};

use crate::{ServerError, server::ServerState};

fn view(expense: Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        title: expense.title,
        amount: expense.amount.to_string(),
        date: expense.date,
        category: expense.category,
    }
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<Json<Envelope<ExpenseCreated>>, ServerError> {
    let mut cmd = ExpenseNewCmd::new(user.id, payload.title, payload.amount, payload.date);
    if let Some(category) = payload.category {
        cmd = cmd.category(category);
    }

    let id = state.engine.add_expense(cmd).await?;
    Ok(Json(Envelope::ok(ExpenseCreated { id })))
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<Vec<ExpenseView>>>, ServerError> {
    let expenses = state.engine.expenses(user.id).await?;
    Ok(Json(Envelope::ok(expenses.into_iter().map(view).collect())))
}

pub async fn search(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Query(payload): Query<ExpenseSearch>,
) -> Result<Json<Envelope<Vec<ExpenseView>>>, ServerError> {
    let hits = state.engine.search_expenses(user.id, &payload.query).await?;
    Ok(Json(Envelope::ok(hits.into_iter().map(view).collect())))
}

pub async fn remove(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Envelope<ExpenseDeleted>>, ServerError> {
    let deleted = state.engine.delete_expense(user.id, id).await?;
    Ok(Json(Envelope::ok(ExpenseDeleted { deleted })))
}

/// Empties the caller's expense book.
pub async fn clear(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Envelope<ExpenseDeleted>>, ServerError> {
    let deleted = state.engine.clear_expenses(user.id).await?;
    Ok(Json(Envelope::ok(ExpenseDeleted { deleted })))
}
