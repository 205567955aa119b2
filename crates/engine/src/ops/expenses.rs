use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{EngineError, Expense, ExpenseNewCmd, ResultEngine, expenses, validation};

use super::{Engine, with_tx};

impl Engine {
    /// Records an expense-book entry for the caller.
    ///
    /// Amount and date follow the same rules as ledger transactions.
    pub async fn add_expense(&self, cmd: ExpenseNewCmd) -> ResultEngine<i64> {
        let title = validation::require_name(&cmd.title, "expense")?;
        let amount = validation::parse_amount(&cmd.amount)?;
        let date = validation::parse_date(&cmd.date)?;
        let category = validation::optional_text(cmd.category.as_deref());

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, cmd.user_id, "owner").await?;

            let model = expenses::ActiveModel {
                id: ActiveValue::NotSet,
                user_id: ActiveValue::Set(cmd.user_id),
                title: ActiveValue::Set(title),
                amount_minor: ActiveValue::Set(amount.cents()),
                date: ActiveValue::Set(date),
                category: ActiveValue::Set(category),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let inserted = model.insert(&db_tx).await?;
            Ok(inserted.id)
        })
    }

    /// Lists the caller's expenses, newest first.
    pub async fn expenses(&self, user_id: i64) -> ResultEngine<Vec<Expense>> {
        with_tx!(self, |db_tx| {
            let rows = expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(user_id))
                .order_by_desc(expenses::Column::Date)
                .order_by_desc(expenses::Column::Id)
                .all(&db_tx)
                .await?;
            rows.into_iter().map(Expense::try_from).collect()
        })
    }

    /// Substring search over titles and categories of the caller's expenses.
    pub async fn search_expenses(&self, user_id: i64, query: &str) -> ResultEngine<Vec<Expense>> {
        let needle = query.trim();
        if needle.is_empty() {
            return Err(EngineError::InvalidField(
                "search query must not be empty".to_string(),
            ));
        }
        let pattern = format!("%{needle}%");

        with_tx!(self, |db_tx| {
            let rows = expenses::Entity::find()
                .filter(expenses::Column::UserId.eq(user_id))
                .filter(
                    Condition::any()
                        .add(expenses::Column::Title.like(pattern.as_str()))
                        .add(expenses::Column::Category.like(pattern.as_str())),
                )
                .order_by_desc(expenses::Column::Date)
                .order_by_desc(expenses::Column::Id)
                .all(&db_tx)
                .await?;
            rows.into_iter().map(Expense::try_from).collect()
        })
    }

    /// Removes one expense if it belongs to the caller; idempotent.
    pub async fn delete_expense(&self, user_id: i64, expense_id: i64) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_many()
                .filter(expenses::Column::Id.eq(expense_id))
                .filter(expenses::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            Ok(result.rows_affected)
        })
    }

    /// Removes every expense of the caller, returning the count.
    pub async fn clear_expenses(&self, user_id: i64) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            let result = expenses::Entity::delete_many()
                .filter(expenses::Column::UserId.eq(user_id))
                .exec(&db_tx)
                .await?;
            Ok(result.rows_affected)
        })
    }
}
