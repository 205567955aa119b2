use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{EngineError, ResultEngine, Transaction, transactions};

use super::super::{Engine, with_tx};

/// Filters for listing ledger transactions.
///
/// The date range is inclusive on both ends. `admin` is only honored after a
/// server-side role re-check; for everyone else the listing stays scoped to
/// rows the caller participates in.
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    /// `Some(true)` restricts to rows sent by the caller, `Some(false)` to
    /// rows received; unset covers both.
    pub as_sender: Option<bool>,
    /// Caller-asserted admin visibility; verified before use.
    pub admin: bool,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Unlimited when unset.
    pub limit: Option<u64>,
    pub offset: u64,
}

fn validate_list_filter(filter: &TransactionListFilter) -> ResultEngine<()> {
    if let (Some(from), Some(to)) = (filter.date_from, filter.date_to)
        && from > to
    {
        return Err(EngineError::InvalidField(
            "invalid range: date_from must be <= date_to".to_string(),
        ));
    }
    Ok(())
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionListFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionListFilter) -> Self {
        if let Some(from) = filter.date_from {
            self = self.filter(transactions::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            self = self.filter(transactions::Column::Date.lte(to));
        }
        self
    }
}

impl Engine {
    /// Lists transactions visible to `user_id`, newest first.
    ///
    /// Ordering is `(date DESC, id DESC)` so same-day rows tie-break on
    /// insertion order. Pagination is plain `limit`/`offset` over that
    /// deterministic order.
    pub async fn get_transactions(
        &self,
        user_id: i64,
        filter: &TransactionListFilter,
    ) -> ResultEngine<Vec<Transaction>> {
        validate_list_filter(filter)?;

        with_tx!(self, |db_tx| {
            let admin = filter.admin && self.is_admin(&db_tx, user_id).await?;
            if filter.admin && !admin {
                tracing::warn!(
                    user_id,
                    "admin listing requested by non-admin; falling back to own rows"
                );
            }

            let mut query = transactions::Entity::find();
            if !admin {
                query = match filter.as_sender {
                    Some(true) => query.filter(transactions::Column::FromUserId.eq(user_id)),
                    Some(false) => query.filter(transactions::Column::ToUserId.eq(user_id)),
                    None => query.filter(
                        Condition::any()
                            .add(transactions::Column::FromUserId.eq(user_id))
                            .add(transactions::Column::ToUserId.eq(user_id)),
                    ),
                };
            }

            query = query
                .apply_tx_filters(filter)
                .order_by_desc(transactions::Column::Date)
                .order_by_desc(transactions::Column::Id);
            if let Some(limit) = filter.limit {
                query = query.limit(limit);
            }
            if filter.offset > 0 {
                query = query.offset(filter.offset);
            }

            let rows = query.all(&db_tx).await?;
            rows.into_iter().map(Transaction::try_from).collect()
        })
    }
}
