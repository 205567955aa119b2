use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, TransactionTrait};

use crate::{
    EngineError, ResultEngine, Transaction, TransactionNewCmd, TransactionUpdateCmd, transactions,
    validation,
};

use super::super::{Engine, with_tx};

impl Engine {
    /// Records a directed money movement between two users.
    ///
    /// Preconditions are checked fail-fast, in order: field shape, distinct
    /// operands, both users exist, contact owned by the sender. The row is
    /// only written when everything holds.
    pub async fn add_transaction(&self, cmd: TransactionNewCmd) -> ResultEngine<i64> {
        let kind = validation::parse_kind(&cmd.kind)?;
        let amount = validation::parse_amount(&cmd.amount)?;
        let date = validation::parse_date(&cmd.date)?;
        let description = validation::optional_text(cmd.description.as_deref());

        if cmd.from_user_id == cmd.to_user_id {
            tracing::warn!(
                user_id = cmd.from_user_id,
                "add_transaction rejected: sender and receiver are the same user"
            );
            return Err(EngineError::InvalidReference(
                "sender and receiver must be different users".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, cmd.from_user_id, "sender")
                .await?;
            self.require_user_exists(&db_tx, cmd.to_user_id, "receiver")
                .await?;
            if let Some(contact_id) = cmd.contact_id {
                if let Err(err) = self
                    .require_contact_usable(&db_tx, contact_id, cmd.from_user_id)
                    .await
                {
                    tracing::warn!(
                        contact_id,
                        user_id = cmd.from_user_id,
                        "add_transaction rejected: contact absent or foreign"
                    );
                    return Err(err);
                }
            }

            let model = transactions::ActiveModel {
                id: ActiveValue::NotSet,
                from_user_id: ActiveValue::Set(cmd.from_user_id),
                to_user_id: ActiveValue::Set(cmd.to_user_id),
                kind: ActiveValue::Set(kind.as_str().to_string()),
                amount_minor: ActiveValue::Set(amount.cents()),
                date: ActiveValue::Set(date),
                description: ActiveValue::Set(description),
                contact_id: ActiveValue::Set(cmd.contact_id),
                created_at: ActiveValue::Set(Utc::now()),
            };
            let inserted = model.insert(&db_tx).await?;
            Ok(inserted.id)
        })
    }

    /// Patches a transaction in place; only the sender may do so.
    ///
    /// A missing row is a not-found error, a foreign row an authorization
    /// error. Every provided field is revalidated with the creation rules.
    pub async fn update_transaction(
        &self,
        cmd: TransactionUpdateCmd,
    ) -> ResultEngine<Transaction> {
        if cmd.is_empty() {
            return Err(EngineError::InvalidField("no fields to update".to_string()));
        }
        let kind = cmd.kind.as_deref().map(validation::parse_kind).transpose()?;
        let amount = cmd
            .amount
            .as_deref()
            .map(validation::parse_amount)
            .transpose()?;
        let date = cmd.date.as_deref().map(validation::parse_date).transpose()?;

        with_tx!(self, |db_tx| {
            let model = match self.find_transaction(&db_tx, cmd.transaction_id).await? {
                Some(model) => model,
                None => {
                    return Err(EngineError::KeyNotFound("transaction".to_string()));
                }
            };
            if model.from_user_id != cmd.user_id {
                tracing::warn!(
                    transaction_id = cmd.transaction_id,
                    user_id = cmd.user_id,
                    sender = model.from_user_id,
                    "update_transaction rejected: caller is not the sender"
                );
                return Err(EngineError::Forbidden(
                    "only the sender may update a transaction".to_string(),
                ));
            }

            let mut active = transactions::ActiveModel {
                id: ActiveValue::Set(model.id),
                ..Default::default()
            };
            if let Some(kind) = kind {
                active.kind = ActiveValue::Set(kind.as_str().to_string());
            }
            if let Some(amount) = amount {
                active.amount_minor = ActiveValue::Set(amount.cents());
            }
            if let Some(date) = date {
                active.date = ActiveValue::Set(date);
            }
            if let Some(description) = &cmd.description {
                active.description =
                    ActiveValue::Set(validation::optional_text(Some(description.as_str())));
            }

            let updated = active.update(&db_tx).await?;
            Transaction::try_from(updated)
        })
    }

    /// Deletes a transaction if the caller is its sender.
    ///
    /// Idempotent by design: a missing row and a row owned by someone else
    /// both yield `deleted = 0`, never an error. The log distinguishes the
    /// two causes even though the return value collapses them.
    pub async fn delete_transaction(
        &self,
        transaction_id: i64,
        user_id: i64,
    ) -> ResultEngine<u64> {
        with_tx!(self, |db_tx| {
            match self.find_transaction(&db_tx, transaction_id).await? {
                None => {
                    tracing::debug!(transaction_id, user_id, "delete skipped: transaction absent");
                    Ok(0)
                }
                Some(model) if model.from_user_id != user_id => {
                    tracing::warn!(
                        transaction_id,
                        user_id,
                        sender = model.from_user_id,
                        "delete skipped: caller is not the sender"
                    );
                    Ok(0)
                }
                Some(model) => {
                    let result = transactions::Entity::delete_by_id(model.id)
                        .exec(&db_tx)
                        .await?;
                    Ok(result.rows_affected)
                }
            }
        })
    }
}
