//! Candidate persistence shared by every service that creates or reads
//! candidates. Callers pass a transaction when the write must commit
//! together with an activity entry.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QueryTrait, Select, Set, SqlErr,
};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Candidate, CandidateEmail, CandidatePhone, CreateCandidate};
use domain::{EMAIL_LABEL_PRIMARY, PHONE_LABEL_OTHER};

use crate::entities::{candidate, candidate_email, candidate_phone, email_label, phone_label};

/// Attach emails and phones (with label names) to candidate rows,
/// preserving row order.
pub async fn load_candidates<C>(db: &C, rows: Vec<candidate::Model>) -> AppResult<Vec<Candidate>>
where
    C: ConnectionTrait,
{
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

    let email_labels: HashMap<i32, String> = email_label::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|label| (label.id, label.description))
        .collect();
    let phone_labels: HashMap<i32, String> = phone_label::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|label| (label.id, label.description))
        .collect();

    let mut emails: HashMap<Uuid, Vec<CandidateEmail>> = HashMap::new();
    for row in candidate_email::Entity::find()
        .filter(candidate_email::Column::CandidateId.is_in(ids.clone()))
        .order_by_desc(candidate_email::Column::IsDefault)
        .order_by_asc(candidate_email::Column::Address)
        .all(db)
        .await?
    {
        let label = email_labels
            .get(&row.email_label_id)
            .cloned()
            .unwrap_or_default();
        emails.entry(row.candidate_id).or_default().push(row.into_domain(label));
    }

    let mut phones: HashMap<Uuid, Vec<CandidatePhone>> = HashMap::new();
    for row in candidate_phone::Entity::find()
        .filter(candidate_phone::Column::CandidateId.is_in(ids))
        .order_by_desc(candidate_phone::Column::IsDefault)
        .order_by_asc(candidate_phone::Column::Value)
        .all(db)
        .await?
    {
        let label = phone_labels
            .get(&row.phone_label_id)
            .cloned()
            .unwrap_or_default();
        phones.entry(row.candidate_id).or_default().push(row.into_domain(label));
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.id;
            row.into_domain(
                emails.remove(&id).unwrap_or_default(),
                phones.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

/// Id of the candidate in `domain_id` that already uses `address`.
pub async fn find_candidate_id_by_email<C>(
    db: &C,
    domain_id: Uuid,
    address: &str,
) -> AppResult<Option<Uuid>>
where
    C: ConnectionTrait,
{
    let found = email_owner_query(domain_id, address).one(db).await?;
    Ok(found.map(|email| email.candidate_id))
}

fn email_owner_query(domain_id: Uuid, address: &str) -> Select<candidate_email::Entity> {
    candidate_email::Entity::find()
        .filter(candidate_email::Column::DomainId.eq(domain_id))
        .filter(candidate_email::Column::Address.eq(address.trim().to_lowercase()))
}

/// Maps a violation of the per-domain address index to a conflict.
fn email_conflict(err: DbErr, address: &str) -> AppError {
    if is_unique_violation(err.sql_err()) {
        AppError::conflict(format!("Candidate with email {}", address))
    } else {
        AppError::Database(err)
    }
}

fn is_unique_violation(err: Option<SqlErr>) -> bool {
    matches!(err, Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Insert a candidate with its contact details.
///
/// Emails are lower-cased; a missing label means `Primary` for emails and
/// `Other` for phones. Fails with a conflict when another candidate of the
/// same domain already uses one of the addresses. The pre-check gives a
/// clean error in the common case; the unique index on
/// `(domain_id, address)` settles concurrent inserts.
pub async fn insert_candidate<C>(
    db: &C,
    domain_id: Uuid,
    owner_user_id: Uuid,
    source: &str,
    data: &CreateCandidate,
) -> AppResult<Candidate>
where
    C: ConnectionTrait,
{
    data.validate()?;

    let addresses = data.normalized_addresses();
    let mut seen = HashSet::new();
    for address in &addresses {
        if !seen.insert(address.as_str()) {
            return Err(AppError::validation(format!(
                "Duplicate email address: {}",
                address
            )));
        }
        if find_candidate_id_by_email(db, domain_id, address)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!("Candidate with email {}", address)));
        }
    }

    let email_labels = email_label::Entity::find().all(db).await?;
    let phone_labels = phone_label::Entity::find().all(db).await?;

    let email_label_ids = data
        .emails
        .iter()
        .map(|email| {
            let wanted = email.label.as_deref().unwrap_or(EMAIL_LABEL_PRIMARY).trim();
            email_labels
                .iter()
                .find(|label| label.description.eq_ignore_ascii_case(wanted))
                .map(|label| (label.id, label.description.clone()))
                .ok_or_else(|| AppError::validation(format!("Unknown email label: {}", wanted)))
        })
        .collect::<AppResult<Vec<_>>>()?;
    let phone_label_ids = data
        .phones
        .iter()
        .map(|phone| {
            let wanted = phone.label.as_deref().unwrap_or(PHONE_LABEL_OTHER).trim();
            phone_labels
                .iter()
                .find(|label| label.description.eq_ignore_ascii_case(wanted))
                .map(|label| (label.id, label.description.clone()))
                .ok_or_else(|| AppError::validation(format!("Unknown phone label: {}", wanted)))
        })
        .collect::<AppResult<Vec<_>>>()?;

    let now = Utc::now();
    let row = candidate::ActiveModel {
        id: Set(Uuid::new_v4()),
        owner_user_id: Set(owner_user_id),
        first_name: Set(clean(&data.first_name)),
        last_name: Set(clean(&data.last_name)),
        objective: Set(clean(&data.objective)),
        summary: Set(clean(&data.summary)),
        source: Set(source.to_string()),
        added_time: Set(now),
        updated_time: Set(now),
    }
    .insert(db)
    .await?;

    let mut emails = Vec::with_capacity(addresses.len());
    for ((email, address), (label_id, label)) in
        data.emails.iter().zip(addresses).zip(email_label_ids)
    {
        let model = candidate_email::ActiveModel {
            id: Set(Uuid::new_v4()),
            candidate_id: Set(row.id),
            domain_id: Set(domain_id),
            email_label_id: Set(label_id),
            address: Set(address.clone()),
            is_default: Set(email.is_default),
        }
        .insert(db)
        .await
        .map_err(|e| email_conflict(e, &address))?;
        emails.push(model.into_domain(label));
    }

    let mut phones = Vec::with_capacity(data.phones.len());
    for (phone, (label_id, label)) in data.phones.iter().zip(phone_label_ids) {
        let model = candidate_phone::ActiveModel {
            id: Set(Uuid::new_v4()),
            candidate_id: Set(row.id),
            phone_label_id: Set(label_id),
            value: Set(phone.value.trim().to_string()),
            is_default: Set(phone.is_default),
        }
        .insert(db)
        .await?;
        phones.push(model.into_domain(label));
    }

    Ok(row.into_domain(emails, phones))
}

/// Trimmed value, with blank strings treated as absent.
pub fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
