//! Read-only reference tables.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use common::AppResult;
use domain::{
    Country, EmailLabel, Language, Organization, PhoneLabel, Product, RatingTag, SocialNetwork,
    University,
};
use models::entities::{
    country, email_label, language, organization, phone_label, product, rating_tag,
    social_network, university,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LookupRepository: Send + Sync {
    async fn social_networks(&self) -> AppResult<Vec<SocialNetwork>>;
    async fn countries(&self) -> AppResult<Vec<Country>>;
    async fn email_labels(&self) -> AppResult<Vec<EmailLabel>>;
    async fn phone_labels(&self) -> AppResult<Vec<PhoneLabel>>;
    async fn rating_tags(&self) -> AppResult<Vec<RatingTag>>;
    async fn languages(&self) -> AppResult<Vec<Language>>;
    async fn universities(&self) -> AppResult<Vec<University>>;
    async fn organizations(&self) -> AppResult<Vec<Organization>>;
    async fn products(&self) -> AppResult<Vec<Product>>;
}

pub struct LookupStore {
    db: DatabaseConnection,
}

impl LookupStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn all<E, T>(&self, order_by: E::Column) -> AppResult<Vec<T>>
    where
        E: EntityTrait,
        T: From<E::Model>,
    {
        let rows = E::find().order_by_asc(order_by).all(&self.db).await?;
        Ok(rows.into_iter().map(T::from).collect())
    }
}

#[async_trait]
impl LookupRepository for LookupStore {
    async fn social_networks(&self) -> AppResult<Vec<SocialNetwork>> {
        self.all::<social_network::Entity, _>(social_network::Column::Name)
            .await
    }

    async fn countries(&self) -> AppResult<Vec<Country>> {
        self.all::<country::Entity, _>(country::Column::Name).await
    }

    async fn email_labels(&self) -> AppResult<Vec<EmailLabel>> {
        self.all::<email_label::Entity, _>(email_label::Column::Id).await
    }

    async fn phone_labels(&self) -> AppResult<Vec<PhoneLabel>> {
        self.all::<phone_label::Entity, _>(phone_label::Column::Id).await
    }

    async fn rating_tags(&self) -> AppResult<Vec<RatingTag>> {
        self.all::<rating_tag::Entity, _>(rating_tag::Column::Id).await
    }

    async fn languages(&self) -> AppResult<Vec<Language>> {
        self.all::<language::Entity, _>(language::Column::Name).await
    }

    async fn universities(&self) -> AppResult<Vec<University>> {
        self.all::<university::Entity, _>(university::Column::Name)
            .await
    }

    async fn organizations(&self) -> AppResult<Vec<Organization>> {
        self.all::<organization::Entity, _>(organization::Column::Name)
            .await
    }

    async fn products(&self) -> AppResult<Vec<Product>> {
        self.all::<product::Entity, _>(product::Column::Name).await
    }
}
