//! Generic repository over one SeaORM entity.
//!
//! Writes are staged in the owning [`RepositoryContext`] and only become
//! durable on `save`. Reads share the unit of work's transaction once a write
//! has opened it, so they see changes staged earlier in the scope. Every read orders by primary key:
//! `find` returns the first match in that order and enumerations page
//! through it.
use crate::context::RepositoryContext;
use crate::entities::{self, Record};
use crate::errors::PropertiesError;
use async_stream::try_stream;
use futures::stream::BoxStream;
use sea_orm::sea_query::IntoCondition;
use sea_orm::{
    ActiveModelTrait, ActiveValue, Condition, EntityTrait, IntoActiveModel, Iterable,
    PaginatorTrait, PrimaryKeyToColumn, QueryFilter, QueryOrder, Select,
};
use std::marker::PhantomData;
use std::sync::Arc;

pub type OwnerRepository = Repository<entities::Owner>;
pub type PropertyRepository = Repository<entities::Property>;
pub type PropertyImageRepository = Repository<entities::PropertyImage>;
pub type PropertyTraceRepository = Repository<entities::PropertyTrace>;

pub struct Repository<E> {
    context: Arc<RepositoryContext>,
    page_size: u64,
    _entity: PhantomData<E>,
}

impl<E> Repository<E>
where
    E: Record,
    E::Model: IntoActiveModel<E::Active> + Send + Sync,
{
    pub fn new(context: Arc<RepositoryContext>, page_size: u64) -> Self {
        Self {
            context,
            page_size: page_size.max(1),
            _entity: PhantomData,
        }
    }

    /// Stages an insert. A nil identity is replaced with a fresh one.
    pub async fn create(&self, mut model: E::Model) -> Result<E::Model, PropertiesError> {
        E::ensure_id(&mut model);
        let active = staged::<E>(model);

        let txn = self.context.scope().await?;
        let created = active.insert(&*txn).await?;
        self.context.track_change();

        Ok(created)
    }

    /// Stages a full-row update keyed by the model's identity.
    pub async fn update(&self, model: E::Model) -> Result<E::Model, PropertiesError> {
        let active = staged::<E>(model);

        let txn = self.context.scope().await?;
        let updated = active.update(&*txn).await?;
        self.context.track_change();

        Ok(updated)
    }

    pub async fn find<F>(&self, predicate: F) -> Result<Option<E::Model>, PropertiesError>
    where
        F: IntoCondition,
    {
        let query = ordered::<E>(predicate.into_condition());
        let open = self.context.current().await;
        let found = match open.as_ref() {
            Some(txn) => query.one(txn).await?,
            None => query.one(self.context.connection()).await?,
        };

        Ok(found)
    }

    pub fn get(&self) -> BoxStream<'_, Result<E::Model, PropertiesError>> {
        self.get_by_filter(Condition::all())
    }

    /// Lazily enumerates matches, one page per store round-trip.
    ///
    /// The unit of work is locked only while a page is fetched, never while
    /// the consumer holds an item.
    pub fn get_by_filter<F>(&self, predicate: F) -> BoxStream<'_, Result<E::Model, PropertiesError>>
    where
        F: IntoCondition,
    {
        let condition = predicate.into_condition();
        Box::pin(try_stream! {
            let mut page = 0;
            loop {
                let rows = {
                    let query = ordered::<E>(condition.clone());
                    let open = self.context.current().await;
                    let rows = match open.as_ref() {
                        Some(txn) => query.paginate(txn, self.page_size).fetch_page(page).await,
                        None => {
                            query
                                .paginate(self.context.connection(), self.page_size)
                                .fetch_page(page)
                                .await
                        }
                    }
                    .map_err(PropertiesError::from)?;
                    rows
                };

                let exhausted = (rows.len() as u64) < self.page_size;
                for row in rows {
                    yield row;
                }
                if exhausted {
                    break;
                }
                page += 1;
            }
        })
    }
}

fn ordered<E: EntityTrait>(condition: Condition) -> Select<E> {
    let mut query = E::find().filter(condition);
    for key in E::PrimaryKey::iter() {
        query = query.order_by_asc(key.into_column());
    }
    query
}

/// Converts a plain model into an active model with every column marked as set.
fn staged<E>(model: E::Model) -> E::Active
where
    E: Record,
    E::Model: IntoActiveModel<E::Active>,
{
    let mut active = model.into_active_model();
    for column in E::Column::iter() {
        if let ActiveValue::Unchanged(value) = active.get(column) {
            active.set(column, value);
        }
    }
    active
}
