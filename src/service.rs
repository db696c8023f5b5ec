//! Business operations over owners, properties, images and traces.
//!
//! Every write operation stages its changes through the repositories and ends
//! the shared [`RepositoryContext`] once: commit on success, rollback on any
//! error, so a call is a single atomic unit of work. Listing operations are lazy streams that
//! issue their store round-trips as the consumer pulls.
use crate::context::RepositoryContext;
use crate::entities::{owner, property, property_image, property_trace, Money};
use crate::errors::PropertiesError;
use crate::matches::{matches_by_text, text_of};
use crate::repository::{
    OwnerRepository, PropertyImageRepository, PropertyRepository, PropertyTraceRepository,
};
use async_stream::try_stream;
use futures::future;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use sea_orm::prelude::{Decimal, Uuid};
use sea_orm::{ColumnTrait, DatabaseConnection};
use serde::Serialize;
use std::sync::Arc;

/// One row of the owner → property join, with the property's image and trace when present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub owner: owner::Model,
    pub property: property::Model,
    pub image: Option<property_image::Model>,
    pub trace: Option<property_trace::Model>,
}

impl PropertyListing {
    /// Owner, property or trace fields containing `text`; the image is never inspected.
    pub fn matches(&self, text: &str) -> bool {
        let owner_match = matches_by_text(
            Some(&self.owner),
            text,
            &[&|o: &owner::Model| text_of(&o.name)],
        );
        let property_match = matches_by_text(
            Some(&self.property),
            text,
            &[
                &|p: &property::Model| text_of(&p.name),
                &|p: &property::Model| text_of(&p.code_internal),
                &|p: &property::Model| text_of(p.price),
                &|p: &property::Model| text_of(p.year),
            ],
        );
        let trace_match = matches_by_text(
            self.trace.as_ref(),
            text,
            &[
                &|t: &property_trace::Model| text_of(&t.name),
                &|t: &property_trace::Model| text_of(t.value),
                &|t: &property_trace::Model| text_of(t.tax),
            ],
        );

        owner_match || property_match || trace_match
    }
}

pub struct PropertiesService {
    context: Arc<RepositoryContext>,
    owners: OwnerRepository,
    properties: PropertyRepository,
    images: PropertyImageRepository,
    traces: PropertyTraceRepository,
}

impl PropertiesService {
    pub fn new(
        context: Arc<RepositoryContext>,
        owners: OwnerRepository,
        properties: PropertyRepository,
        images: PropertyImageRepository,
        traces: PropertyTraceRepository,
    ) -> Self {
        Self {
            context,
            owners,
            properties,
            images,
            traces,
        }
    }

    /// Wires a fresh unit of work and the four repositories over it.
    pub fn scoped(db: &DatabaseConnection, page_size: u64) -> Self {
        let context = Arc::new(RepositoryContext::new(db.clone()));
        Self::new(
            context.clone(),
            OwnerRepository::new(context.clone(), page_size),
            PropertyRepository::new(context.clone(), page_size),
            PropertyImageRepository::new(context.clone(), page_size),
            PropertyTraceRepository::new(context, page_size),
        )
    }

    pub async fn add_owner(&self, name: String) -> Result<owner::Model, PropertiesError> {
        let created = self
            .owners
            .create(owner::Model {
                owner_id: Uuid::nil(),
                name,
            })
            .await;
        let owner = self.context.finish(created).await?;

        tracing::info!(owner_id = %owner.owner_id, "Owner added");
        Ok(owner)
    }

    pub async fn add_property(
        &self,
        property: property::Model,
    ) -> Result<property::Model, PropertiesError> {
        let created = self.properties.create(property).await;
        let added = self.context.finish(created).await?;

        tracing::info!(
            property_id = %added.property_id,
            owner_id = %added.owner_id,
            "Property added"
        );
        Ok(added)
    }

    /// Creates the property's image on first upload, replaces its content afterwards.
    ///
    /// `enabled` is only set when the image is first created.
    pub async fn update_property_image(
        &self,
        property_id: Uuid,
        image: Vec<u8>,
        image_name: String,
    ) -> Result<property_image::Model, PropertiesError> {
        let staged = async {
            match self.find_property_image(property_id).await? {
                None => {
                    self.images
                        .create(property_image::Model {
                            id: Uuid::nil(),
                            property_id,
                            file: image,
                            file_name: image_name,
                            enabled: true,
                        })
                        .await
                }
                Some(mut existing) => {
                    existing.file = image;
                    existing.file_name = image_name;
                    self.images.update(existing).await
                }
            }
        }
        .await;
        let saved = self.context.finish(staged).await?;

        tracing::info!(%property_id, file_name = %saved.file_name, "Property image stored");
        Ok(saved)
    }

    pub async fn update_property_price(
        &self,
        property_id: Uuid,
        price: Decimal,
    ) -> Result<property::Model, PropertiesError> {
        let staged = async {
            let mut property = self
                .properties
                .find(property::Column::PropertyId.eq(property_id))
                .await?
                .ok_or_else(|| {
                    PropertiesError::not_found(
                        "Property not found with related property identifier",
                    )
                })?;

            property.price = Money(price);
            self.properties.update(property).await
        }
        .await;
        let updated = self.context.finish(staged).await?;

        tracing::info!(%property_id, %price, "Property price updated");
        Ok(updated)
    }

    pub async fn find_property_image(
        &self,
        property_id: Uuid,
    ) -> Result<Option<property_image::Model>, PropertiesError> {
        self.images
            .find(property_image::Column::PropertyId.eq(property_id))
            .await
    }

    /// Records a price/tax event for a property.
    pub async fn add_property_trace(
        &self,
        trace: property_trace::Model,
    ) -> Result<property_trace::Model, PropertiesError> {
        let created = self.traces.create(trace).await;
        let added = self.context.finish(created).await?;

        tracing::info!(
            property_id = %added.property_id,
            trace_id = %added.id,
            "Property trace added"
        );
        Ok(added)
    }

    /// Streams one listing per (owner, property) pair.
    ///
    /// Owners are walked in key order, each owner's properties likewise, and
    /// every property costs one image lookup and one trace lookup.
    pub fn get_properties(&self) -> BoxStream<'_, Result<PropertyListing, PropertiesError>> {
        Box::pin(try_stream! {
            let mut owners = self.owners.get();
            while let Some(owner) = owners.try_next().await? {
                tracing::debug!(owner_id = %owner.owner_id, "Listing owner properties");

                let mut properties = self
                    .properties
                    .get_by_filter(property::Column::OwnerId.eq(owner.owner_id));
                while let Some(property) = properties.try_next().await? {
                    let image = self.find_property_image(property.property_id).await?;
                    let trace = self
                        .traces
                        .find(property_trace::Column::PropertyId.eq(property.property_id))
                        .await?;

                    yield PropertyListing {
                        owner: owner.clone(),
                        property,
                        image,
                        trace,
                    };
                }
            }
        })
    }

    /// [`get_properties`](Self::get_properties) narrowed to listings matching `text`.
    pub fn get_properties_matching(
        &self,
        text: &str,
    ) -> BoxStream<'_, Result<PropertyListing, PropertiesError>> {
        let text = text.to_owned();
        self.get_properties()
            .try_filter(move |listing| future::ready(listing.matches(&text)))
            .boxed()
    }

    pub fn get_traces_by_property(
        &self,
        property_id: Uuid,
    ) -> BoxStream<'_, Result<property_trace::Model, PropertiesError>> {
        self.traces
            .get_by_filter(property_trace::Column::PropertyId.eq(property_id))
    }
}
