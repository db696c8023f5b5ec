use realestate::entities::{property, property_trace, Money};
use realestate::service::PropertiesService;
use sea_orm::prelude::{Decimal, Uuid};

/// Builder for creating test properties
pub struct PropertyBuilder {
    owner_id: Uuid,
    name: String,
    code_internal: String,
    price: Decimal,
    year: i32,
}

impl PropertyBuilder {
    pub fn new(owner_id: Uuid, name: &str) -> Self {
        Self {
            owner_id,
            name: name.to_string(),
            code_internal: "P-000".to_string(),
            price: Decimal::new(100000, 0),
            year: 2000,
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code_internal = code.to_string();
        self
    }

    pub fn with_price(mut self, price: i64) -> Self {
        self.price = Decimal::new(price, 0);
        self
    }

    /// Price given as decimal text, e.g. "250000.50"
    pub fn with_exact_price(mut self, price: &str) -> Self {
        self.price = price.parse().expect("Invalid test price");
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn build(self) -> property::Model {
        property::Model {
            property_id: Uuid::nil(),
            owner_id: self.owner_id,
            name: self.name,
            code_internal: self.code_internal,
            price: Money(self.price),
            year: self.year,
        }
    }

    pub async fn create(self, service: &PropertiesService) -> property::Model {
        service
            .add_property(self.build())
            .await
            .expect("Failed to create test property")
    }
}

/// Builder for creating test property traces
pub struct TraceBuilder {
    property_id: Uuid,
    name: String,
    value: Decimal,
    tax: Decimal,
}

impl TraceBuilder {
    pub fn new(property_id: Uuid, name: &str) -> Self {
        Self {
            property_id,
            name: name.to_string(),
            value: Decimal::new(100000, 0),
            tax: Decimal::new(1000, 0),
        }
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Decimal::new(value, 0);
        self
    }

    pub fn with_tax(mut self, tax: i64) -> Self {
        self.tax = Decimal::new(tax, 0);
        self
    }

    pub async fn create(self, service: &PropertiesService) -> property_trace::Model {
        service
            .add_property_trace(property_trace::Model {
                id: Uuid::nil(),
                property_id: self.property_id,
                name: self.name,
                value: Money(self.value),
                tax: Money(self.tax),
            })
            .await
            .expect("Failed to create test trace")
    }
}
