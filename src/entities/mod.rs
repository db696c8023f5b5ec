pub mod money;
pub mod owner;
pub mod property;
pub mod property_image;
pub mod property_trace;

pub use money::Money;
pub use owner::Entity as Owner;
pub use property::Entity as Property;
pub use property_image::Entity as PropertyImage;
pub use property_trace::Entity as PropertyTrace;

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait};

/// An entity the generic repository can stage inserts and updates for.
pub trait Record: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + From<Self::Model> + Send;

    /// Assigns a fresh identity when the model still carries the nil UUID.
    fn ensure_id(model: &mut Self::Model);
}

/// Byte arrays travel as standard base64 strings in JSON.
pub(crate) mod base64_bytes {
    use base64ct::{Base64, Encoding};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&Base64::encode_string(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Base64::decode_vec(&encoded).map_err(de::Error::custom)
    }
}
