//! Dog Record Types
//!
//! The domain record, the request bodies accepted by the API, and the mapping between a
//! record and the generic `TableEntity` row it is persisted as.

use super::error::DogError;
use crate::storage::table::TableEntity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A dog record as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    /// Row key. Generated on create, never changes.
    pub id: String,
    pub created_time: DateTime<Utc>,
    pub name: String,
    pub breed: String,
    pub age: u32,
    pub sex: String,
    /// Opaque version marker, replaced by the table on every write.
    pub concurrency_token: String,
}

/// Body of `POST /dogs`. Every field is optional at the wire level so that a missing
/// field becomes a validation message instead of a generic parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DogCreateModel {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub sex: Option<String>,
}

/// Body of `PUT /dogs/{id}`.
///
/// `age` has no absent state: a body without `age` is read as `0` and still written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DogUpdateModel {
    pub name: Option<String>,
    pub breed: Option<String>,
    #[serde(default)]
    pub age: u32,
    pub sex: Option<String>,
}

/// User supplied fields of a record that passed creation checks.
#[derive(Debug, Clone, PartialEq)]
pub struct DogFields {
    pub name: String,
    pub breed: String,
    pub age: u32,
    pub sex: String,
}

/// Row properties as they are laid out in the table.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DogProperties {
    created_time: DateTime<Utc>,
    name: String,
    breed: String,
    age: u32,
    sex: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl DogCreateModel {
    /// Checks that name, breed, age and sex are all supplied (strings non-empty).
    pub fn validate(self) -> Result<DogFields, DogError> {
        let mut missing = Vec::new();

        let name = present(self.name);
        let breed = present(self.breed);
        let sex = present(self.sex);

        if name.is_none() {
            missing.push("name");
        }
        if breed.is_none() {
            missing.push("breed");
        }
        if self.age.is_none() {
            missing.push("age");
        }
        if sex.is_none() {
            missing.push("sex");
        }

        match (name, breed, self.age, sex) {
            (Some(name), Some(breed), Some(age), Some(sex)) => Ok(DogFields {
                name,
                breed,
                age,
                sex,
            }),
            _ => Err(DogError::Validation(format!(
                "Please pass a dog with all required properties in the request body: \
                 name, breed, age, sex (missing: {})",
                missing.join(", ")
            ))),
        }
    }
}

impl Dog {
    /// Applies a partial update.
    ///
    /// `name`, `breed` and `sex` only overwrite when supplied and non-empty. `age` always
    /// overwrites, including with `0`.
    pub fn merge(&mut self, update: DogUpdateModel) {
        if let Some(name) = present(update.name) {
            self.name = name;
        }
        if let Some(breed) = present(update.breed) {
            self.breed = breed;
        }
        if let Some(sex) = present(update.sex) {
            self.sex = sex;
        }
        self.age = update.age;
    }

    pub fn fields(&self) -> DogFields {
        DogFields {
            name: self.name.clone(),
            breed: self.breed.clone(),
            age: self.age,
            sex: self.sex.clone(),
        }
    }

    pub fn to_table_entity(&self, partition: &str) -> Result<TableEntity, DogError> {
        let properties = DogProperties {
            created_time: self.created_time,
            name: self.name.clone(),
            breed: self.breed.clone(),
            age: self.age,
            sex: self.sex.clone(),
        };

        let properties = match serde_json::to_value(properties) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(DogError::Corrupt {
                    id: self.id.clone(),
                    detail: format!("expected an object, got {}", other),
                });
            }
            Err(e) => {
                return Err(DogError::Corrupt {
                    id: self.id.clone(),
                    detail: e.to_string(),
                });
            }
        };

        let mut entity = TableEntity::new(partition, &self.id, properties);
        entity.etag = self.concurrency_token.clone();
        Ok(entity)
    }

    pub fn from_table_entity(entity: TableEntity) -> Result<Self, DogError> {
        let properties: DogProperties = serde_json::from_value(Value::Object(entity.properties))
            .map_err(|e| DogError::Corrupt {
                id: entity.row_key.clone(),
                detail: e.to_string(),
            })?;

        Ok(Self {
            id: entity.row_key,
            created_time: properties.created_time,
            name: properties.name,
            breed: properties.breed,
            age: properties.age,
            sex: properties.sex,
            concurrency_token: entity.etag,
        })
    }
}

impl DogFields {
    /// Stamps a fresh id and creation time onto validated fields.
    pub fn into_new_dog(self) -> Dog {
        Dog {
            id: uuid::Uuid::new_v4().to_string(),
            created_time: Utc::now(),
            name: self.name,
            breed: self.breed,
            age: self.age,
            sex: self.sex,
            concurrency_token: String::new(),
        }
    }
}
