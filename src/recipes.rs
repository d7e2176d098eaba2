//! Recipe catalog.
//!
//! An independent CRUD resource, unrelated to the chat entities and unscoped
//! (no ownership checks). Bulk operations filter on the `ingredientes` field:
//! the bulk delete matches it exactly while the bulk update treats the filter
//! as a case-insensitive substring, mirroring the original service.

use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Bson};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::store::Store;
use crate::Result;

/// A catalog recipe.
///
/// Field values are optional because a full-overwrite update may store null
/// for fields omitted from the request (see DESIGN.md, open questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// MongoDB document ID.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Recipe title.
    #[serde(default)]
    pub titulo: Option<String>,
    /// Preparation instructions.
    #[serde(default)]
    pub preparo: Option<String>,
    /// Ingredient list, stored as a single string.
    #[serde(default)]
    pub ingredientes: Option<String>,
}

/// Field set applied by a full-overwrite update.
///
/// All three fields are always written; an absent field is written as null,
/// matching the original service's behavior.
#[derive(Debug, Clone, Default)]
pub struct RecipeUpdate {
    pub titulo: Option<String>,
    pub preparo: Option<String>,
    pub ingredientes: Option<String>,
}

fn to_bson(field: &Option<String>) -> Bson {
    match field {
        Some(value) => Bson::String(value.clone()),
        None => Bson::Null,
    }
}

/// Repository for the `receitas` collection.
pub struct RecipeRepository {
    collection: Collection<Recipe>,
}

impl RecipeRepository {
    /// Create a new repository over the shared store.
    pub fn new(store: &Store) -> Self {
        Self {
            collection: store.recipes(),
        }
    }

    /// Insert a new recipe.
    pub async fn create(&self, titulo: &str, preparo: &str, ingredientes: &str) -> Result<()> {
        let recipe = Recipe {
            id: None,
            titulo: Some(titulo.to_string()),
            preparo: Some(preparo.to_string()),
            ingredientes: Some(ingredientes.to_string()),
        };
        self.collection.insert_one(&recipe).await?;
        Ok(())
    }

    /// List all recipes in store order.
    pub async fn list(&self) -> Result<Vec<Recipe>> {
        let cursor = self.collection.find(doc! {}).await?;
        let recipes = cursor.try_collect().await?;
        Ok(recipes)
    }

    /// Find a recipe by ID.
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Recipe>> {
        let recipe = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(recipe)
    }

    /// Delete a recipe by ID.
    pub async fn delete(&self, id: ObjectId) -> Result<()> {
        self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(())
    }

    /// Delete every recipe whose `ingredientes` equals `filter` exactly.
    ///
    /// Exact equality, not a substring match; the bulk update below uses a
    /// different matching rule on the same field.
    pub async fn delete_by_ingredient(&self, filter: &str) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! { "ingredientes": filter })
            .await?;
        Ok(result.deleted_count)
    }

    /// Overwrite all three recipe fields.
    ///
    /// Returns `false` when no recipe matched the ID.
    pub async fn update(&self, id: ObjectId, update: &RecipeUpdate) -> Result<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "titulo": to_bson(&update.titulo),
                    "preparo": to_bson(&update.preparo),
                    "ingredientes": to_bson(&update.ingredientes),
                }},
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    /// Set `titulo` on every recipe whose `ingredientes` contains `filter`,
    /// case-insensitively.
    pub async fn update_titles_by_ingredient(
        &self,
        filter: &str,
        titulo: &Option<String>,
    ) -> Result<u64> {
        let result = self
            .collection
            .update_many(
                doc! { "ingredientes": { "$regex": filter, "$options": "i" } },
                doc! { "$set": { "titulo": to_bson(titulo) } },
            )
            .await?;
        Ok(result.modified_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_deserializes_with_null_fields() {
        // A recipe that went through a partial overwrite may store nulls.
        let json = r#"{"titulo":"Bolo","preparo":null,"ingredientes":null}"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.titulo.as_deref(), Some("Bolo"));
        assert!(recipe.preparo.is_none());
        assert!(recipe.ingredientes.is_none());
    }

    #[test]
    fn test_recipe_id_skipped_when_absent() {
        let recipe = Recipe {
            id: None,
            titulo: Some("Bolo".to_string()),
            preparo: Some("misture tudo".to_string()),
            ingredientes: Some("farinha, ovos".to_string()),
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_to_bson_maps_absent_to_null() {
        assert_eq!(to_bson(&None), Bson::Null);
        assert_eq!(
            to_bson(&Some("x".to_string())),
            Bson::String("x".to_string())
        );
    }
}
